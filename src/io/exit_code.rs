//! Process exit codes.

/// Exit codes used by every command.
///
/// `NotFound` is not an error: the reference was well-formed but nothing in
/// the index matched it, so scripts can branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    NotFound = 1,
    GeneralError = 2,
    ConfigError = 3,
    FeedError = 4,
}

impl ExitCode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}
