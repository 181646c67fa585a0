//! Output handling for the command-line binary.
//!
//! - [`envelope`]: the JSON envelope every command prints
//! - [`exit_code`]: process exit codes shared by commands and envelopes

pub mod envelope;
pub mod exit_code;

pub use envelope::{EntityType, Envelope, ErrorDetails, Meta, ResultCode, SCHEMA_VERSION, Status};
pub use exit_code::ExitCode;
