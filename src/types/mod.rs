use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Declares a stable, non-zero handle into one of the index registries.
///
/// Handles are assigned in registration order starting at 1, so the handle
/// value doubles as the registration position used for tie-breaking.
macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(NonZeroU32);

        impl $name {
            pub fn new(value: u32) -> Option<Self> {
                NonZeroU32::new(value).map(Self)
            }

            pub fn value(&self) -> u32 {
                self.0.get()
            }

            /// Handle for the registry slot at `index` (0-based).
            pub(crate) fn from_index(index: usize) -> Self {
                let raw = u32::try_from(index + 1).unwrap_or(u32::MAX);
                Self(NonZeroU32::new(raw).unwrap_or(NonZeroU32::MAX))
            }

            /// 0-based registry slot.
            pub(crate) fn index(&self) -> usize {
                (self.0.get() - 1) as usize
            }
        }
    };
}

define_handle!(
    /// Handle of a registered namespace.
    NamespaceId
);
define_handle!(
    /// Handle of a registered class or struct.
    ClassId
);
define_handle!(TypedefId);
define_handle!(FunctionId);
define_handle!(EnumId);
define_handle!(FileId);
define_handle!(GroupId);

/// Opaque location handle carried through from the declaration feed.
///
/// The engine never interprets it; rendering turns it into a path or anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(pub String);

impl Location {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of entity a reference resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Class,
    Namespace,
    Typedef,
    Function,
    Enum,
    Group,
    File,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Namespace => "namespace",
            Self::Typedef => "typedef",
            Self::Function => "function",
            Self::Enum => "enum",
            Self::Group => "group",
            Self::File => "file",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope separator used by qualified names.
pub const SCOPE_SEPARATOR: &str = "::";

/// Final `::` segment of a qualified name.
pub fn strip_scope(qualified: &str) -> &str {
    qualified
        .rsplit(SCOPE_SEPARATOR)
        .next()
        .unwrap_or(qualified)
}

/// Everything before the final `::` segment, or `""` for unqualified names.
pub fn parent_scope(qualified: &str) -> &str {
    qualified
        .rfind(SCOPE_SEPARATOR)
        .map(|pos| &qualified[..pos])
        .unwrap_or("")
}

/// Joins a scope and a name, omitting the separator for an empty scope.
pub fn join_scope(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}{SCOPE_SEPARATOR}{name}")
    }
}
