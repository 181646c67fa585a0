//! Reference resolution over a frozen [`SymbolIndex`].
//!
//! [`Resolver`] is the query surface used by the content layer. It borrows
//! the index immutably, so any number of resolvers can run side by side.
//!
//! - [`lookup`]: class, namespace, typedef and enum lookup with short-alias,
//!   primary-namespace, suffix and typedef fallbacks
//! - [`overload`]: function lookup and overload scoring
//! - [`dispatch`]: the single entry point taking a reference text and kind hint

pub mod dispatch;
pub mod lookup;
pub mod overload;

pub use dispatch::RefKind;
pub use overload::{ARGUMENT_WEIGHT, ARITY_BONUS, score_overload};

use serde::{Deserialize, Serialize};

use crate::index::SymbolIndex;
use crate::types::{
    ClassId, EntityKind, EnumId, FileId, FunctionId, GroupId, Location, NamespaceId, TypedefId,
};

/// Outcome of resolving a reference.
///
/// `Unresolved` is an ordinary value: callers match on it and render a plain
/// label instead of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Class(ClassId),
    Namespace(NamespaceId),
    Typedef(TypedefId),
    Function(FunctionId),
    Enum(EnumId),
    Group(GroupId),
    File(FileId),
    Unresolved,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::Class(_) => Some(EntityKind::Class),
            Self::Namespace(_) => Some(EntityKind::Namespace),
            Self::Typedef(_) => Some(EntityKind::Typedef),
            Self::Function(_) => Some(EntityKind::Function),
            Self::Enum(_) => Some(EntityKind::Enum),
            Self::Group(_) => Some(EntityKind::Group),
            Self::File(_) => Some(EntityKind::File),
            Self::Unresolved => None,
        }
    }

    /// Produce the result handed to the rendering layer.
    pub fn describe(&self, index: &SymbolIndex) -> ResolveResult {
        let (name, location) = match *self {
            Self::Class(id) => {
                let class = index.class(id);
                (class.qualified_name.clone(), &class.location)
            }
            Self::Namespace(id) => {
                let ns = index.namespace(id);
                (ns.qualified_name.clone(), &ns.location)
            }
            Self::Typedef(id) => {
                let typedef = index.typedef(id);
                (typedef.qualified_name.clone(), &typedef.location)
            }
            Self::Function(id) => {
                let function = index.function(id);
                (function.qualified_name(), &function.location)
            }
            Self::Enum(id) => {
                let enumeration = index.enumeration(id);
                (enumeration.qualified_name.clone(), &enumeration.location)
            }
            Self::Group(id) => {
                let group = index.group(id);
                (group.name.clone(), &group.location)
            }
            Self::File(id) => {
                let file = index.file(id);
                (file.name.clone(), &file.location)
            }
            Self::Unresolved => return ResolveResult::unresolved(),
        };

        ResolveResult {
            found: true,
            kind: self.kind(),
            target_qualified_name: Some(name),
            target_location: Some(location.clone()),
        }
    }
}

/// Serializable resolution result.
///
/// Serializes as `{"found": false}` or
/// `{"found": true, "kind": ..., "targetQualifiedName": ..., "targetLocation": ...}`.
/// Turning `target_location` into a path or URL is the renderer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResult {
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntityKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_location: Option<Location>,
}

impl ResolveResult {
    pub fn unresolved() -> Self {
        Self {
            found: false,
            kind: None,
            target_qualified_name: None,
            target_location: None,
        }
    }
}

impl SymbolIndex {
    /// Describe a resolution made against this index.
    pub fn describe(&self, resolution: Resolution) -> ResolveResult {
        resolution.describe(self)
    }
}

/// Read-only query surface over a frozen index.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a SymbolIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a SymbolIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &'a SymbolIndex {
        self.index
    }

    /// Resolve a reference and describe the result in one step.
    pub fn resolve_to_result(
        &self,
        reference: &str,
        kind: RefKind,
        override_text: Option<&str>,
    ) -> ResolveResult {
        self.resolve(reference, kind, override_text)
            .describe(self.index)
    }
}
