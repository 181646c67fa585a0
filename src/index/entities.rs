//! Entity records stored in the symbol index.
//!
//! Cross-references between entities are handles, never references, so the
//! builder can create every node before it links any of them.

use serde::Serialize;

use crate::types::{
    ClassId, FunctionId, GroupId, Location, NamespaceId, TypedefId, join_scope, strip_scope,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Namespace {
    pub id: NamespaceId,
    pub qualified_name: String,
    pub location: Location,
    pub functions: Vec<FunctionId>,
    pub typedefs: Vec<TypedefId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    pub id: ClassId,
    pub qualified_name: String,
    /// Base class text as declared.
    pub base: Option<String>,
    /// Base class handle, set by `link()` when `base` names a known class.
    pub base_id: Option<ClassId>,
    pub location: Location,
    pub functions: Vec<FunctionId>,
    /// Typedefs that alias this class, in registration order.
    pub typedefs: Vec<TypedefId>,
}

impl Class {
    /// Class name without its enclosing scope.
    pub fn name(&self) -> &str {
        strip_scope(&self.qualified_name)
    }
}

/// What a typedef turned out to alias once the index was linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "alias", content = "class", rename_all = "snake_case")]
pub enum AliasTarget {
    /// Not linked yet; only observable while building.
    Pending,
    /// A handle to (or plain alias of) a registered class.
    Class(ClassId),
    /// Aliases something that is not a registered class.
    Opaque,
    /// Part of a typedef chain that loops back on itself.
    Cyclic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Typedef {
    pub id: TypedefId,
    /// Registry key: enclosing scope joined with the typedef name.
    pub qualified_name: String,
    /// Raw aliased-type text, e.g. `std::shared_ptr< class Texture >`.
    pub aliased: String,
    pub location: Location,
    /// Non-owning back-reference to the aliased class, fixed at link time.
    pub alias: AliasTarget,
}

impl Typedef {
    pub fn name(&self) -> &str {
        strip_scope(&self.qualified_name)
    }

    /// The class this typedef is a handle for, if any.
    pub fn shared_from(&self) -> Option<ClassId> {
        match self.alias {
            AliasTarget::Class(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub id: FunctionId,
    pub name: String,
    /// Qualified name of the owning class, namespace or group scope; empty for free functions.
    pub owner: String,
    pub location: Location,
    /// Required (non-defaulted) argument types.
    pub args: Vec<String>,
}

impl Function {
    pub fn qualified_name(&self) -> String {
        join_scope(&self.owner, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enum {
    pub qualified_name: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    pub name: String,
    pub location: Location,
    /// File-level typedefs. These are not part of the keyed typedef registry.
    pub typedefs: Vec<TypedefId>,
    pub functions: Vec<FunctionId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub title: Option<String>,
    pub location: Location,
    pub functions: Vec<FunctionId>,
    /// Subgroup names as declared; resolved into `subgroups` by `link()`.
    pub subgroup_names: Vec<String>,
    pub subgroups: Vec<GroupId>,
}
