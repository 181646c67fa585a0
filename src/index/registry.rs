//! Keyed registries and the key-level lookup steps shared by the builder's
//! link pass and the resolver.
//!
//! Key lookups try, in order: the name with the short alias expanded, the
//! name under the primary namespace, and (for classes and typedefs) a scan of
//! primary-namespace keys comparing only their final segment. The scan walks
//! keys in registration order, so when two entities share a final segment the
//! first registered one wins.

use indexmap::IndexMap;

use super::entities::{Class, Enum, File, Function, Group, Namespace, Typedef};
use crate::config::ResolverConfig;
use crate::types::{
    ClassId, EnumId, FileId, FunctionId, GroupId, NamespaceId, SCOPE_SEPARATOR, TypedefId,
    strip_scope,
};

#[derive(Debug, Default, Clone)]
pub(crate) struct Registry {
    pub namespaces: Vec<Namespace>,
    pub namespace_keys: IndexMap<String, NamespaceId>,
    pub classes: Vec<Class>,
    pub class_keys: IndexMap<String, ClassId>,
    /// Every typedef, including file-level ones that have no registry key.
    pub typedefs: Vec<Typedef>,
    pub typedef_keys: IndexMap<String, TypedefId>,
    pub functions: Vec<Function>,
    /// Bare function name to the first function registered under it.
    pub functions_by_name: IndexMap<String, FunctionId>,
    pub enums: Vec<Enum>,
    pub enum_keys: IndexMap<String, EnumId>,
    pub files: Vec<File>,
    pub file_keys: IndexMap<String, FileId>,
    pub groups: Vec<Group>,
    pub group_keys: IndexMap<String, GroupId>,
}

/// Exact key, then key under the primary namespace.
fn scoped_key<T: Copy>(
    keys: &IndexMap<String, T>,
    name: &str,
    config: &ResolverConfig,
) -> Option<T> {
    if let Some(&id) = keys.get(name) {
        return Some(id);
    }
    config
        .in_primary(name)
        .and_then(|prefixed| keys.get(&prefixed).copied())
}

/// First primary-namespace key whose final segment equals `name`.
fn suffix_key<T: Copy>(
    keys: &IndexMap<String, T>,
    name: &str,
    config: &ResolverConfig,
) -> Option<T> {
    if config.primary_namespace.is_empty() || name.contains(SCOPE_SEPARATOR) {
        return None;
    }
    let prefix = format!("{}{SCOPE_SEPARATOR}", config.primary_namespace);
    keys.iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .find(|(key, _)| strip_scope(key) == name)
        .map(|(_, &id)| id)
}

impl Registry {
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.index()]
    }

    pub fn typedef(&self, id: TypedefId) -> &Typedef {
        &self.typedefs[id.index()]
    }

    /// Class key lookup without any typedef indirection.
    pub fn class_key(&self, name: &str, config: &ResolverConfig) -> Option<ClassId> {
        let name = config.normalize(name);
        scoped_key(&self.class_keys, &name, config)
            .or_else(|| suffix_key(&self.class_keys, &name, config))
    }

    /// Typedef key lookup; also tries the group scope.
    pub fn typedef_key(&self, name: &str, config: &ResolverConfig) -> Option<TypedefId> {
        let name = config.normalize(name);
        scoped_key(&self.typedef_keys, &name, config)
            .or_else(|| {
                (!config.group_namespace.is_empty())
                    .then(|| format!("{}{SCOPE_SEPARATOR}{name}", config.group_namespace))
                    .and_then(|key| self.typedef_keys.get(&key).copied())
            })
            .or_else(|| suffix_key(&self.typedef_keys, &name, config))
    }

    pub fn namespace_key(&self, name: &str, config: &ResolverConfig) -> Option<NamespaceId> {
        let name = config.normalize(name);
        scoped_key(&self.namespace_keys, &name, config)
    }

    pub fn enum_key(&self, name: &str, config: &ResolverConfig) -> Option<EnumId> {
        let name = config.normalize(name);
        scoped_key(&self.enum_keys, &name, config)
    }
}
