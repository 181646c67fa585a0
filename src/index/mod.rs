//! The symbol index: typed registries built once from a declaration feed.
//!
//! Build with [`IndexBuilder`], freeze with [`IndexBuilder::link`], then query
//! the resulting [`SymbolIndex`] through [`crate::resolve::Resolver`]. A frozen
//! index is never mutated, so it can be shared across threads freely.

pub(crate) mod alias;
pub mod args;
pub mod builder;
pub mod entities;
pub(crate) mod registry;

pub use args::parse_arg_list;
pub use builder::{IndexBuilder, Owner};
pub use entities::{AliasTarget, Class, Enum, File, Function, Group, Namespace, Typedef};

use serde::Serialize;
use std::collections::HashSet;

use crate::config::ResolverConfig;
use crate::error::BuildIssue;
use crate::types::{
    ClassId, EnumId, FileId, FunctionId, GroupId, NamespaceId, SCOPE_SEPARATOR, TypedefId,
    parent_scope, strip_scope,
};
use registry::Registry;

/// Registry sizes of a frozen index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub namespaces: usize,
    pub classes: usize,
    pub typedefs: usize,
    pub functions: usize,
    pub enums: usize,
    pub files: usize,
    pub groups: usize,
    pub issues: usize,
}

/// Frozen, read-only symbol index.
#[derive(Debug, Clone)]
pub struct SymbolIndex {
    config: ResolverConfig,
    registry: Registry,
    diagnostics: Vec<BuildIssue>,
}

impl SymbolIndex {
    pub(crate) fn from_parts(
        config: ResolverConfig,
        registry: Registry,
        diagnostics: Vec<BuildIssue>,
    ) -> Self {
        Self {
            config,
            registry,
            diagnostics,
        }
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Naming rules the index was built with.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Problems reported while building. None of them stopped the build.
    pub fn diagnostics(&self) -> &[BuildIssue] {
        &self.diagnostics
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            namespaces: self.registry.namespaces.len(),
            classes: self.registry.classes.len(),
            typedefs: self.registry.typedefs.len(),
            functions: self.registry.functions.len(),
            enums: self.registry.enums.len(),
            files: self.registry.files.len(),
            groups: self.registry.groups.len(),
            issues: self.diagnostics.len(),
        }
    }

    pub fn function_count(&self) -> usize {
        self.registry.functions.len()
    }

    // ---------------------------------------------------------------------
    // Handle access
    // ---------------------------------------------------------------------

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        &self.registry.namespaces[id.index()]
    }

    pub fn class(&self, id: ClassId) -> &Class {
        self.registry.class(id)
    }

    pub fn typedef(&self, id: TypedefId) -> &Typedef {
        self.registry.typedef(id)
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.registry.functions[id.index()]
    }

    pub fn enumeration(&self, id: EnumId) -> &Enum {
        &self.registry.enums[id.index()]
    }

    pub fn file(&self, id: FileId) -> &File {
        &self.registry.files[id.index()]
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.registry.groups[id.index()]
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.registry.namespaces.iter()
    }

    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.registry.classes.iter()
    }

    pub fn typedefs(&self) -> impl Iterator<Item = &Typedef> {
        self.registry.typedefs.iter()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.registry.functions.iter()
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.registry.groups.iter()
    }

    // ---------------------------------------------------------------------
    // Exact key access
    // ---------------------------------------------------------------------

    pub fn class_by_key(&self, qualified_name: &str) -> Option<&Class> {
        self.registry
            .class_keys
            .get(qualified_name)
            .map(|&id| self.class(id))
    }

    pub fn typedef_by_key(&self, qualified_name: &str) -> Option<&Typedef> {
        self.registry
            .typedef_keys
            .get(qualified_name)
            .map(|&id| self.typedef(id))
    }

    pub fn namespace_by_key(&self, qualified_name: &str) -> Option<&Namespace> {
        self.registry
            .namespace_keys
            .get(qualified_name)
            .map(|&id| self.namespace(id))
    }

    pub fn find_file(&self, name: &str) -> Option<&File> {
        self.registry.file_keys.get(name).map(|&id| self.file(id))
    }

    /// Typedefs declared at file level in `name`.
    pub fn file_typedefs(&self, name: &str) -> Option<Vec<&Typedef>> {
        self.find_file(name)
            .map(|file| file.typedefs.iter().map(|&id| self.typedef(id)).collect())
    }

    pub fn find_group(&self, name: &str) -> Option<&Group> {
        self.registry.group_keys.get(name).map(|&id| self.group(id))
    }

    /// First function registered under the bare name `name`.
    pub fn function_by_bare_name(&self, name: &str) -> Option<FunctionId> {
        self.registry.functions_by_name.get(name).copied()
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Base classes of `id`, root first. `link()` already cut base cycles; the
    /// visited set keeps this bounded regardless.
    pub fn class_ancestors(&self, id: ClassId) -> Vec<ClassId> {
        let mut chain = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut current = self.class(id).base_id;
        while let Some(base) = current {
            if !visited.insert(base) {
                break;
            }
            chain.push(base);
            current = self.class(base).base_id;
        }
        chain.reverse();
        chain
    }

    /// Classes whose base is `id`, in registration order.
    pub fn class_descendants(&self, id: ClassId) -> Vec<ClassId> {
        self.classes()
            .filter(|class| class.base_id == Some(id))
            .map(|class| class.id)
            .collect()
    }

    /// Classes declared in `namespace`; with `recursive`, also in nested scopes.
    pub fn classes_in_namespace(&self, namespace: &str, recursive: bool) -> Vec<ClassId> {
        let nested_prefix = format!("{namespace}{SCOPE_SEPARATOR}");
        self.classes()
            .filter(|class| {
                if recursive {
                    class.qualified_name.starts_with(&nested_prefix)
                } else {
                    parent_scope(&class.qualified_name) == namespace
                }
            })
            .map(|class| class.id)
            .collect()
    }

    /// All classes sorted case-insensitively by unqualified name.
    pub fn ordered_classes(&self) -> Vec<&Class> {
        let mut classes: Vec<&Class> = self.classes().collect();
        classes.sort_by_cached_key(|class| class.name().to_lowercase());
        classes
    }

    /// All namespaces sorted case-insensitively by qualified name.
    pub fn ordered_namespaces(&self) -> Vec<&Namespace> {
        let mut namespaces: Vec<&Namespace> = self.namespaces().collect();
        namespaces.sort_by_cached_key(|ns| ns.qualified_name.to_lowercase());
        namespaces
    }

    /// Whitelisted, non-blacklisted namespaces in sorted order.
    pub fn whitelisted_namespaces(&self) -> Vec<&Namespace> {
        self.ordered_namespaces()
            .into_iter()
            .filter(|ns| {
                self.config.is_namespace_whitelisted(&ns.qualified_name)
                    && !self.config.is_namespace_blacklisted(&ns.qualified_name)
            })
            .collect()
    }

    /// Typedefs that alias `id`.
    pub fn typedefs_of(&self, id: ClassId) -> Vec<&Typedef> {
        self.class(id)
            .typedefs
            .iter()
            .map(|&typedef| self.typedef(typedef))
            .collect()
    }

    // ---------------------------------------------------------------------
    // Search tags
    // ---------------------------------------------------------------------

    fn push_function_tags(&self, tags: &mut Vec<String>, functions: &[FunctionId]) {
        for &id in functions {
            let name = &self.function(id).name;
            if !tags.iter().any(|tag| tag == name) {
                tags.push(name.clone());
            }
        }
    }

    /// Class name, the names of its typedefs and its function names.
    pub fn class_tags(&self, id: ClassId) -> Vec<String> {
        let class = self.class(id);
        let mut tags = vec![class.name().to_string()];
        for typedef in self.typedefs_of(id) {
            tags.push(typedef.name().to_string());
        }
        self.push_function_tags(&mut tags, &class.functions);
        tags
    }

    /// Namespace name, each of its segments and its function names.
    pub fn namespace_tags(&self, id: NamespaceId) -> Vec<String> {
        let ns = self.namespace(id);
        let mut tags = vec![ns.qualified_name.clone()];
        tags.extend(ns.qualified_name.split(SCOPE_SEPARATOR).map(str::to_string));
        self.push_function_tags(&mut tags, &ns.functions);
        tags
    }

    /// Group name and its function names.
    pub fn group_tags(&self, id: GroupId) -> Vec<String> {
        let group = self.group(id);
        let mut tags = vec![strip_scope(&group.name).to_string()];
        self.push_function_tags(&mut tags, &group.functions);
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;

    fn sample() -> (SymbolIndex, ClassId, ClassId, ClassId) {
        let mut b = IndexBuilder::new(ResolverConfig::default());
        let ns = b.register_namespace("cinder::gl", Location::default()).unwrap();
        let base = b
            .register_class("cinder::gl::TextureBase", None, Location::default())
            .unwrap();
        let texture = b
            .register_class("cinder::gl::Texture2d", Some("TextureBase"), Location::default())
            .unwrap();
        let cube = b
            .register_class("cinder::gl::TextureCubeMap", Some("cinder::gl::TextureBase"), Location::default())
            .unwrap();
        b.register_class("cinder::app::App", None, Location::default());
        b.register_function(Owner::Class(texture), "bind", "(uint8_t unit=0)", Location::default());
        b.register_function(Owner::Class(texture), "bind", "()", Location::default());
        b.register_typedef(
            Owner::Namespace(ns),
            "Texture2dRef",
            "std::shared_ptr< class Texture2d >",
            Location::default(),
        );
        (b.link(), base, texture, cube)
    }

    #[test]
    fn test_ancestors_and_descendants() {
        let (index, base, texture, cube) = sample();
        assert_eq!(index.class_ancestors(texture), vec![base]);
        assert!(index.class_ancestors(base).is_empty());
        assert_eq!(index.class_descendants(base), vec![texture, cube]);
    }

    #[test]
    fn test_classes_in_namespace() {
        let (index, ..) = sample();
        assert_eq!(index.classes_in_namespace("cinder::gl", false).len(), 3);
        assert_eq!(index.classes_in_namespace("cinder", false).len(), 0);
        assert_eq!(index.classes_in_namespace("cinder", true).len(), 4);
    }

    #[test]
    fn test_ordered_classes_case_insensitive() {
        let (index, ..) = sample();
        let names: Vec<&str> = index.ordered_classes().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["App", "Texture2d", "TextureBase", "TextureCubeMap"]);
    }

    #[test]
    fn test_class_tags_dedupe_functions() {
        let (index, _, texture, _) = sample();
        assert_eq!(index.class_tags(texture), vec!["Texture2d", "Texture2dRef", "bind"]);
    }

    #[test]
    fn test_namespace_listings() {
        let mut b = IndexBuilder::new(ResolverConfig::default());
        for name in ["std", "cinder::app", "cinder::Audio", "glm", "boost::x", "cinder::detail"] {
            b.register_namespace(name, Location::default());
        }
        let index = b.link();

        let ordered: Vec<&str> = index
            .ordered_namespaces()
            .iter()
            .map(|ns| ns.qualified_name.as_str())
            .collect();
        assert_eq!(ordered, vec!["boost::x", "cinder::app", "cinder::Audio", "glm", "std"]);

        let listed: Vec<&str> = index
            .whitelisted_namespaces()
            .iter()
            .map(|ns| ns.qualified_name.as_str())
            .collect();
        assert_eq!(listed, vec!["cinder::app", "cinder::Audio", "glm"]);
    }

    #[test]
    fn test_namespace_and_group_tags() {
        let mut b = IndexBuilder::new(ResolverConfig::default());
        let ns = b.register_namespace("cinder::gl", Location::default()).unwrap();
        b.register_function(Owner::Namespace(ns), "draw", "(const Texture2dRef &t)", Location::default());
        b.register_function(Owner::Namespace(ns), "draw", "(const VboMeshRef &m)", Location::default());
        b.register_function(Owner::Namespace(ns), "clear", "()", Location::default());
        let group = b.register_group("cinder::group__gl", Some("OpenGL"), Location::default(), Vec::new());
        b.register_function(Owner::Group(group), "enableDepth", "()", Location::default());
        b.register_function(Owner::Group(group), "enableDepth", "(bool enable)", Location::default());
        let index = b.link();

        assert_eq!(
            index.namespace_tags(ns),
            vec!["cinder::gl", "cinder", "gl", "draw", "clear"]
        );
        assert_eq!(index.group_tags(group), vec!["group__gl", "enableDepth"]);
    }

    #[test]
    fn test_stats() {
        let (index, ..) = sample();
        let stats = index.stats();
        assert_eq!(stats.classes, 4);
        assert_eq!(stats.functions, 2);
        assert_eq!(stats.typedefs, 1);
        assert_eq!(stats.namespaces, 1);
    }
}
