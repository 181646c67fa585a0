//! Two-pass index construction.
//!
//! Pass 1 is the `register_*` calls (or [`IndexBuilder::ingest`] over a
//! declaration feed): every node is created and keyed, cross-references are
//! kept as names. Pass 2 is [`IndexBuilder::link`], which resolves group
//! subgroups, class bases and typedef aliases against the completed
//! registries and hands back the frozen [`SymbolIndex`].
//!
//! The builder is single-threaded and not reentrant; `link()` consumes it, so
//! the index cannot be queried before it is linked or mutated after.

use std::collections::HashSet;

use super::SymbolIndex;
use super::alias::AliasLinker;
use super::args::parse_arg_list;
use super::entities::{AliasTarget, Class, Enum, File, Function, Group, Namespace, Typedef};
use super::registry::Registry;
use crate::config::ResolverConfig;
use crate::error::BuildIssue;
use crate::feed::{DeclarationRecord, MemberKind, RecordKind};
use crate::types::{
    ClassId, EnumId, FileId, FunctionId, GroupId, Location, NamespaceId, TypedefId, join_scope,
    parent_scope,
};
use crate::{debug_event, log_event};

/// Scope a member is registered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// Free function or typedef with no enclosing declaration.
    Global,
    Namespace(NamespaceId),
    Class(ClassId),
    /// Members of groups are scoped under the configured group namespace.
    Group(GroupId),
    /// File members are attached to the file and not keyed by scope.
    File(FileId),
}

pub struct IndexBuilder {
    config: ResolverConfig,
    registry: Registry,
    issues: Vec<BuildIssue>,
}

impl IndexBuilder {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            registry: Registry::default(),
            issues: Vec::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Problems recorded so far.
    pub fn issues(&self) -> &[BuildIssue] {
        &self.issues
    }

    fn report(&mut self, issue: BuildIssue) {
        tracing::warn!("[builder] {issue}");
        self.issues.push(issue);
    }

    /// Register a namespace.
    ///
    /// Returns `None` for anonymous namespaces (names containing `@`) and
    /// blacklisted ones; their members should be skipped.
    pub fn register_namespace(&mut self, name: &str, location: Location) -> Option<NamespaceId> {
        if name.contains('@') {
            debug_event!("builder", "anonymous namespace skipped", "{name}");
            return None;
        }
        if self.config.is_namespace_blacklisted(name) {
            debug_event!("builder", "blacklisted namespace skipped", "{name}");
            return None;
        }
        if let Some(&existing) = self.registry.namespace_keys.get(name) {
            self.report(BuildIssue::DuplicateSymbol {
                kind: "namespace",
                name: name.to_string(),
            });
            return Some(existing);
        }

        let id = NamespaceId::from_index(self.registry.namespaces.len());
        self.registry.namespaces.push(Namespace {
            id,
            qualified_name: name.to_string(),
            location,
            functions: Vec::new(),
            typedefs: Vec::new(),
        });
        self.registry.namespace_keys.insert(name.to_string(), id);
        Some(id)
    }

    /// Register a class or struct. Returns `None` when blacklisted.
    pub fn register_class(
        &mut self,
        qualified_name: &str,
        base: Option<&str>,
        location: Location,
    ) -> Option<ClassId> {
        if self.config.is_class_blacklisted(qualified_name) {
            debug_event!("builder", "blacklisted class skipped", "{qualified_name}");
            return None;
        }
        if let Some(&existing) = self.registry.class_keys.get(qualified_name) {
            self.report(BuildIssue::DuplicateSymbol {
                kind: "class",
                name: qualified_name.to_string(),
            });
            return Some(existing);
        }

        let id = ClassId::from_index(self.registry.classes.len());
        self.registry.classes.push(Class {
            id,
            qualified_name: qualified_name.to_string(),
            base: base
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_string),
            base_id: None,
            location,
            functions: Vec::new(),
            typedefs: Vec::new(),
        });
        self.registry
            .class_keys
            .insert(qualified_name.to_string(), id);
        Some(id)
    }

    /// Scope string members of `owner` are keyed under.
    fn owner_scope(&self, owner: Owner) -> String {
        match owner {
            Owner::Global | Owner::File(_) => String::new(),
            Owner::Namespace(id) => self.registry.namespaces[id.index()].qualified_name.clone(),
            Owner::Class(id) => self.registry.class(id).qualified_name.clone(),
            Owner::Group(_) => self.config.group_namespace.clone(),
        }
    }

    /// Register a function under `owner`.
    ///
    /// `args_text` is the declared argument list; defaulted arguments are
    /// dropped when it is parsed.
    pub fn register_function(
        &mut self,
        owner: Owner,
        name: &str,
        args_text: &str,
        location: Location,
    ) -> FunctionId {
        let id = FunctionId::from_index(self.registry.functions.len());
        self.registry.functions.push(Function {
            id,
            name: name.to_string(),
            owner: self.owner_scope(owner),
            location,
            args: parse_arg_list(args_text),
        });

        match owner {
            Owner::Global => {}
            Owner::Namespace(ns) => self.registry.namespaces[ns.index()].functions.push(id),
            Owner::Class(class) => self.registry.classes[class.index()].functions.push(id),
            Owner::Group(group) => self.registry.groups[group.index()].functions.push(id),
            Owner::File(file) => self.registry.files[file.index()].functions.push(id),
        }

        self.registry
            .functions_by_name
            .entry(name.to_string())
            .or_insert(id);
        id
    }

    /// Register a typedef under `owner`.
    ///
    /// File-level typedefs are attached to their file only. Everything else is
    /// keyed by scope; a repeated key keeps the first typedef.
    pub fn register_typedef(
        &mut self,
        owner: Owner,
        name: &str,
        aliased: &str,
        location: Location,
    ) -> TypedefId {
        let key = join_scope(&self.owner_scope(owner), name);
        let keyed = !matches!(owner, Owner::File(_));

        if keyed {
            if let Some(&existing) = self.registry.typedef_keys.get(&key) {
                self.report(BuildIssue::DuplicateSymbol {
                    kind: "typedef",
                    name: key,
                });
                return existing;
            }
        }

        let id = TypedefId::from_index(self.registry.typedefs.len());
        self.registry.typedefs.push(Typedef {
            id,
            qualified_name: key.clone(),
            aliased: aliased.trim().to_string(),
            location,
            alias: AliasTarget::Pending,
        });

        match owner {
            Owner::Namespace(ns) => self.registry.namespaces[ns.index()].typedefs.push(id),
            Owner::File(file) => self.registry.files[file.index()].typedefs.push(id),
            Owner::Global | Owner::Class(_) | Owner::Group(_) => {}
        }
        if keyed {
            self.registry.typedef_keys.insert(key, id);
        }
        id
    }

    /// Register an enum keyed `scope::name`.
    pub fn register_enum(&mut self, owner: Owner, name: &str, location: Location) -> EnumId {
        let key = join_scope(&self.owner_scope(owner), name);
        if let Some(&existing) = self.registry.enum_keys.get(&key) {
            self.report(BuildIssue::DuplicateSymbol { kind: "enum", name: key });
            return existing;
        }

        let id = EnumId::from_index(self.registry.enums.len());
        self.registry.enums.push(Enum {
            qualified_name: key.clone(),
            location,
        });
        self.registry.enum_keys.insert(key, id);
        id
    }

    pub fn register_file(&mut self, name: &str, location: Location) -> FileId {
        if let Some(&existing) = self.registry.file_keys.get(name) {
            self.report(BuildIssue::DuplicateSymbol {
                kind: "file",
                name: name.to_string(),
            });
            return existing;
        }

        let id = FileId::from_index(self.registry.files.len());
        self.registry.files.push(File {
            name: name.to_string(),
            location,
            typedefs: Vec::new(),
            functions: Vec::new(),
        });
        self.registry.file_keys.insert(name.to_string(), id);
        id
    }

    /// Register a group. Subgroup names are resolved by `link()`, so they may
    /// name groups registered later.
    pub fn register_group(
        &mut self,
        name: &str,
        title: Option<&str>,
        location: Location,
        subgroup_names: Vec<String>,
    ) -> GroupId {
        if let Some(&existing) = self.registry.group_keys.get(name) {
            self.report(BuildIssue::DuplicateSymbol {
                kind: "group",
                name: name.to_string(),
            });
            self.registry.groups[existing.index()]
                .subgroup_names
                .extend(subgroup_names);
            return existing;
        }

        let id = GroupId::from_index(self.registry.groups.len());
        self.registry.groups.push(Group {
            id,
            name: name.to_string(),
            title: title.map(str::to_string),
            location,
            functions: Vec::new(),
            subgroup_names,
            subgroups: Vec::new(),
        });
        self.registry.group_keys.insert(name.to_string(), id);
        id
    }

    /// Register every record of a declaration feed, in order.
    ///
    /// Malformed records and members are reported and skipped.
    pub fn ingest<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = DeclarationRecord>,
    {
        for (position, record) in records.into_iter().enumerate() {
            self.ingest_record(position, &record);
        }
    }

    /// Register a single declaration record and its members.
    pub fn ingest_record(&mut self, position: usize, record: &DeclarationRecord) {
        let Some(name) = record.name() else {
            self.report(BuildIssue::MalformedRecord {
                position,
                kind: record.kind.as_str().to_string(),
                field: "qualifiedName",
            });
            return;
        };

        let location = record.location.clone();
        let owner = match record.kind {
            RecordKind::Class | RecordKind::Struct => {
                match self.register_class(name, record.base.as_deref(), location) {
                    Some(id) => Owner::Class(id),
                    None => return,
                }
            }
            RecordKind::Namespace => match self.register_namespace(name, location) {
                Some(id) => Owner::Namespace(id),
                None => return,
            },
            RecordKind::File => Owner::File(self.register_file(name, location)),
            RecordKind::Group => Owner::Group(self.register_group(
                name,
                record.title.as_deref(),
                location,
                record.subgroup_names.clone(),
            )),
        };

        for member in &record.members {
            let Some(member_name) = member.name() else {
                self.report(BuildIssue::MalformedRecord {
                    position,
                    kind: format!("{} member of {name}", member.kind.as_str()),
                    field: "name",
                });
                continue;
            };
            let location = member.location.clone();

            match member.kind {
                MemberKind::Function => {
                    let args = member.args_text.as_deref().unwrap_or("");
                    self.register_function(owner, member_name, args, location);
                }
                MemberKind::Typedef => {
                    let aliased = member.type_text.as_deref().unwrap_or("");
                    self.register_typedef(owner, member_name, aliased, location);
                }
                MemberKind::Enum => {
                    self.register_enum(owner, member_name, location);
                }
                MemberKind::Variable => {}
            }
        }
    }

    /// Pass 2: resolve named cross-references and freeze the index.
    pub fn link(mut self) -> SymbolIndex {
        self.link_groups();
        self.link_bases();
        self.link_typedefs();

        log_event!(
            "builder",
            "linked",
            "{} namespaces, {} classes, {} typedefs, {} functions, {} enums, {} files, {} groups, {} issues",
            self.registry.namespaces.len(),
            self.registry.classes.len(),
            self.registry.typedefs.len(),
            self.registry.functions.len(),
            self.registry.enums.len(),
            self.registry.files.len(),
            self.registry.groups.len(),
            self.issues.len()
        );

        SymbolIndex::from_parts(self.config, self.registry, self.issues)
    }

    fn link_groups(&mut self) {
        let mut unknown = Vec::new();
        for index in 0..self.registry.groups.len() {
            let names = self.registry.groups[index].subgroup_names.clone();
            let mut subgroups = Vec::with_capacity(names.len());
            for subgroup in names {
                match self.registry.group_keys.get(&subgroup) {
                    Some(&id) => subgroups.push(id),
                    None => unknown.push(BuildIssue::UnknownSubgroup {
                        group: self.registry.groups[index].name.clone(),
                        subgroup,
                    }),
                }
            }
            self.registry.groups[index].subgroups = subgroups;
        }
        for issue in unknown {
            self.report(issue);
        }
    }

    /// Resolve base names to handles, then cut any link that closes a cycle.
    fn link_bases(&mut self) {
        for index in 0..self.registry.classes.len() {
            let class = &self.registry.classes[index];
            let Some(base) = class.base.as_deref() else {
                continue;
            };
            let sibling = join_scope(parent_scope(&class.qualified_name), base);
            let base_id = self
                .registry
                .class_key(&sibling, &self.config)
                .or_else(|| self.registry.class_key(base, &self.config));
            self.registry.classes[index].base_id = base_id;
        }

        for index in 0..self.registry.classes.len() {
            let start = ClassId::from_index(index);
            let mut visited = HashSet::from([start]);
            let mut current = start;
            while let Some(base) = self.registry.class(current).base_id {
                if !visited.insert(base) {
                    let class = &mut self.registry.classes[current.index()];
                    class.base_id = None;
                    let issue = BuildIssue::BaseCycle {
                        name: class.qualified_name.clone(),
                        base: class.base.clone().unwrap_or_default(),
                    };
                    self.report(issue);
                    break;
                }
                current = base;
            }
        }
    }

    fn link_typedefs(&mut self) {
        let targets = AliasLinker::new(&self.registry, &self.config).link_all();

        let mut cyclic = Vec::new();
        for (index, target) in targets.into_iter().enumerate() {
            let typedef = &mut self.registry.typedefs[index];
            typedef.alias = target;
            match target {
                AliasTarget::Class(class) => {
                    let id = typedef.id;
                    self.registry.classes[class.index()].typedefs.push(id);
                }
                AliasTarget::Cyclic => cyclic.push(typedef.qualified_name.clone()),
                AliasTarget::Opaque | AliasTarget::Pending => {}
            }
        }
        for name in cyclic {
            self.report(BuildIssue::AliasCycle { name });
        }
    }
}
