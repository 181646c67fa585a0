//! Typedef alias detection.
//!
//! During `link()` every typedef's aliased-type text is inspected for the
//! class it stands for. Candidate names are tried in this order, first hit
//! wins:
//!
//! 1. a literal `class Name` / `struct Name` prefix,
//! 2. a `shared_ptr< Name >` handle (tried under the typedef's own scope first),
//! 3. the first alphanumeric run of the text (`SurfaceT< uint8_t >` -> `SurfaceT`).
//!
//! Candidates 1 and 2 name a class tag and are only looked up as classes,
//! apart from a `shared_ptr< Name >` whose `Name` is another typedef. A
//! first-word candidate that names another typedef is chased through that
//! typedef's own alias. Chains are followed with a visited set, so a typedef that loops
//! back to itself ends up [`AliasTarget::Cyclic`] instead of recursing forever.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::entities::AliasTarget;
use super::registry::Registry;
use crate::config::ResolverConfig;
use crate::types::{TypedefId, join_scope, parent_scope};

static SHARED_HANDLE: OnceLock<Option<Regex>> = OnceLock::new();
static FIRST_WORD: OnceLock<Option<Regex>> = OnceLock::new();

fn shared_handle_pattern() -> Option<&'static Regex> {
    SHARED_HANDLE
        .get_or_init(|| {
            Regex::new(r"shared_ptr\s*<\s*(?:const\s+)?(?:(?:class|struct)\s+)?([A-Za-z_][\w:]*)\s*>")
                .ok()
        })
        .as_ref()
}

fn first_word_pattern() -> Option<&'static Regex> {
    FIRST_WORD
        .get_or_init(|| Regex::new(r"[A-Za-z0-9_]+").ok())
        .as_ref()
}

/// Where an alias candidate was found in the aliased-type text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CandidateSource {
    /// `class Name` / `struct Name`: a class tag, never a typedef.
    Elaborated,
    /// `shared_ptr< Name >`: a class, or another typedef of one.
    SharedHandle,
    /// First alphanumeric run: anything, including a typedef chain.
    FirstWord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AliasCandidate {
    pub name: String,
    pub source: CandidateSource,
}

impl AliasCandidate {
    fn new(name: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// Candidate class names for a typedef, in the order they should be tried.
pub(crate) fn alias_candidates(scope: &str, aliased: &str) -> Vec<AliasCandidate> {
    let mut candidates = Vec::new();
    let text = aliased.trim();

    let declared = text
        .strip_prefix("class ")
        .or_else(|| text.strip_prefix("struct "));
    if let Some(rest) = declared {
        if let Some(name) = rest.split_whitespace().next() {
            candidates.push(AliasCandidate::new(name, CandidateSource::Elaborated));
        }
    }

    if let Some(captures) = shared_handle_pattern().and_then(|re| re.captures(text)) {
        let name = &captures[1];
        if !scope.is_empty() {
            candidates.push(AliasCandidate::new(
                join_scope(scope, name),
                CandidateSource::SharedHandle,
            ));
        }
        candidates.push(AliasCandidate::new(name, CandidateSource::SharedHandle));
    }

    if let Some(word) = first_word_pattern().and_then(|re| re.find(text)) {
        candidates.push(AliasCandidate::new(word.as_str(), CandidateSource::FirstWord));
    }

    candidates.dedup_by(|later, earlier| later.name == earlier.name);
    candidates
}

/// Resolves every typedef's [`AliasTarget`] over a fully populated registry.
pub(crate) struct AliasLinker<'a> {
    registry: &'a Registry,
    config: &'a ResolverConfig,
    targets: Vec<AliasTarget>,
}

impl<'a> AliasLinker<'a> {
    pub fn new(registry: &'a Registry, config: &'a ResolverConfig) -> Self {
        Self {
            registry,
            config,
            targets: vec![AliasTarget::Pending; registry.typedefs.len()],
        }
    }

    /// Alias target for each typedef, indexed by registry slot.
    pub fn link_all(mut self) -> Vec<AliasTarget> {
        for index in 0..self.targets.len() {
            let mut visiting = HashSet::new();
            self.chase(TypedefId::from_index(index), &mut visiting);
        }
        self.targets
    }

    fn chase(&mut self, id: TypedefId, visiting: &mut HashSet<TypedefId>) -> AliasTarget {
        let known = self.targets[id.index()];
        if known != AliasTarget::Pending {
            return known;
        }
        if !visiting.insert(id) {
            return AliasTarget::Cyclic;
        }

        let typedef = self.registry.typedef(id);
        let scope = parent_scope(&typedef.qualified_name);
        let mut hit_cycle = false;
        let mut target = AliasTarget::Opaque;

        for candidate in alias_candidates(scope, &typedef.aliased) {
            if let Some(class) = self.registry.class_key(&candidate.name, self.config) {
                target = AliasTarget::Class(class);
                break;
            }
            if candidate.source == CandidateSource::Elaborated {
                continue;
            }
            let next = self.registry.typedef_key(&candidate.name, self.config);
            // `typedef shared_ptr<Foo> Foo` names the class tag, not itself
            if candidate.source == CandidateSource::SharedHandle && next == Some(id) {
                continue;
            }
            if let Some(next) = next {
                match self.chase(next, visiting) {
                    AliasTarget::Class(class) => {
                        target = AliasTarget::Class(class);
                        break;
                    }
                    AliasTarget::Cyclic => hit_cycle = true,
                    AliasTarget::Opaque | AliasTarget::Pending => {}
                }
            }
        }

        if hit_cycle && target == AliasTarget::Opaque {
            target = AliasTarget::Cyclic;
        }

        visiting.remove(&id);
        // A typedef seen mid-cycle is only settled by the outermost walk that
        // started it; inner results stay pending so they get their own walk.
        if target != AliasTarget::Cyclic || visiting.is_empty() {
            self.targets[id.index()] = target;
        }
        target
    }
}
