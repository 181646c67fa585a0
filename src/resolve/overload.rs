//! Function lookup and overload disambiguation.
//!
//! Candidates are gathered from the most specific place that has any:
//! 1. the owner named by the reference prefix (a class, then its ancestors,
//!    or a namespace)
//! 2. without a resolvable owner: the default owner namespace, then the
//!    secondary default owner namespace
//! 3. every group's functions
//! 4. the first function registered under the bare name anywhere
//!
//! Several candidates are ranked with [`score_overload`]; ties go to the
//! candidate registered first, so output is reproducible run to run.

use super::{Resolution, Resolver};
use crate::debug_event;
use crate::index::args::{parse_arg_list, trailing_args};
use crate::types::{ClassId, FunctionId, NamespaceId, SCOPE_SEPARATOR, parent_scope, strip_scope};

/// Added when a candidate's required-argument count equals the query's.
pub const ARITY_BONUS: f64 = 0.5;

/// Scale applied to each positional argument similarity (0..=1).
pub const ARGUMENT_WEIGHT: f64 = 2.0;

/// Score how well a candidate's required arguments match the query arguments.
///
/// Arity agreement is worth [`ARITY_BONUS`]; each positional pair up to the
/// shorter list adds its normalized Levenshtein similarity times
/// [`ARGUMENT_WEIGHT`].
pub fn score_overload(candidate_args: &[String], query_args: &[String]) -> f64 {
    let mut score = 0.0;
    if candidate_args.len() == query_args.len() {
        score += ARITY_BONUS;
    }
    for (declared, given) in candidate_args.iter().zip(query_args) {
        score += strsim::normalized_levenshtein(declared, given) * ARGUMENT_WEIGHT;
    }
    score
}

#[derive(Debug, Clone, Copy)]
enum FunctionOwner {
    Class(ClassId),
    Namespace(NamespaceId),
}

impl Resolver<'_> {
    /// Resolve a function reference.
    ///
    /// `name` may be qualified with `::` or `.` and may carry its own
    /// parenthesised argument text; `args` overrides that text when given.
    pub fn find_function(&self, name: &str, args: Option<&str>) -> Resolution {
        let head = name.split('(').next().unwrap_or(name).trim();
        let qualified = head.replace('.', SCOPE_SEPARATOR);
        let bare = strip_scope(&qualified);
        if bare.is_empty() {
            return Resolution::Unresolved;
        }

        let query_args = parse_arg_list(args.or_else(|| trailing_args(name)).unwrap_or(""));
        let candidates = self.function_candidates(parent_scope(&qualified), bare);

        match self.select_overload(&candidates, &query_args) {
            Some(id) => Resolution::Function(id),
            None => {
                debug_event!("resolver", "no function candidates", "{name}");
                Resolution::Unresolved
            }
        }
    }

    fn resolve_owner(&self, prefix: &str) -> Option<FunctionOwner> {
        if prefix.is_empty() {
            return None;
        }
        if let Resolution::Class(id) = self.find_class(prefix) {
            return Some(FunctionOwner::Class(id));
        }
        match self.find_namespace(prefix) {
            Resolution::Namespace(id) => Some(FunctionOwner::Namespace(id)),
            _ => None,
        }
    }

    fn named_in(&self, functions: &[FunctionId], bare: &str) -> Vec<FunctionId> {
        functions
            .iter()
            .copied()
            .filter(|&id| self.index.function(id).name == bare)
            .collect()
    }

    fn named_in_namespace(&self, namespace: &str, bare: &str) -> Vec<FunctionId> {
        match self.find_namespace(namespace) {
            Resolution::Namespace(id) => self.named_in(&self.index.namespace(id).functions, bare),
            _ => Vec::new(),
        }
    }

    fn function_candidates(&self, prefix: &str, bare: &str) -> Vec<FunctionId> {
        let config = self.index.config();

        let mut candidates = match self.resolve_owner(prefix) {
            Some(FunctionOwner::Class(class)) => {
                let mut found = self.named_in(&self.index.class(class).functions, bare);
                // Nearest ancestor first.
                for ancestor in self.index.class_ancestors(class).into_iter().rev() {
                    if !found.is_empty() {
                        break;
                    }
                    found = self.named_in(&self.index.class(ancestor).functions, bare);
                }
                found
            }
            Some(FunctionOwner::Namespace(ns)) => {
                self.named_in(&self.index.namespace(ns).functions, bare)
            }
            None => {
                if !prefix.is_empty() {
                    tracing::trace!("[resolver] owner {prefix} unknown, using default owners");
                }
                let mut found = self.named_in_namespace(&config.default_owner_namespace, bare);
                if found.is_empty() {
                    found = self.named_in_namespace(&config.secondary_default_owner_namespace, bare);
                }
                found
            }
        };

        if candidates.is_empty() {
            candidates = self
                .index
                .groups()
                .flat_map(|group| self.named_in(&group.functions, bare))
                .collect();
        }

        if candidates.is_empty() {
            candidates.extend(self.index.function_by_bare_name(bare));
        }

        candidates
    }

    /// Best candidate for the query arguments; first registered wins ties.
    fn select_overload(&self, candidates: &[FunctionId], query_args: &[String]) -> Option<FunctionId> {
        match candidates {
            [] => None,
            [only] => Some(*only),
            _ => {
                let mut best = candidates[0];
                let mut best_score = f64::NEG_INFINITY;
                for &id in candidates {
                    let score = score_overload(&self.index.function(id).args, query_args);
                    tracing::trace!(
                        "[resolver] overload {} scored {score:.3}",
                        self.index.function(id).qualified_name()
                    );
                    if score > best_score {
                        best = id;
                        best_score = score;
                    }
                }
                Some(best)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::index::{IndexBuilder, Owner};
    use crate::types::Location;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_score_prefers_matching_arity() {
        let one = args(&["int"]);
        let two = args(&["int", "int"]);
        let query = args(&["1", "2"]);
        assert!(score_overload(&two, &query) > score_overload(&one, &query));
    }

    #[test]
    fn test_score_prefers_similar_types() {
        let query = args(&["const Rectf &rect"]);
        let rect = args(&["const Rectf &dstRect"]);
        let area = args(&["const Area &area"]);
        assert!(score_overload(&rect, &query) > score_overload(&area, &query));
    }

    #[test]
    fn test_overload_selection_by_arity() {
        let mut b = IndexBuilder::new(ResolverConfig::default());
        let ns = b.register_namespace("cinder", Location::default()).unwrap();
        let one = b.register_function(Owner::Namespace(ns), "foo", "(int)", Location::default());
        let two = b.register_function(Owner::Namespace(ns), "foo", "(int, int)", Location::default());
        let index = b.link();
        let resolver = Resolver::new(&index);

        assert_eq!(resolver.find_function("foo", Some("(1,2)")), Resolution::Function(two));
        assert_eq!(resolver.find_function("foo", Some("(1)")), Resolution::Function(one));
        assert_eq!(resolver.find_function("foo(1, 2)", None), Resolution::Function(two));
    }

    #[test]
    fn test_ties_go_to_first_registered() {
        let mut b = IndexBuilder::new(ResolverConfig::default());
        let ns = b.register_namespace("cinder", Location::default()).unwrap();
        let first = b.register_function(Owner::Namespace(ns), "clear", "(int)", Location::default());
        b.register_function(Owner::Namespace(ns), "clear", "(int)", Location::default());
        let index = b.link();

        let resolver = Resolver::new(&index);
        assert_eq!(resolver.find_function("clear", Some("(x)")), Resolution::Function(first));
    }

    #[test]
    fn test_class_owner_and_inherited_member() {
        let mut b = IndexBuilder::new(ResolverConfig::default());
        let base = b
            .register_class("cinder::app::AppBase", None, Location::default())
            .unwrap();
        let app = b
            .register_class("cinder::app::App", Some("AppBase"), Location::default())
            .unwrap();
        let quit = b.register_function(Owner::Class(base), "quit", "()", Location::default());
        let draw = b.register_function(Owner::Class(app), "draw", "()", Location::default());
        let index = b.link();

        let resolver = Resolver::new(&index);
        assert_eq!(resolver.find_function("app::App::draw", None), Resolution::Function(draw));
        assert_eq!(resolver.find_function("App::quit()", None), Resolution::Function(quit));
        assert_eq!(resolver.find_function("App.quit", None), Resolution::Function(quit));
    }

    #[test]
    fn test_group_then_flat_fallbacks() {
        let mut b = IndexBuilder::new(ResolverConfig::default());
        let group = b.register_group("group__core__func", None, Location::default(), Vec::new());
        let dot = b.register_function(Owner::Group(group), "dot", "(genType x, genType y)", Location::default());
        let file = b.register_file("Utilities.h", Location::default());
        let to_string = b.register_function(Owner::File(file), "toString", "(const T &t)", Location::default());
        let index = b.link();

        let resolver = Resolver::new(&index);
        assert_eq!(resolver.find_function("dot", None), Resolution::Function(dot));
        assert_eq!(index.function(dot).qualified_name(), "glm::dot");
        assert_eq!(resolver.find_function("toString", None), Resolution::Function(to_string));
        assert_eq!(resolver.find_function("nothing", None), Resolution::Unresolved);
        assert_eq!(resolver.find_function("(int)", None), Resolution::Unresolved);
    }
}
