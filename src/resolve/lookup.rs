//! Class, namespace, typedef and enum lookup.
//!
//! Class lookup order:
//! 1. key lookup (short alias, exact, primary namespace, final-segment scan)
//! 2. the name as a typedef: its aliased class, or the typedef itself when it
//!    aliases nothing registered
//! 3. for `Alias::Inner`, the parent segment as a typedef handle, retried once
//!    as `AliasedClass::Inner`
//!
//! Step 3 is bounded to a single retry so alias chains cannot recurse.

use super::{Resolution, Resolver};
use crate::debug_event;
use crate::index::AliasTarget;
use crate::types::{SCOPE_SEPARATOR, join_scope};

/// How many times a nested `Alias::Inner` reference may be rewritten.
const NESTED_ALIAS_RETRIES: usize = 1;

impl Resolver<'_> {
    /// Resolve a class reference.
    ///
    /// Returns `Resolution::Class`, a degraded `Resolution::Typedef` when the
    /// name is a typedef of something that is not a registered class, or
    /// `Resolution::Unresolved`.
    pub fn find_class(&self, name: &str) -> Resolution {
        self.find_class_within(name.trim(), NESTED_ALIAS_RETRIES)
    }

    fn find_class_within(&self, name: &str, retries: usize) -> Resolution {
        let registry = self.index.registry();
        let config = self.index.config();

        if let Some(id) = registry.class_key(name, config) {
            return Resolution::Class(id);
        }

        if let Some(typedef_id) = registry.typedef_key(name, config) {
            match registry.typedef(typedef_id).alias {
                AliasTarget::Class(class) => {
                    tracing::trace!("[resolver] {name} is a handle to class {}", class.value());
                    return Resolution::Class(class);
                }
                AliasTarget::Opaque | AliasTarget::Pending => {
                    return Resolution::Typedef(typedef_id);
                }
                AliasTarget::Cyclic => {
                    debug_event!("resolver", "cyclic typedef ignored", "{name}");
                }
            }
        }

        if retries > 0 {
            let normalized = config.normalize(name);
            let segments: Vec<&str> = normalized.split(SCOPE_SEPARATOR).collect();
            if let [.., parent, inner] = segments.as_slice() {
                if let Some(class) = registry
                    .typedef_key(parent, config)
                    .and_then(|id| registry.typedef(id).shared_from())
                {
                    let rewritten = join_scope(&registry.class(class).qualified_name, inner);
                    tracing::trace!("[resolver] retrying {name} as {rewritten}");
                    return self.find_class_within(&rewritten, retries - 1);
                }
            }
        }

        Resolution::Unresolved
    }

    /// Resolve a namespace reference.
    pub fn find_namespace(&self, name: &str) -> Resolution {
        self.index
            .registry()
            .namespace_key(name.trim(), self.index.config())
            .map_or(Resolution::Unresolved, Resolution::Namespace)
    }

    /// Resolve a typedef reference by key, without alias indirection.
    pub fn find_typedef(&self, name: &str) -> Resolution {
        self.index
            .registry()
            .typedef_key(name.trim(), self.index.config())
            .map_or(Resolution::Unresolved, Resolution::Typedef)
    }

    /// Resolve an enum reference.
    pub fn find_enum(&self, name: &str) -> Resolution {
        self.index
            .registry()
            .enum_key(name.trim(), self.index.config())
            .map_or(Resolution::Unresolved, Resolution::Enum)
    }

    /// Resolve a group by its exact name.
    pub fn find_group(&self, name: &str) -> Resolution {
        self.index
            .registry()
            .group_keys
            .get(name.trim())
            .map_or(Resolution::Unresolved, |&id| Resolution::Group(id))
    }

    /// Resolve a file by its exact name.
    pub fn find_file(&self, name: &str) -> Resolution {
        self.index
            .registry()
            .file_keys
            .get(name.trim())
            .map_or(Resolution::Unresolved, |&id| Resolution::File(id))
    }
}
