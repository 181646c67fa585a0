//! Reference dispatch: the entry point the content layer calls for each
//! cross-reference it finds.

use std::fmt;
use std::str::FromStr;

use super::{Resolution, Resolver};
use crate::debug_event;
use crate::error::UnknownRefKind;
use crate::index::args::trailing_args;

/// Kind hint attached to a reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RefKind {
    Function,
    Enum,
    /// No hint: try class, namespace, function and enum in turn.
    #[default]
    Any,
}

impl FromStr for RefKind {
    type Err = UnknownRefKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "function" | "fn" => Ok(Self::Function),
            "enum" => Ok(Self::Enum),
            "" | "any" => Ok(Self::Any),
            other => Err(UnknownRefKind(other.to_string())),
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Function => "function",
            Self::Enum => "enum",
            Self::Any => "any",
        })
    }
}

impl Resolver<'_> {
    /// Resolve a reference as written in documentation content.
    ///
    /// `override_text`, when present and non-blank, replaces `reference` as
    /// the text to look up (the visible label and the lookup key can differ).
    /// Function references are recognised by the hint or by a `(` in the text;
    /// a function reference without argument text is matched as `()`.
    pub fn resolve(&self, reference: &str, kind: RefKind, override_text: Option<&str>) -> Resolution {
        let text = override_text
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| reference.trim());

        let resolution = if kind == RefKind::Function || text.contains('(') {
            let args = trailing_args(text).unwrap_or("()");
            self.find_function(text, Some(args))
        } else if kind == RefKind::Enum {
            self.find_enum(text)
        } else {
            Some(self.find_class(text))
                .filter(Resolution::is_found)
                .or_else(|| Some(self.find_namespace(text)).filter(Resolution::is_found))
                .or_else(|| Some(self.find_function(text, None)).filter(Resolution::is_found))
                .unwrap_or_else(|| self.find_enum(text))
        };

        if !resolution.is_found() {
            debug_event!("resolver", "unresolved", "{text} ({kind})");
        }
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::index::{IndexBuilder, Owner};
    use crate::types::Location;

    #[test]
    fn test_ref_kind_parsing() {
        assert_eq!("function".parse::<RefKind>(), Ok(RefKind::Function));
        assert_eq!("Enum".parse::<RefKind>(), Ok(RefKind::Enum));
        assert_eq!("".parse::<RefKind>(), Ok(RefKind::Any));
        assert!("macro".parse::<RefKind>().is_err());
    }

    #[test]
    fn test_dispatch_order() {
        let mut b = IndexBuilder::new(ResolverConfig::default());
        let ns = b.register_namespace("cinder", Location::default()).unwrap();
        let area = b.register_class("cinder::Area", None, Location::default()).unwrap();
        let app = b.register_namespace("cinder::app", Location::default()).unwrap();
        let clamp = b.register_function(Owner::Namespace(ns), "clamp", "(T v)", Location::default());
        let mode = b.register_enum(Owner::Namespace(ns), "ColorModel", Location::default());
        let index = b.link();
        let resolver = Resolver::new(&index);

        assert_eq!(resolver.resolve("Area", RefKind::Any, None), Resolution::Class(area));
        assert_eq!(resolver.resolve("app", RefKind::Any, None), Resolution::Namespace(app));
        assert_eq!(resolver.resolve("clamp", RefKind::Any, None), Resolution::Function(clamp));
        assert_eq!(resolver.resolve("ColorModel", RefKind::Any, None), Resolution::Enum(mode));
        assert_eq!(resolver.resolve("ColorModel", RefKind::Enum, None), Resolution::Enum(mode));
        assert_eq!(resolver.resolve("Nowhere", RefKind::Any, None), Resolution::Unresolved);
    }

    #[test]
    fn test_class_wins_over_same_named_function() {
        let mut b = IndexBuilder::new(ResolverConfig::default());
        let ns = b.register_namespace("cinder", Location::default()).unwrap();
        let timer = b.register_class("cinder::Timer", None, Location::default()).unwrap();
        b.register_function(Owner::Namespace(ns), "Timer", "(bool startOnConstruction)", Location::default());
        let index = b.link();
        let resolver = Resolver::new(&index);

        assert_eq!(resolver.resolve("Timer", RefKind::Any, None), Resolution::Class(timer));
        assert_eq!(resolver.resolve("ci::Timer", RefKind::Any, None), Resolution::Class(timer));
    }

    #[test]
    fn test_override_text_replaces_label() {
        let mut b = IndexBuilder::new(ResolverConfig::default());
        let area = b.register_class("cinder::Area", None, Location::default()).unwrap();
        let index = b.link();
        let resolver = Resolver::new(&index);

        assert_eq!(
            resolver.resolve("the area class", RefKind::Any, Some("ci::Area")),
            Resolution::Class(area)
        );
        assert_eq!(
            resolver.resolve("ci::Area", RefKind::Any, Some("  ")),
            Resolution::Class(area)
        );
    }

    #[test]
    fn test_parenthesis_forces_function_lookup() {
        let mut b = IndexBuilder::new(ResolverConfig::default());
        let ns = b.register_namespace("cinder", Location::default()).unwrap();
        b.register_class("cinder::Area", None, Location::default());
        let area_fn = b.register_function(Owner::Namespace(ns), "Area", "()", Location::default());
        let index = b.link();
        let resolver = Resolver::new(&index);

        assert_eq!(resolver.resolve("Area()", RefKind::Any, None), Resolution::Function(area_fn));
        assert_eq!(resolver.resolve("Area", RefKind::Function, None), Resolution::Function(area_fn));
    }
}
