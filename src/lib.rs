//! Cross-reference resolution for generated API documentation.
//!
//! A [`IndexBuilder`] ingests declaration records (namespaces, classes,
//! typedefs, functions, enums, files and groups) and freezes them into a
//! [`SymbolIndex`]. A [`Resolver`] then turns the loosely written references
//! found in documentation prose (`ci::gl::TextureRef`, `App::quit()`,
//! `foo(1, 2)`) into canonical entities, or reports them unresolved.

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod index;
pub mod io;
pub mod links;
pub mod logging;
pub mod resolve;
pub mod types;

pub use config::{ResolverConfig, Settings};
pub use error::{BuildIssue, FeedError, UnknownRefKind};
pub use feed::{DeclarationRecord, MemberKind, MemberRecord, RecordKind, load_feed, parse_feed};
pub use index::{AliasTarget, IndexBuilder, IndexStats, Owner, SymbolIndex};
pub use links::{LinkData, RelatedLinks};
pub use resolve::{RefKind, Resolution, ResolveResult, Resolver};
pub use types::{
    ClassId, EntityKind, EnumId, FileId, FunctionId, GroupId, Location, NamespaceId, TypedefId,
};
