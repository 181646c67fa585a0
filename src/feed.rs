//! Declaration feed records.
//!
//! These are the plain data records the index is built from. Where they came
//! from (a doxygen tag file, a JSON dump, a test fixture) does not matter to
//! the engine; [`load_feed`] exists for the command-line binary, which reads
//! them from a JSON array.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::FeedError;
use crate::types::Location;

/// Kind of a top-level declaration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Class,
    Struct,
    Namespace,
    File,
    Group,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Namespace => "namespace",
            Self::File => "file",
            Self::Group => "group",
        }
    }
}

/// Kind of a member record nested in a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Function,
    Enum,
    Typedef,
    Variable,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Enum => "enum",
            Self::Typedef => "typedef",
            Self::Variable => "variable",
        }
    }
}

/// One declaration: a class, struct, namespace, file or group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationRecord {
    pub kind: RecordKind,

    /// Missing or empty names make the record malformed.
    #[serde(default)]
    pub qualified_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Group title; ignored for other kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub location: Location,

    #[serde(default)]
    pub members: Vec<MemberRecord>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subgroup_names: Vec<String>,
}

/// A member nested in a declaration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub kind: MemberKind,

    #[serde(default)]
    pub name: Option<String>,

    /// Argument list text for functions, e.g. `"(const Foo &foo, int x=0) const"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args_text: Option<String>,

    /// Aliased type text for typedefs, e.g. `"std::shared_ptr< class Texture >"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_text: Option<String>,

    #[serde(default)]
    pub location: Location,
}

impl DeclarationRecord {
    pub fn new(kind: RecordKind, qualified_name: impl Into<String>) -> Self {
        Self {
            kind,
            qualified_name: Some(qualified_name.into()),
            base: None,
            title: None,
            location: Location::default(),
            members: Vec::new(),
            subgroup_names: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Location::new(location);
        self
    }

    pub fn with_member(mut self, member: MemberRecord) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_subgroup(mut self, name: impl Into<String>) -> Self {
        self.subgroup_names.push(name.into());
        self
    }

    /// The qualified name, if present and non-blank.
    pub fn name(&self) -> Option<&str> {
        non_blank(self.qualified_name.as_deref())
    }
}

impl MemberRecord {
    pub fn new(kind: MemberKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            args_text: None,
            type_text: None,
            location: Location::default(),
        }
    }

    pub fn function(name: impl Into<String>, args_text: impl Into<String>) -> Self {
        Self::new(MemberKind::Function, name).with_args(args_text)
    }

    pub fn typedef(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        let mut member = Self::new(MemberKind::Typedef, name);
        member.type_text = Some(type_text.into());
        member
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(MemberKind::Enum, name)
    }

    pub fn with_args(mut self, args_text: impl Into<String>) -> Self {
        self.args_text = Some(args_text.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Location::new(location);
        self
    }

    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Read a feed from a JSON file holding an array of declaration records.
pub fn load_feed(path: impl AsRef<Path>) -> Result<Vec<DeclarationRecord>, FeedError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| FeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_feed(&content).map_err(|source| FeedError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a feed from JSON text.
pub fn parse_feed(content: &str) -> Result<Vec<DeclarationRecord>, serde_json::Error> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feed_camel_case_fields() {
        let json = r#"[
            {
                "kind": "class",
                "qualifiedName": "cinder::gl::Texture",
                "base": "cinder::gl::TextureBase",
                "location": "classcinder_1_1gl_1_1_texture.html",
                "members": [
                    {"kind": "function", "name": "bind", "argsText": "(uint8_t textureUnit=0) const", "location": "a#1"}
                ]
            },
            {"kind": "group", "qualifiedName": "group__core", "subgroupNames": ["group__core__func"]}
        ]"#;

        let records = parse_feed(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, RecordKind::Class);
        assert_eq!(records[0].name(), Some("cinder::gl::Texture"));
        assert_eq!(records[0].base.as_deref(), Some("cinder::gl::TextureBase"));
        assert_eq!(
            records[0].members[0].args_text.as_deref(),
            Some("(uint8_t textureUnit=0) const")
        );
        assert_eq!(records[1].subgroup_names, vec!["group__core__func"]);
    }

    #[test]
    fn test_blank_name_is_missing() {
        let record = DeclarationRecord {
            qualified_name: Some("   ".to_string()),
            ..DeclarationRecord::new(RecordKind::Namespace, "")
        };
        assert_eq!(record.name(), None);

        let member = MemberRecord {
            name: None,
            ..MemberRecord::enumeration("x")
        };
        assert_eq!(member.name(), None);
    }

    #[test]
    fn test_load_feed_reports_path_on_bad_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("feed.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_feed(&path).unwrap_err();
        assert!(err.to_string().contains("feed.json"));
    }
}
