//! Related links attached to classes after the index is frozen.
//!
//! The rendering layer discovers "see also" links while it walks content and
//! records them here. Resolution never reads this log, so it lives beside the
//! index rather than inside it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::ClassId;

/// One related link shown on a class page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    pub link: String,
    pub label: String,
    #[serde(default)]
    pub active: bool,
}

impl LinkData {
    pub fn new(link: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            label: label.into(),
            active: false,
        }
    }
}

/// Append-only related-links log keyed by class.
#[derive(Debug, Clone, Default)]
pub struct RelatedLinks {
    by_class: IndexMap<ClassId, Vec<LinkData>>,
}

impl RelatedLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a link for `class`. Returns `false` if that link target was
    /// already recorded for the class.
    pub fn add(&mut self, class: ClassId, data: LinkData) -> bool {
        let links = self.by_class.entry(class).or_default();
        if links.iter().any(|existing| existing.link == data.link) {
            return false;
        }
        links.push(data);
        true
    }

    /// Links recorded for `class`, in insertion order.
    pub fn for_class(&self, class: ClassId) -> &[LinkData] {
        self.by_class
            .get(&class)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_class.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_deduplicates_by_target() {
        let class = ClassId::new(1).unwrap();
        let mut links = RelatedLinks::new();

        assert!(links.add(class, LinkData::new("guide/opengl.html", "OpenGL guide")));
        assert!(!links.add(class, LinkData::new("guide/opengl.html", "Same page, other label")));
        assert!(links.add(class, LinkData::new("samples/Texture.html", "Sample")));

        let labels: Vec<&str> = links.for_class(class).iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["OpenGL guide", "Sample"]);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_unknown_class_has_no_links() {
        let links = RelatedLinks::new();
        assert!(links.for_class(ClassId::new(7).unwrap()).is_empty());
        assert!(links.is_empty());
    }
}
