//! Class entity model: one parsed class-like declaration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A class, struct or similar declaration extracted from a source file.
///
/// Entities are immutable once produced by an extractor. [`ClassEntity::full_name`]
/// is the identity key used during hierarchy resolution, but it is not
/// guaranteed to be unique across a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntity {
    pub name: String,
    /// Enclosing namespace/package, absent for languages without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_class: Option<String>,
    /// Additional base or interface names, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_sealed: bool,
    #[serde(default)]
    pub is_static: bool,
    pub method_count: usize,
    pub line_count: usize,
    pub file_path: PathBuf,
    /// Name of the lexically enclosing class, if this declaration is nested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_class_name: Option<String>,
}

/// Display category of an entity, resolved by priority
/// abstract > sealed > static > normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierClass {
    Normal,
    Abstract,
    Sealed,
    Static,
}

impl ClassEntity {
    /// Create an entity with only a name and file; everything else empty.
    pub fn new(name: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            base_class: None,
            interfaces: Vec::new(),
            is_abstract: false,
            is_sealed: false,
            is_static: false,
            method_count: 0,
            line_count: 0,
            file_path: file_path.into(),
            parent_class_name: None,
        }
    }

    /// `namespace.name`, or just `name` without a namespace.
    pub fn full_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }

    pub fn is_nested(&self) -> bool {
        self.parent_class_name.is_some()
    }

    /// The declared base class, treating an empty string as absent.
    pub fn declared_base(&self) -> Option<&str> {
        self.base_class.as_deref().filter(|b| !b.is_empty())
    }

    pub fn modifier(&self) -> ModifierClass {
        if self.is_abstract {
            ModifierClass::Abstract
        } else if self.is_sealed {
            ModifierClass::Sealed
        } else if self.is_static {
            ModifierClass::Static
        } else {
            ModifierClass::Normal
        }
    }

    /// Short badge labels for every modifier flag that is set.
    pub fn badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::new();
        if self.is_abstract {
            badges.push("abstract");
        }
        if self.is_sealed {
            badges.push("sealed");
        }
        if self.is_static {
            badges.push("static");
        }
        if self.is_nested() {
            badges.push("nested");
        }
        badges
    }
}

impl ModifierClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Abstract => "abstract",
            Self::Sealed => "sealed",
            Self::Static => "static",
        }
    }
}

impl fmt::Display for ModifierClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
