use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! seq_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl $name {
            pub fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

seq_newtype!(RequestSeq);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Element,
    Compound,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Element => "Element",
            ItemKind::Compound => "Compound",
        }
    }
}

/// An element or compound that can sit in the tumbler.
///
/// Identity is the `formula`, compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableItem {
    pub formula: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(rename = "color", default, skip_serializing_if = "Option::is_none")]
    pub color_hint: Option<String>,
}

impl SelectableItem {
    pub fn new(formula: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            formula: formula.into(),
            name: name.into(),
            kind,
            color_hint: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.color_hint = (!color.trim().is_empty()).then_some(color);
        self
    }
}

/// Entry of the local element/compound catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogEntry {
    Element {
        symbol: String,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Compound {
        formula: String,
        name: String,
    },
}

impl CatalogEntry {
    /// Formula for compounds, symbol for elements.
    pub fn identity(&self) -> &str {
        match self {
            CatalogEntry::Element { symbol, .. } => symbol,
            CatalogEntry::Compound { formula, .. } => formula,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CatalogEntry::Element { name, .. } | CatalogEntry::Compound { name, .. } => name,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            CatalogEntry::Element { .. } => ItemKind::Element,
            CatalogEntry::Compound { .. } => ItemKind::Compound,
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        self.identity() == key || self.name() == key
    }

    pub fn to_selectable(&self) -> SelectableItem {
        let item = SelectableItem::new(self.identity(), self.name(), self.kind());
        match self {
            CatalogEntry::Element {
                color: Some(color), ..
            } => item.with_color(color.clone()),
            _ => item,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub formula: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Reaction category returned by the reaction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnimationTag {
    Neutralization,
    Precipitate,
    /// Covers both `synthesis` and `combination`.
    Synthesis,
    Rusting,
    Other(String),
}

impl AnimationTag {
    pub fn as_str(&self) -> &str {
        match self {
            AnimationTag::Neutralization => "neutralization",
            AnimationTag::Precipitate => "precipitate",
            AnimationTag::Synthesis => "synthesis",
            AnimationTag::Rusting => "rusting",
            AnimationTag::Other(raw) => raw,
        }
    }
}

impl From<String> for AnimationTag {
    fn from(value: String) -> Self {
        match value.as_str() {
            "neutralization" => AnimationTag::Neutralization,
            "precipitate" => AnimationTag::Precipitate,
            "synthesis" | "combination" => AnimationTag::Synthesis,
            "rusting" => AnimationTag::Rusting,
            _ => AnimationTag::Other(value),
        }
    }
}

impl From<&str> for AnimationTag {
    fn from(value: &str) -> Self {
        AnimationTag::from(value.to_string())
    }
}

impl From<AnimationTag> for String {
    fn from(value: AnimationTag) -> Self {
        match value {
            AnimationTag::Other(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}
