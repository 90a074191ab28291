//! Local element/compound catalogs used for drag sources and search resolution.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::domain::{CatalogEntry, ItemKind};
use tracing::{debug, info};

use crate::error::ClientError;

/// Attributes of a rendered source card (`data-formula`, `data-name` and the
/// inline background color).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCard {
    pub kind: ItemKind,
    pub formula: String,
    pub name: String,
    pub background: Option<String>,
}

impl SourceCard {
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        let background = match entry {
            CatalogEntry::Element { color, .. } => color.clone(),
            CatalogEntry::Compound { .. } => None,
        };
        Self {
            kind: entry.kind(),
            formula: entry.identity().to_string(),
            name: entry.name().to_string(),
            background,
        }
    }

    fn into_entry(self) -> Result<CatalogEntry, ClientError> {
        if self.formula.trim().is_empty() {
            return Err(ClientError::CatalogEntryIncomplete { field: "formula" });
        }
        if self.name.trim().is_empty() {
            return Err(ClientError::CatalogEntryIncomplete { field: "name" });
        }
        Ok(match self.kind {
            ItemKind::Element => CatalogEntry::Element {
                symbol: self.formula,
                name: self.name,
                color: self.background.filter(|color| !color.trim().is_empty()),
            },
            ItemKind::Compound => CatalogEntry::Compound {
                formula: self.formula,
                name: self.name,
            },
        })
    }
}

#[derive(Debug, Default, Clone)]
struct Table {
    entries: Vec<CatalogEntry>,
    by_identity: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl Table {
    fn insert(&mut self, entry: CatalogEntry) {
        let idx = self.entries.len();
        self.by_identity
            .entry(entry.identity().to_string())
            .or_insert(idx);
        self.by_name.entry(entry.name().to_string()).or_insert(idx);
        self.entries.push(entry);
    }

    /// First entry (in harvest order) whose identity or name equals `key`.
    fn find(&self, key: &str) -> Option<&CatalogEntry> {
        [self.by_identity.get(key), self.by_name.get(key)]
            .into_iter()
            .flatten()
            .min()
            .map(|idx| &self.entries[*idx])
    }
}

#[derive(Debug, Default, Clone)]
pub struct Catalog {
    compounds: Table,
    elements: Table,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "element")]
    elements: Vec<ElementRecord>,
    #[serde(default, rename = "compound")]
    compounds: Vec<CompoundRecord>,
}

#[derive(Debug, Deserialize)]
struct ElementRecord {
    symbol: String,
    name: String,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompoundRecord {
    formula: String,
    name: String,
}

const BUILTIN_COMPOUNDS: &[(&str, &str)] = &[
    ("Hydrochloric Acid", "HCl"),
    ("Sodium Hydroxide", "NaOH"),
    ("Sulfuric Acid", "H2SO4"),
    ("Copper(II) Sulfate", "CuSO4"),
    ("Silver Nitrate", "AgNO3"),
    ("Barium Chloride", "BaCl2"),
    ("Potassium Iodide", "KI"),
    ("Lead(II) Nitrate", "Pb(NO3)2"),
    ("Ammonia", "NH3"),
    ("Iron(III) Chloride", "FeCl3"),
    ("Calcium Carbonate", "CaCO3"),
    ("Magnesium Sulfate", "MgSO4"),
    ("Zinc", "Zn"),
    ("Copper", "Cu"),
    ("Hydrogen Peroxide", "H2O2"),
];

const BUILTIN_ELEMENTS: &[(&str, &str, &str)] = &[
    ("H", "Hydrogen", "#f1f8ff"),
    ("C", "Carbon", "#d7d7d7"),
    ("N", "Nitrogen", "#c5cae9"),
    ("O", "Oxygen", "#ffcdd2"),
    ("Na", "Sodium", "#ffe0b2"),
    ("Mg", "Magnesium", "#dcedc8"),
    ("S", "Sulfur", "#fff59d"),
    ("Cl", "Chlorine", "#c8e6c9"),
    ("K", "Potassium", "#f8bbd0"),
    ("Ca", "Calcium", "#e1bee7"),
    ("Fe", "Iron", "#ffccbc"),
    ("Cu", "Copper", "#ffab91"),
    ("Zn", "Zinc", "#cfd8dc"),
    ("Ag", "Silver", "#eceff1"),
    ("Ba", "Barium", "#b2ebf2"),
    ("Pb", "Lead", "#b0bec5"),
];

impl Catalog {
    /// Builds lookup tables from the source cards rendered on the page.
    /// Cards without a formula or name are skipped.
    pub fn harvest(cards: impl IntoIterator<Item = SourceCard>) -> Self {
        let mut catalog = Self::default();
        for card in cards {
            let formula = card.formula.clone();
            match card.into_entry() {
                Ok(entry) => catalog.insert(entry),
                Err(err) => debug!(%formula, %err, "skipping incomplete source card"),
            }
        }
        info!(
            compounds = catalog.compounds.entries.len(),
            elements = catalog.elements.entries.len(),
            "harvested catalog"
        );
        catalog
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for (name, formula) in BUILTIN_COMPOUNDS {
            catalog.insert(CatalogEntry::Compound {
                formula: (*formula).to_string(),
                name: (*name).to_string(),
            });
        }
        for (symbol, name, color) in BUILTIN_ELEMENTS {
            catalog.insert(CatalogEntry::Element {
                symbol: (*symbol).to_string(),
                name: (*name).to_string(),
                color: Some((*color).to_string()),
            });
        }
        catalog
    }

    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let raw = fs::read_to_string(path).map_err(|source| ClientError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw, path)
    }

    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self, ClientError> {
        let file: CatalogFile = toml::from_str(raw).map_err(|source| ClientError::CatalogParse {
            path: PathBuf::from(origin),
            source,
        })?;

        let cards = file
            .compounds
            .into_iter()
            .map(|record| SourceCard {
                kind: ItemKind::Compound,
                formula: record.formula,
                name: record.name,
                background: None,
            })
            .chain(file.elements.into_iter().map(|record| SourceCard {
                kind: ItemKind::Element,
                formula: record.symbol,
                name: record.name,
                background: record.color,
            }));
        Ok(Self::harvest(cards))
    }

    pub fn insert(&mut self, entry: CatalogEntry) {
        match entry.kind() {
            ItemKind::Compound => self.compounds.insert(entry),
            ItemKind::Element => self.elements.insert(entry),
        }
    }

    /// Exact, case-sensitive lookup by formula/symbol or display name.
    /// Compounds take precedence over elements.
    pub fn lookup(&self, key: &str) -> Option<&CatalogEntry> {
        self.compounds.find(key).or_else(|| self.elements.find(key))
    }

    pub fn lookup_kind(&self, kind: ItemKind, key: &str) -> Option<&CatalogEntry> {
        match kind {
            ItemKind::Compound => self.compounds.find(key),
            ItemKind::Element => self.elements.find(key),
        }
    }

    pub fn compounds(&self) -> &[CatalogEntry] {
        &self.compounds.entries
    }

    pub fn elements(&self) -> &[CatalogEntry] {
        &self.elements.entries
    }

    pub fn source_cards(&self) -> Vec<SourceCard> {
        self.elements()
            .iter()
            .chain(self.compounds())
            .map(SourceCard::from_entry)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.compounds.entries.len() + self.elements.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
