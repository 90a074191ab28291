//! Selection store and the tumbler view derived from it.

use shared::domain::{ItemKind, Product, SelectableItem};

use crate::ui::animation::Gradient;

pub const ROW_TOP_OFFSET_PX: u32 = 30;
pub const ROW_SPACING_PX: u32 = 32;
pub const FILL_UNIT_PERCENT: u32 = 18;
pub const FILL_CAP_PERCENT: u32 = 100;
pub const DEFAULT_ELEMENT_BACKGROUND: &str = "#e0e7ff";

pub fn row_top(index: usize) -> u32 {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    ROW_TOP_OFFSET_PX.saturating_add(index.saturating_mul(ROW_SPACING_PX))
}

pub fn fill_level(count: usize) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    count.saturating_mul(FILL_UNIT_PERCENT).min(FILL_CAP_PERCENT)
}

/// Ordered, formula-unique set of items placed in the tumbler.
#[derive(Debug, Default, Clone)]
pub struct SelectionStore {
    items: Vec<SelectableItem>,
}

impl SelectionStore {
    /// Appends `item` unless its formula is already present.
    pub fn add(&mut self, item: SelectableItem) -> bool {
        if self.contains(&item.formula) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove(&mut self, formula: &str) -> bool {
        match self.items.iter().position(|item| item.formula == formula) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, formula: &str) -> bool {
        self.items.iter().any(|item| item.formula == formula)
    }

    pub fn items(&self) -> &[SelectableItem] {
        &self.items
    }

    /// Formulas in display order.
    pub fn formulas(&self) -> Vec<String> {
        self.items.iter().map(|item| item.formula.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TumblerLabel {
    #[default]
    Empty,
    Ready,
    Complete,
}

impl TumblerLabel {
    pub fn text(self) -> &'static str {
        match self {
            TumblerLabel::Empty => "Drop elements or compounds here!",
            TumblerLabel::Ready => "Ready to React!",
            TumblerLabel::Complete => "Reaction Complete!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TumblerRow {
    pub formula: String,
    pub top_px: u32,
    pub background: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TumblerView {
    pub rows: Vec<TumblerRow>,
    pub fill_percent: u32,
    pub label: TumblerLabel,
    /// Set while a drag hovers over the drop target.
    pub armed: bool,
    pub liquid: Gradient,
}

impl Default for TumblerView {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            fill_percent: 0,
            label: TumblerLabel::Empty,
            armed: false,
            liquid: Gradient::DEFAULT,
        }
    }
}

impl TumblerView {
    pub fn show_selection(&mut self, store: &SelectionStore) {
        self.rows = store
            .items()
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let background = match item.kind {
                    ItemKind::Element => Some(
                        item.color_hint
                            .clone()
                            .unwrap_or_else(|| DEFAULT_ELEMENT_BACKGROUND.to_string()),
                    ),
                    ItemKind::Compound => None,
                };
                TumblerRow {
                    formula: item.formula.clone(),
                    top_px: row_top(idx),
                    background,
                    title: Some(format!("{} ({})", item.name, item.kind.label())),
                }
            })
            .collect();
        self.fill_percent = fill_level(store.len());
        self.label = if store.is_empty() {
            TumblerLabel::Empty
        } else {
            TumblerLabel::Ready
        };
    }

    pub fn show_products(&mut self, products: &[Product]) {
        self.rows = products
            .iter()
            .enumerate()
            .map(|(idx, product)| TumblerRow {
                formula: product.formula.clone(),
                top_px: row_top(idx),
                background: None,
                title: None,
            })
            .collect();
        self.fill_percent = fill_level(products.len());
        self.label = TumblerLabel::Complete;
    }

    pub fn formulas(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.formula.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(formula: &str) -> SelectableItem {
        SelectableItem::new(formula, formula, ItemKind::Compound)
    }

    #[test]
    fn add_ignores_duplicate_formulas_and_keeps_insertion_order() {
        let mut store = SelectionStore::default();
        assert!(store.add(compound("HCl")));
        assert!(store.add(compound("NaOH")));
        assert!(!store.add(SelectableItem::new("HCl", "Other", ItemKind::Element)));
        assert!(store.add(compound("hcl")));
        assert_eq!(store.formulas(), ["HCl", "NaOH", "hcl"]);
    }

    #[test]
    fn remove_is_a_noop_for_absent_formulas() {
        let mut store = SelectionStore::default();
        store.add(compound("HCl"));
        store.add(compound("NaOH"));
        assert!(!store.remove("KI"));
        assert!(store.remove("HCl"));
        assert_eq!(store.formulas(), ["NaOH"]);
        store.add(compound("HCl"));
        assert_eq!(store.formulas(), ["NaOH", "HCl"]);
    }

    #[test]
    fn random_add_remove_sequences_keep_formulas_unique() {
        let formulas = ["HCl", "NaOH", "KI", "Na", "Cl"];
        let mut store = SelectionStore::default();
        let mut model: Vec<&str> = Vec::new();
        let mut state = 0x2545_f491_u32;
        for _ in 0..500 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let formula = formulas[(state % 5) as usize];
            if state & 0x100 == 0 {
                store.add(compound(formula));
                if !model.contains(&formula) {
                    model.push(formula);
                }
            } else {
                store.remove(formula);
                model.retain(|f| *f != formula);
            }
            assert_eq!(store.formulas(), model);
        }
    }

    #[test]
    fn fill_level_is_capped() {
        assert_eq!(fill_level(0), 0);
        assert_eq!(fill_level(1), 18);
        assert_eq!(fill_level(5), 90);
        assert_eq!(fill_level(6), 100);
        assert_eq!(fill_level(40), 100);
    }

    #[test]
    fn view_rows_follow_store_order_with_fixed_offsets() {
        let mut store = SelectionStore::default();
        store.add(SelectableItem::new("Na", "Sodium", ItemKind::Element));
        store.add(compound("HCl"));
        let mut view = TumblerView::default();
        view.show_selection(&store);

        assert_eq!(view.formulas(), ["Na", "HCl"]);
        assert_eq!(view.rows[0].top_px, 30);
        assert_eq!(view.rows[1].top_px, 62);
        assert_eq!(
            view.rows[0].background.as_deref(),
            Some(DEFAULT_ELEMENT_BACKGROUND)
        );
        assert_eq!(view.rows[0].title.as_deref(), Some("Sodium (Element)"));
        assert_eq!(view.rows[1].background, None);
        assert_eq!(view.fill_percent, 36);
        assert_eq!(view.label, TumblerLabel::Ready);

        store.reset();
        view.show_selection(&store);
        assert!(view.rows.is_empty());
        assert_eq!(view.label.text(), "Drop elements or compounds here!");
    }
}
