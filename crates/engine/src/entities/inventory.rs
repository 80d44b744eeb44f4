//! Inventory rows.

use std::collections::BTreeMap;

use herosheet_domain::common::StringExt;
use herosheet_domain::{keys, total_bonuses, CharacterDocument, InventoryItem, StatKey};

use super::{SectionError, SheetSection};

/// One editable inventory row as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    pub quantity: String,
    pub name: String,
    pub description: String,
    pub bonuses: BTreeMap<StatKey, String>,
}

impl Default for InventoryRow {
    fn default() -> Self {
        Self {
            quantity: "1".to_string(),
            name: String::new(),
            description: String::new(),
            bonuses: BTreeMap::new(),
        }
    }
}

impl InventoryRow {
    /// Parse the row the way number inputs read (`"3 rope"` is 3).
    /// Unparseable or negative quantities count as one; unparseable or zero
    /// bonuses are dropped.
    pub fn to_item(&self) -> InventoryItem {
        let quantity = self
            .quantity
            .parse_leading_int()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(1);
        let mut item = InventoryItem::new(self.name.trim())
            .with_quantity(quantity)
            .with_description(self.description.trim());
        for (stat, raw) in &self.bonuses {
            let value = raw
                .parse_leading_int()
                .and_then(|n| i32::try_from(n).ok())
                .unwrap_or(0);
            item = item.with_bonus(*stat, value);
        }
        item
    }

    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            quantity: item.quantity.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            bonuses: item
                .bonuses
                .iter()
                .map(|(stat, value)| (*stat, value.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InventorySection {
    rows: Vec<InventoryRow>,
}

impl InventorySection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[InventoryRow] {
        &self.rows
    }

    /// Append a row and return its index.
    pub fn add_row(&mut self, row: InventoryRow) -> usize {
        self.rows.push(row);
        self.rows.len() - 1
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut InventoryRow> {
        self.rows.get_mut(index)
    }

    pub fn remove_row(&mut self, index: usize) -> Option<InventoryRow> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Items worth persisting, in row order.
    pub fn items(&self) -> Vec<InventoryItem> {
        self.rows
            .iter()
            .map(InventoryRow::to_item)
            .filter(|item| !item.is_blank())
            .collect()
    }

    /// Bonus totals over every row, for the stat displays.
    pub fn total_bonuses(&self) -> BTreeMap<StatKey, i32> {
        total_bonuses(&self.items())
    }
}

impl SheetSection for InventorySection {
    fn name(&self) -> &'static str {
        keys::INVENTORY_ITEMS
    }

    fn collect(&mut self) -> CharacterDocument {
        CharacterDocument {
            inventory_items: Some(self.items()),
            ..CharacterDocument::default()
        }
    }

    fn reset(&mut self) {
        self.clear();
    }

    fn restore(&mut self, document: &CharacterDocument) -> Result<(), SectionError> {
        self.clear();
        for item in document.inventory_items.iter().flatten() {
            self.rows.push(InventoryRow::from_item(item));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(quantity: &str, name: &str, description: &str) -> InventoryRow {
        InventoryRow {
            quantity: quantity.into(),
            name: name.into(),
            description: description.into(),
            bonuses: BTreeMap::new(),
        }
    }

    #[test]
    fn blank_rows_are_not_collected() {
        let mut section = InventorySection::new();
        section.add_row(InventoryRow::default());
        section.add_row(row("2", "Rope", ""));
        section.add_row(row("1", "", "   "));

        let items = section.collect().inventory_items.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Rope");
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn only_nonzero_bonuses_are_kept() {
        let mut section = InventorySection::new();
        let mut ring = row("1", "Ring of Might", "");
        ring.bonuses.insert(StatKey::Might, "2".into());
        ring.bonuses.insert(StatKey::Agility, "0".into());
        ring.bonuses.insert(StatKey::Reason, "".into());
        section.add_row(ring);

        let items = section.collect().inventory_items.unwrap();
        assert_eq!(
            items[0].bonuses,
            BTreeMap::from([(StatKey::Might, 2)])
        );
    }

    #[test]
    fn quantity_parsing() {
        assert_eq!(row("abc", "Torch", "").to_item().quantity, 1);
        assert_eq!(row("0", "Torch", "").to_item().quantity, 0);
        assert_eq!(row(" 12 ", "Torch", "").to_item().quantity, 12);
        assert_eq!(row("-2", "Torch", "").to_item().quantity, 1);
    }

    #[test]
    fn totals_sum_across_rows() {
        let mut section = InventorySection::new();
        let mut a = row("1", "Belt", "");
        a.bonuses.insert(StatKey::StaminaMax, "3".into());
        let mut b = row("1", "Cloak", "");
        b.bonuses.insert(StatKey::StaminaMax, "2".into());
        b.bonuses.insert(StatKey::Presence, "-1".into());
        section.add_row(a);
        section.add_row(b);

        let totals = section.total_bonuses();
        assert_eq!(totals[&StatKey::StaminaMax], 5);
        assert_eq!(totals[&StatKey::Presence], -1);
        assert_eq!(totals[&StatKey::Might], 0);
    }

    #[test]
    fn restore_replaces_rows_in_stored_order() {
        let mut section = InventorySection::new();
        section.add_row(row("1", "Old", ""));

        let mut doc = CharacterDocument::new();
        doc.inventory_items = Some(vec![
            InventoryItem::new("Rope").with_quantity(2),
            InventoryItem::new("Lantern").with_bonus(StatKey::Reason, 1),
        ]);
        section.restore(&doc).unwrap();

        let names: Vec<&str> = section.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Rope", "Lantern"]);
        assert_eq!(section.rows()[1].bonuses[&StatKey::Reason], "1");
    }

    #[test]
    fn restore_without_items_clears() {
        let mut section = InventorySection::new();
        section.add_row(row("1", "Old", ""));
        section.restore(&CharacterDocument::new()).unwrap();
        assert!(section.rows().is_empty());
    }
}
