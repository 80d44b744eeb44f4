//! In-memory state of one open sheet.

use crate::entities::{
    AbilitiesSection, FieldRegistry, InventorySection, NotesSection, SheetSection, SkillsSection,
};

/// Everything the user can edit on the sheet.
///
/// A host UI binds its controls to this value; the assembler and loader read
/// and write it as a whole.
#[derive(Debug, Clone)]
pub struct SheetSession {
    pub fields: FieldRegistry,
    pub inventory: InventorySection,
    pub skills: SkillsSection,
    pub abilities: AbilitiesSection,
    pub notes: NotesSection,
}

impl Default for SheetSession {
    fn default() -> Self {
        Self::new(FieldRegistry::hero_sheet())
    }
}

impl SheetSession {
    pub fn new(fields: FieldRegistry) -> Self {
        Self {
            fields,
            inventory: InventorySection::new(),
            skills: SkillsSection::new(),
            abilities: AbilitiesSection::new(),
            notes: NotesSection::new(),
        }
    }

    /// The dynamic sections in restore order.
    pub fn sections_mut(&mut self) -> [&mut dyn SheetSection; 4] {
        [
            &mut self.inventory,
            &mut self.skills,
            &mut self.abilities,
            &mut self.notes,
        ]
    }

    /// Reset to an empty sheet.
    pub fn clear(&mut self) {
        self.fields.clear_all();
        self.inventory.clear();
        self.skills.clear();
        self.abilities.clear();
        self.notes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_listed_in_restore_order() {
        let mut session = SheetSession::default();
        let names: Vec<&str> = session.sections_mut().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["inventoryItems", "skills", "characterAbilities", "notesPages"]
        );
    }

    #[test]
    fn clear_empties_everything() {
        let mut session = SheetSession::default();
        session.fields.write("class", "Tactician");
        session.skills.add_skill("Lead").unwrap();
        session.notes.add_page("Quests").unwrap();

        session.clear();

        assert_eq!(session.fields.read("class").unwrap().as_str(), Some(""));
        assert!(!session.skills.contains("Lead"));
        assert!(session.notes.pages().is_empty());
    }
}
