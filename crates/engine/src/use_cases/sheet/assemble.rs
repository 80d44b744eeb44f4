//! Builds a character document from the open sheet.

use std::sync::Arc;

use herosheet_domain::common::format_timestamp;
use herosheet_domain::CharacterDocument;

use crate::infrastructure::ports::ClockPort;
use crate::infrastructure::settings::SheetSettings;
use crate::stores::SheetSession;

pub struct DocumentAssembler {
    clock: Arc<dyn ClockPort>,
    settings: SheetSettings,
}

impl DocumentAssembler {
    pub fn new(clock: Arc<dyn ClockPort>, settings: SheetSettings) -> Self {
        Self { clock, settings }
    }

    /// Flatten the session into one document.
    ///
    /// Fields are read first and sections second, so a section's keys win
    /// over a stray field with the same id. Takes `&mut` because collecting
    /// the notes section commits its edit buffer.
    pub fn assemble(&self, session: &mut SheetSession) -> CharacterDocument {
        let mut document = CharacterDocument::new();

        for (id, value) in session.fields.enumerate() {
            if self.settings.is_reserved(&id) {
                continue;
            }
            document.fields.insert(id, value);
        }

        for section in session.sections_mut() {
            document.overlay(section.collect());
        }

        document.victory_count = Some(session.fields.victory_count());
        document.last_saved = Some(format_timestamp(self.clock.now()));
        document.version = Some(self.settings.version.clone());

        tracing::debug!(
            fields = document.fields.len(),
            victory_count = session.fields.victory_count(),
            "Assembled character document"
        );
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{FieldKind, FieldRegistry, FormField, InventoryRow};
    use crate::infrastructure::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use herosheet_domain::FieldValue;

    fn assembler() -> DocumentAssembler {
        DocumentAssembler::new(
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())),
            SheetSettings::default(),
        )
    }

    #[test]
    fn empty_session_still_produces_metadata() {
        let mut session = SheetSession::default();
        let doc = assembler().assemble(&mut session);

        assert_eq!(doc.version.as_deref(), Some("1.0"));
        assert_eq!(doc.last_saved.as_deref(), Some("2024-05-01T12:00:00.000Z"));
        assert_eq!(doc.victory_count, Some(0));
        assert_eq!(doc.inventory_items, Some(vec![]));
        assert_eq!(doc.skills, Some(vec![]));
        assert_eq!(doc.notes_pages, Some(vec![]));
        assert_eq!(doc.next_ability_id, Some(1));
    }

    #[test]
    fn collects_fields_and_sections() {
        let mut session = SheetSession::default();
        session.fields.write("character-name", "Aria");
        session.fields.write("might", "2");
        session.fields.write("victory-1", true);
        session.fields.write("victory-2", true);
        session.fields.write("clear-storage", true);
        session.skills.add_skill("Climb").unwrap();
        session.inventory.add_row(InventoryRow {
            name: "Rope".into(),
            ..InventoryRow::default()
        });

        let doc = assembler().assemble(&mut session);

        assert_eq!(doc.field_text("character-name"), Some("Aria"));
        assert_eq!(doc.field("victory-1"), Some(&FieldValue::Flag(true)));
        assert!(doc.field("clear-storage").is_none());
        assert_eq!(doc.victory_count, Some(2));
        assert_eq!(doc.skills, Some(vec!["Climb".to_string()]));
        assert_eq!(doc.inventory_items.unwrap()[0].name, "Rope");
    }

    #[test]
    fn section_keys_win_over_same_named_fields() {
        let mut fields = FieldRegistry::hero_sheet();
        fields.register(FormField::new("skills", FieldKind::Text));
        fields.write("skills", "typed by hand");
        let mut session = SheetSession::new(fields);
        session.skills.add_skill("Swim").unwrap();

        let doc = assembler().assemble(&mut session);

        assert!(doc.field("skills").is_none());
        assert_eq!(doc.skills, Some(vec!["Swim".to_string()]));
    }

    #[test]
    fn anonymous_fields_are_ignored() {
        let mut fields = FieldRegistry::new();
        fields.register(FormField::anonymous(FieldKind::Text));
        fields.register(FormField::new("culture", FieldKind::Text));
        let mut session = SheetSession::new(fields);

        let doc = assembler().assemble(&mut session);
        assert_eq!(doc.fields.len(), 1);
    }
}
