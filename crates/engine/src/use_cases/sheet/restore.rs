//! Restores a character document into the open sheet.

use herosheet_domain::{keys, CharacterDocument};

use crate::entities::SheetSection;
use crate::infrastructure::settings::SheetSettings;
use crate::stores::SheetSession;

/// A section that could not be restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFailure {
    pub section: &'static str,
    pub message: String,
}

/// What a restore did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub fields_restored: usize,
    /// Document keys with no matching field on this sheet.
    pub unknown_fields: Vec<String>,
    pub section_failures: Vec<SectionFailure>,
}

impl RestoreReport {
    pub fn is_complete(&self) -> bool {
        self.section_failures.is_empty()
    }
}

pub struct SheetLoader {
    settings: SheetSettings,
}

impl SheetLoader {
    pub fn new(settings: SheetSettings) -> Self {
        Self { settings }
    }

    /// Restore fields, then inventory, skills, abilities and notes, then the
    /// victory markers.
    ///
    /// A section that fails is reset so nothing from the previously open
    /// character survives; the failure is logged and reported and the
    /// remaining steps still run.
    pub fn restore(&self, session: &mut SheetSession, document: &CharacterDocument) -> RestoreReport {
        let mut report = RestoreReport::default();

        for (id, value) in &document.fields {
            if keys::is_structured(id) || self.settings.is_reserved(id) {
                continue;
            }
            if session.fields.write(id, value.clone()) {
                report.fields_restored += 1;
            } else {
                report.unknown_fields.push(id.clone());
            }
        }

        for section in session.sections_mut() {
            restore_section(section, document, &mut report);
        }

        if let Some(count) = document.victory_count {
            session.fields.set_victory_count(count);
        }

        tracing::debug!(
            fields_restored = report.fields_restored,
            unknown_fields = report.unknown_fields.len(),
            failures = report.section_failures.len(),
            "Restored character document"
        );
        report
    }
}

fn restore_section(
    section: &mut dyn SheetSection,
    document: &CharacterDocument,
    report: &mut RestoreReport,
) {
    if let Err(e) = section.restore(document) {
        tracing::warn!(section = section.name(), error = %e, "Section restore failed");
        section.reset();
        report.section_failures.push(SectionFailure {
            section: section.name(),
            message: e.to_string(),
        });
    }
}
