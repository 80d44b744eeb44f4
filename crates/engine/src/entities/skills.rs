//! Selected skills.

use herosheet_domain::{
    keys, skill_from_legacy_key, CharacterDocument, DomainError, SelectedSkills, SkillGroup,
};

use super::{SectionError, SheetSection};

#[derive(Debug, Clone, Default)]
pub struct SkillsSection {
    selected: SelectedSkills,
}

impl SkillsSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_skill(&mut self, name: &str) -> Result<(), DomainError> {
        self.selected.add(name)
    }

    pub fn remove_skill(&mut self, name: &str) -> bool {
        self.selected.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub fn grouped(&self) -> Vec<SkillGroup<'_>> {
        self.selected.grouped()
    }

    pub fn available_skills(&self) -> Vec<&'static str> {
        self.selected.available()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

/// Skills recorded as `skill-<slug>: true` checkboxes by older sheets.
fn legacy_skills(document: &CharacterDocument) -> Vec<&'static str> {
    document
        .fields
        .iter()
        .filter(|(_, value)| value.is_truthy())
        .filter_map(|(key, _)| skill_from_legacy_key(key))
        .collect()
}

impl SheetSection for SkillsSection {
    fn name(&self) -> &'static str {
        keys::SKILLS
    }

    fn collect(&mut self) -> CharacterDocument {
        CharacterDocument {
            skills: Some(self.selected.display_order()),
            ..CharacterDocument::default()
        }
    }

    fn reset(&mut self) {
        self.clear();
    }

    fn restore(&mut self, document: &CharacterDocument) -> Result<(), SectionError> {
        self.clear();
        let names: Vec<&str> = match &document.skills {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => legacy_skills(document),
        };
        for name in names {
            if let Err(e) = self.add_skill(name) {
                tracing::warn!(skill = name, error = %e, "Skipping stored skill");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herosheet_domain::SkillCategory;

    #[test]
    fn collects_the_selected_set_and_groups_for_display() {
        let mut section = SkillsSection::new();
        section.add_skill("Climb").unwrap();
        section.add_skill("Alertness").unwrap();
        section.add_skill("Endurance").unwrap();

        let mut collected = section.collect().skills.unwrap();
        collected.sort();
        assert_eq!(collected, vec!["Alertness", "Climb", "Endurance"]);

        let groups = section.grouped();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, SkillCategory::Exploration);
        assert_eq!(groups[0].skills, vec!["Climb", "Endurance"]);
        assert_eq!(groups[1].category, SkillCategory::Intrigue);
        assert_eq!(groups[1].skills, vec!["Alertness"]);
    }

    #[test]
    fn duplicate_skill_is_rejected() {
        let mut section = SkillsSection::new();
        section.add_skill("Climb").unwrap();
        assert!(matches!(
            section.add_skill("Climb"),
            Err(DomainError::Duplicate { .. })
        ));
    }

    #[test]
    fn restore_uses_stored_list() {
        let mut section = SkillsSection::new();
        section.add_skill("Swim").unwrap();

        let mut doc = CharacterDocument::new();
        doc.skills = Some(vec!["Lie".into(), "Climb".into()]);
        section.restore(&doc).unwrap();

        assert!(!section.contains("Swim"));
        assert_eq!(
            section.collect().skills.unwrap(),
            vec!["Climb".to_string(), "Lie".to_string()]
        );
    }

    #[test]
    fn restore_reads_legacy_checkbox_keys() {
        let mut doc = CharacterDocument::new();
        doc.set_field("skill-pick-lock", true);
        doc.set_field("skill-climb", false);
        doc.set_field("skill-alertness", true);

        let mut section = SkillsSection::new();
        section.restore(&doc).unwrap();

        assert!(section.contains("Pick Lock"));
        assert!(section.contains("Alertness"));
        assert!(!section.contains("Climb"));
    }

    #[test]
    fn restore_skips_duplicates_and_drops_previous_character() {
        let mut section = SkillsSection::new();
        section.add_skill("Swim").unwrap();

        let mut doc = CharacterDocument::new();
        doc.skills = Some(vec!["Climb".into(), "Climb".into(), " ".into(), "Lie".into()]);
        section.restore(&doc).unwrap();

        assert!(!section.contains("Swim"));
        assert_eq!(
            section.collect().skills.unwrap(),
            vec!["Climb".to_string(), "Lie".to_string()]
        );
    }
}
