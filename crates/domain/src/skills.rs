//! Skill catalog and the set of skills a hero has picked.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Skill groups shown as headers in the skills list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Crafting,
    Exploration,
    Interpersonal,
    Intrigue,
    Lore,
    /// Skills that are not in the catalog (custom or from a newer sheet).
    Other,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Crafting => "Crafting",
            SkillCategory::Exploration => "Exploration",
            SkillCategory::Interpersonal => "Interpersonal",
            SkillCategory::Intrigue => "Intrigue",
            SkillCategory::Lore => "Lore",
            SkillCategory::Other => "Other",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every skill the sheet knows, by category.
pub const SKILL_CATALOG: &[(SkillCategory, &[&str])] = &[
    (
        SkillCategory::Crafting,
        &[
            "Alchemy", "Architecture", "Blacksmithing", "Carpentry", "Cooking", "Fletching",
            "Forgery", "Jewelry", "Mechanics", "Tailoring",
        ],
    ),
    (
        SkillCategory::Exploration,
        &[
            "Climb", "Drive", "Endurance", "Gymnastics", "Heal", "Jump", "Lift", "Navigate",
            "Ride", "Swim",
        ],
    ),
    (
        SkillCategory::Interpersonal,
        &[
            "Brag", "Empathize", "Flirt", "Gamble", "Handle Animals", "Interrogate",
            "Intimidate", "Lead", "Lie", "Music", "Performance", "Persuade", "Read Person",
        ],
    ),
    (
        SkillCategory::Intrigue,
        &[
            "Alertness", "Conceal Object", "Disguise", "Eavesdrop", "Escape Artist", "Hide",
            "Pick Lock", "Pick Pocket", "Sabotage", "Search", "Sneak", "Track",
        ],
    ),
    (
        SkillCategory::Lore,
        &[
            "Culture", "Criminal Underworld", "History", "Magic", "Monsters", "Nature",
            "Psionics", "Religion", "Rumors", "Society", "Strategy", "Timescape",
        ],
    ),
];

/// Category of a skill; unknown names fall under [`SkillCategory::Other`].
pub fn skill_category(name: &str) -> SkillCategory {
    SKILL_CATALOG
        .iter()
        .find(|(_, skills)| skills.contains(&name))
        .map(|(category, _)| *category)
        .unwrap_or(SkillCategory::Other)
}

/// Checkbox-style id older sheets used per skill (`Pick Lock` → `skill-pick-lock`).
pub fn legacy_skill_key(name: &str) -> String {
    let slug: Vec<String> = name
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect();
    format!("skill-{}", slug.join("-"))
}

/// Catalog skill whose legacy checkbox id is `key`.
pub fn skill_from_legacy_key(key: &str) -> Option<&'static str> {
    SKILL_CATALOG
        .iter()
        .flat_map(|(_, skills)| skills.iter().copied())
        .find(|skill| legacy_skill_key(skill) == key)
}

/// Skills displayed under one category header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillGroup<'a> {
    pub category: SkillCategory,
    pub skills: Vec<&'a str>,
}

/// The skills a hero has selected. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedSkills {
    names: Vec<String>,
}

impl SelectedSkills {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a skill. Duplicate names are rejected.
    pub fn add(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Skill name cannot be empty"));
        }
        if self.contains(trimmed) {
            return Err(DomainError::duplicate("skill", trimmed));
        }
        self.names.push(trimmed.to_string());
        Ok(())
    }

    /// Remove a skill; returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Display grouping: categories alphabetically, skills alphabetically within.
    pub fn grouped(&self) -> Vec<SkillGroup<'_>> {
        let mut groups: Vec<SkillGroup<'_>> = Vec::new();
        for name in &self.names {
            let category = skill_category(name);
            match groups.iter_mut().find(|g| g.category == category) {
                Some(group) => group.skills.push(name.as_str()),
                None => groups.push(SkillGroup {
                    category,
                    skills: vec![name.as_str()],
                }),
            }
        }
        groups.sort_by(|a, b| a.category.as_str().cmp(b.category.as_str()));
        for group in &mut groups {
            group.skills.sort_unstable();
        }
        groups
    }

    /// Names in display order.
    pub fn display_order(&self) -> Vec<String> {
        self.grouped()
            .into_iter()
            .flat_map(|g| g.skills.into_iter().map(str::to_string))
            .collect()
    }

    /// Catalog skills not yet selected, in catalog order.
    pub fn available(&self) -> Vec<&'static str> {
        SKILL_CATALOG
            .iter()
            .flat_map(|(_, skills)| skills.iter().copied())
            .filter(|skill| !self.contains(skill))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_come_from_the_catalog() {
        assert_eq!(skill_category("Alertness"), SkillCategory::Intrigue);
        assert_eq!(skill_category("Climb"), SkillCategory::Exploration);
        assert_eq!(skill_category("Basket Weaving"), SkillCategory::Other);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut skills = SelectedSkills::new();
        skills.add("Climb").unwrap();
        let err = skills.add("Climb").unwrap_err();
        assert!(matches!(err, DomainError::Duplicate { .. }));
        assert_eq!(skills.len(), 1);
    }

    #[test]
    fn grouping_is_category_then_alphabetical() {
        let mut skills = SelectedSkills::new();
        for name in ["Climb", "Alertness", "Endurance"] {
            skills.add(name).unwrap();
        }
        let groups = skills.grouped();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, SkillCategory::Exploration);
        assert_eq!(groups[0].skills, vec!["Climb", "Endurance"]);
        assert_eq!(groups[1].category, SkillCategory::Intrigue);
        assert_eq!(groups[1].skills, vec!["Alertness"]);
        assert_eq!(
            skills.display_order(),
            vec!["Climb".to_string(), "Endurance".to_string(), "Alertness".to_string()]
        );
    }

    #[test]
    fn legacy_keys_map_back_to_catalog_skills() {
        assert_eq!(legacy_skill_key("Pick Lock"), "skill-pick-lock");
        assert_eq!(skill_from_legacy_key("skill-pick-lock"), Some("Pick Lock"));
        assert_eq!(skill_from_legacy_key("skill-unknown"), None);
    }

    #[test]
    fn available_excludes_selected() {
        let mut skills = SelectedSkills::new();
        skills.add("Alchemy").unwrap();
        let available = skills.available();
        assert!(!available.contains(&"Alchemy"));
        assert!(available.contains(&"Architecture"));
    }
}
