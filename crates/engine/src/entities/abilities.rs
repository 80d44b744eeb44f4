//! Hero abilities list.

use std::collections::HashSet;

use herosheet_domain::{keys, Ability, AbilityDraft, AbilityId, CharacterDocument, DomainError};

use super::{SectionError, SheetSection};

#[derive(Debug, Clone)]
pub struct AbilitiesSection {
    abilities: Vec<Ability>,
    next_id: u32,
}

impl Default for AbilitiesSection {
    fn default() -> Self {
        Self {
            abilities: Vec::new(),
            next_id: 1,
        }
    }
}

impl AbilitiesSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Validate the draft and append it under a freshly minted id.
    ///
    /// The counter never wraps: once it reaches `u32::MAX` no more abilities
    /// can be added.
    pub fn add_ability(&mut self, draft: AbilityDraft) -> Result<AbilityId, DomainError> {
        let next = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| DomainError::validation("No ability ids left to assign"))?;
        let id = AbilityId::from_counter(self.next_id);
        let ability = draft.into_ability(id.clone())?;
        self.next_id = next;
        self.abilities.push(ability);
        Ok(id)
    }

    pub fn remove_ability(&mut self, id: &AbilityId) -> bool {
        let before = self.abilities.len();
        self.abilities.retain(|a| &a.id != id);
        self.abilities.len() != before
    }

    pub fn filter_by_action(&self, action: &str) -> Vec<&Ability> {
        self.abilities
            .iter()
            .filter(|a| a.matches_action(action))
            .collect()
    }

    pub fn clear(&mut self) {
        self.abilities.clear();
        self.next_id = 1;
    }
}

/// Numeric suffix of an `ability-N` id.
fn counter_of(id: &AbilityId) -> Option<u32> {
    id.as_str()
        .strip_prefix(AbilityId::PREFIX)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|n| n.parse().ok())
}

impl SheetSection for AbilitiesSection {
    fn name(&self) -> &'static str {
        keys::CHARACTER_ABILITIES
    }

    fn collect(&mut self) -> CharacterDocument {
        CharacterDocument {
            character_abilities: Some(self.abilities.clone()),
            next_ability_id: Some(self.next_id),
            ..CharacterDocument::default()
        }
    }

    fn reset(&mut self) {
        self.clear();
    }

    fn restore(&mut self, document: &CharacterDocument) -> Result<(), SectionError> {
        self.clear();

        let mut seen = HashSet::new();
        for ability in document.character_abilities.iter().flatten() {
            if !seen.insert(ability.id.clone()) {
                tracing::warn!(ability_id = %ability.id, "Skipping stored ability with a duplicate id");
                continue;
            }
            self.abilities.push(ability.clone());
        }

        // Never hand out an id that is already in the list.
        let past_existing = self
            .abilities
            .iter()
            .filter_map(|a| counter_of(&a.id))
            .max()
            .map_or(1, |max| max.saturating_add(1));
        self.next_id = document.next_ability_id.unwrap_or(1).max(past_existing);
        Ok(())
    }
}
