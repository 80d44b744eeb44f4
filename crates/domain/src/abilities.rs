//! Hero abilities (strikes, maneuvers, triggered actions, ...).

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::AbilityId;

/// Damage type used when a damage row leaves it blank.
pub const DEFAULT_DAMAGE_TYPE: &str = "damage";

/// Filter value matching every ability.
pub const ACTION_FILTER_ALL: &str = "all";

/// One damage tier of an ability (`2d10 + 2` fire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOption {
    pub dice: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A stored ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub damage: Vec<DamageOption>,
    #[serde(default)]
    pub description: String,
}

impl Ability {
    /// Whether this ability is shown under the given action filter.
    pub fn matches_action(&self, filter: &str) -> bool {
        filter == ACTION_FILTER_ALL || self.action == filter
    }
}

/// Raw input from the "add ability" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityDraft {
    pub name: String,
    pub kind: String,
    pub keywords: String,
    pub action: String,
    pub target: String,
    pub description: String,
    /// `(dice, type)` rows as typed.
    pub damage: Vec<(String, String)>,
}

impl AbilityDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_damage(mut self, dice: impl Into<String>, kind: impl Into<String>) -> Self {
        self.damage.push((dice.into(), kind.into()));
        self
    }

    /// Validate and build the ability under `id`.
    ///
    /// Text is trimmed, damage rows without dice are dropped and blank damage
    /// types become [`DEFAULT_DAMAGE_TYPE`].
    pub fn into_ability(self, id: AbilityId) -> Result<Ability, DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Ability name cannot be empty"));
        }

        let damage = self
            .damage
            .iter()
            .filter_map(|(dice, kind)| {
                let dice = dice.trim();
                if dice.is_empty() {
                    return None;
                }
                let kind = match kind.trim() {
                    "" => DEFAULT_DAMAGE_TYPE,
                    other => other,
                };
                Some(DamageOption {
                    dice: dice.to_string(),
                    kind: kind.to_string(),
                })
            })
            .collect();

        Ok(Ability {
            id,
            name: name.to_string(),
            kind: self.kind.trim().to_string(),
            keywords: self.keywords.trim().to_string(),
            action: self.action,
            target: self.target.trim().to_string(),
            damage,
            description: self.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_a_name() {
        let err = AbilityDraft::new("   ")
            .into_ability(AbilityId::from_counter(1))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn draft_cleans_damage_rows() {
        let ability = AbilityDraft::new(" Brutal Slam ")
            .with_damage("2d10 + 2", "")
            .with_damage("  ", "fire")
            .with_damage("3d6", "fire")
            .into_ability(AbilityId::from_counter(2))
            .unwrap();
        assert_eq!(ability.name, "Brutal Slam");
        assert_eq!(ability.damage.len(), 2);
        assert_eq!(ability.damage[0].kind, DEFAULT_DAMAGE_TYPE);
        assert_eq!(ability.damage[1].kind, "fire");
    }

    #[test]
    fn action_filter() {
        let ability = AbilityDraft::new("Shove")
            .with_action("Maneuver")
            .into_ability(AbilityId::from_counter(1))
            .unwrap();
        assert!(ability.matches_action("all"));
        assert!(ability.matches_action("Maneuver"));
        assert!(!ability.matches_action("Action"));
    }

    #[test]
    fn serializes_type_field_names() {
        let ability = AbilityDraft::new("Bolt")
            .with_damage("2d6", "lightning")
            .into_ability(AbilityId::from_counter(3))
            .unwrap();
        let json = serde_json::to_value(&ability).unwrap();
        assert_eq!(json["id"], "ability-3");
        assert_eq!(json["type"], "");
        assert_eq!(json["damage"][0]["type"], "lightning");
    }
}
