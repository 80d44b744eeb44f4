//! Inventory items and the stat bonuses they grant.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::StringExt;
use crate::error::DomainError;

/// Stats an inventory item may modify. Closed set; also the field ids of
/// the corresponding base stat inputs on the main tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatKey {
    #[serde(rename = "might")]
    Might,
    #[serde(rename = "agility")]
    Agility,
    #[serde(rename = "reason")]
    Reason,
    #[serde(rename = "intuition")]
    Intuition,
    #[serde(rename = "presence")]
    Presence,
    #[serde(rename = "stamina-max")]
    StaminaMax,
    #[serde(rename = "recoveries-max")]
    RecoveriesMax,
    #[serde(rename = "recoveries-stamina")]
    RecoveriesStamina,
}

impl StatKey {
    pub const ALL: [StatKey; 8] = [
        StatKey::Might,
        StatKey::Agility,
        StatKey::Reason,
        StatKey::Intuition,
        StatKey::Presence,
        StatKey::StaminaMax,
        StatKey::RecoveriesMax,
        StatKey::RecoveriesStamina,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::Might => "might",
            StatKey::Agility => "agility",
            StatKey::Reason => "reason",
            StatKey::Intuition => "intuition",
            StatKey::Presence => "presence",
            StatKey::StaminaMax => "stamina-max",
            StatKey::RecoveriesMax => "recoveries-max",
            StatKey::RecoveriesStamina => "recoveries-stamina",
        }
    }

    /// Label shown next to the bonus input.
    pub fn label(&self) -> &'static str {
        match self {
            StatKey::Might => "Might",
            StatKey::Agility => "Agility",
            StatKey::Reason => "Reason",
            StatKey::Intuition => "Intuition",
            StatKey::Presence => "Presence",
            StatKey::StaminaMax => "Max Stamina",
            StatKey::RecoveriesMax => "Max Recoveries",
            StatKey::RecoveriesStamina => "Recovery Stamina",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown stat key: {}", s)))
    }
}

fn default_quantity() -> u32 {
    1
}

/// Integer from a stored number or numeric string (`"2"`, `"3 rope"`).
fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.as_str().parse_leading_int(),
        _ => None,
    }
}

/// Quantities read like the number input: anything unparseable or negative
/// counts as one.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(lenient_int(&raw)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or_else(default_quantity))
}

/// Bonuses for stats this sheet has no input for are dropped, as are zero
/// or unparseable values.
fn lenient_bonuses<'de, D>(deserializer: D) -> Result<BTreeMap<StatKey, i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| {
            let stat = key.parse::<StatKey>().ok()?;
            let bonus = lenient_int(&value).and_then(|n| i32::try_from(n).ok())?;
            (bonus != 0).then_some((stat, bonus))
        })
        .collect())
}

/// One carried item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Only nonzero bonuses are kept.
    #[serde(default, deserialize_with = "lenient_bonuses")]
    pub bonuses: BTreeMap<StatKey, i32>,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            quantity: 1,
            name: name.into(),
            description: String::new(),
            bonuses: BTreeMap::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set a bonus; zero removes the entry.
    pub fn with_bonus(mut self, stat: StatKey, value: i32) -> Self {
        if value == 0 {
            self.bonuses.remove(&stat);
        } else {
            self.bonuses.insert(stat, value);
        }
        self
    }

    /// Items without a name and without a description are not persisted.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.description.is_empty()
    }
}

/// Sum of all item bonuses, one entry per stat (zeros included).
pub fn total_bonuses<'a>(items: impl IntoIterator<Item = &'a InventoryItem>) -> BTreeMap<StatKey, i32> {
    let mut totals: BTreeMap<StatKey, i32> = StatKey::ALL.into_iter().map(|k| (k, 0)).collect();
    for item in items {
        for (stat, value) in &item.bonuses {
            *totals.entry(*stat).or_insert(0) += value;
        }
    }
    totals
}
