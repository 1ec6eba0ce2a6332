//! Room type model and multiplier template types.
//!
//! This module defines the RoomType configuration record together with the
//! occupancy multiplier template it carries. Multiplier tables arrive from
//! the admin store in two shapes (plain JSON objects or ordered-map entry
//! lists); they are normalized here, once, at the deserialization boundary,
//! so every consumer sees a single canonical keyed mapping.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// How a room type's nightly price is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingType {
    /// One price per room per night, adjusted by occupancy multipliers.
    Unit,
    /// Price charged per person per night.
    PerPerson,
}

impl std::fmt::Display for PricingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingType::Unit => write!(f, "unit"),
            PricingType::PerPerson => write!(f, "per_person"),
        }
    }
}

/// Rounding applied to a multiplied unit price.
///
/// The rule is applied exactly once, to the final amount, never to
/// intermediate multiplier lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingRule {
    /// Leave the amount unrounded.
    #[default]
    None,
    /// Round to the nearest whole unit, halves away from zero.
    Round,
    /// Round up to the next whole unit.
    Ceil,
    /// Round down to the previous whole unit.
    Floor,
}

impl RoundingRule {
    /// Applies this rounding rule to an amount.
    ///
    /// # Example
    ///
    /// ```
    /// use pricing_engine::models::RoundingRule;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let amount = Decimal::from_str("104.35").unwrap();
    /// assert_eq!(RoundingRule::Ceil.apply(amount), Decimal::from_str("105").unwrap());
    /// assert_eq!(RoundingRule::None.apply(amount), amount);
    /// ```
    pub fn apply(&self, amount: Decimal) -> Decimal {
        match self {
            RoundingRule::None => amount,
            RoundingRule::Round => {
                amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            }
            RoundingRule::Ceil => amount.ceil(),
            RoundingRule::Floor => amount.floor(),
        }
    }
}

/// A canonical keyed multiplier mapping.
///
/// The admin store serializes these tables either as plain JSON objects
/// (`{"1": 1.0, "2": 1.8}`) or as ordered-map entry lists
/// (`[["1", 1.0], ["2", 1.8]]`), depending on which write path produced the
/// record. Deserialization accepts both, in either shape at any depth:
/// nested maps flatten into dot-joined compound keys
/// (`{"child": {"0-6": 0.5}}` stores as `child.0-6`), scalars pass through,
/// and one sorted mapping comes out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MultiplierMap(BTreeMap<String, Decimal>);

impl MultiplierMap {
    /// Looks up a multiplier by numeric key (e.g. an adult count).
    pub fn get(&self, key: u32) -> Option<Decimal> {
        self.0.get(&key.to_string()).copied()
    }

    /// Looks up a multiplier by string key (e.g. a child age group id).
    pub fn get_str(&self, key: &str) -> Option<Decimal> {
        self.0.get(key).copied()
    }

    /// Returns true when the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>> FromIterator<(K, Decimal)> for MultiplierMap {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        MultiplierMap(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'de> Deserialize<'de> for MultiplierMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let raw = Value::deserialize(deserializer)?;
        let normalized = normalize_keyed(raw);
        let object = match normalized {
            Value::Object(map) => map,
            Value::Null => return Ok(MultiplierMap::default()),
            other => {
                return Err(D::Error::custom(format!(
                    "expected a multiplier map, got {other}"
                )));
            }
        };

        let mut entries = BTreeMap::new();
        flatten_entries(None, object, &mut entries).map_err(D::Error::custom)?;
        Ok(MultiplierMap(entries))
    }
}

/// Flattens a normalized JSON object into the canonical keyed mapping.
///
/// Nested objects contribute dot-joined compound keys; every leaf must be a
/// decimal multiplier.
fn flatten_entries(
    prefix: Option<&str>,
    object: serde_json::Map<String, Value>,
    entries: &mut BTreeMap<String, Decimal>,
) -> Result<(), String> {
    for (key, value) in object {
        let full_key = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key,
        };
        match value {
            Value::Object(nested) => flatten_entries(Some(&full_key), nested, entries)?,
            leaf => {
                let multiplier: Decimal = serde_json::from_value(leaf)
                    .map_err(|e| format!("invalid multiplier for '{full_key}': {e}"))?;
                entries.insert(full_key, multiplier);
            }
        }
    }
    Ok(())
}

/// Normalizes the map-vs-object ambiguity of stored multiplier tables.
///
/// Ordered maps serialize as lists of `[key, value]` entries; plain objects
/// stay objects. Both become JSON objects with stringified keys. Values are
/// normalized recursively so nested maps collapse the same way; scalars pass
/// through untouched.
fn normalize_keyed(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, normalize_keyed(v)))
                .collect(),
        ),
        Value::Array(items) if items.iter().all(is_entry_pair) => Value::Object(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Array(mut pair) => {
                        let value = pair.pop()?;
                        let key = pair.pop()?;
                        Some((entry_key(&key), normalize_keyed(value)))
                    }
                    _ => None,
                })
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Returns true when a JSON value looks like one `[key, value]` map entry.
fn is_entry_pair(value: &Value) -> bool {
    match value {
        Value::Array(pair) => pair.len() == 2 && (pair[0].is_string() || pair[0].is_number()),
        _ => false,
    }
}

/// Renders a map-entry key as its canonical string form.
fn entry_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One explicit occupancy combination entry.
///
/// Combination entries take precedence over the per-adult and per-child
/// multiplier maps: an exact `(adults, children)` match wins outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationEntry {
    /// Number of adults in the combination.
    pub adults: u32,
    /// Number of children in the combination.
    pub children: u32,
    /// The multiplier applied to the unit price for this combination.
    pub multiplier: Decimal,
}

/// Occupancy multiplier configuration for a room type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiplierTemplate {
    /// Multiplier per adult count, keyed by the count.
    #[serde(default)]
    pub adult_multipliers: MultiplierMap,
    /// Multiplier per child age group, keyed by the group id.
    #[serde(default)]
    pub child_multipliers: MultiplierMap,
    /// Explicit combination entries, matched before the per-guest maps.
    #[serde(default)]
    pub combination_table: Vec<CombinationEntry>,
    /// Rounding applied once to the final multiplied amount.
    #[serde(default)]
    pub rounding_rule: RoundingRule,
}

impl MultiplierTemplate {
    /// Finds an exact combination entry for `(adults, children)`.
    pub fn combination(&self, adults: u32, children: u32) -> Option<&CombinationEntry> {
        self.combination_table
            .iter()
            .find(|entry| entry.adults == adults && entry.children == children)
    }
}

/// Allowed adult occupancy range for a room type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyRange {
    /// Minimum number of adults required to book the room.
    pub min_adults: u32,
    /// Maximum number of adults the room sleeps.
    pub max_adults: u32,
}

/// A hotel room type: the base layer of the override hierarchy.
///
/// Room types carry the staff-edited defaults that Markets, Seasons, and
/// Rates may override for specific sales scopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    /// Identifier assigned by the admin store.
    pub id: String,
    /// Display name, e.g. "Deluxe Double".
    pub name: String,
    /// Allowed adult occupancy range.
    pub occupancy: OccupancyRange,
    /// How the nightly price is interpreted.
    pub pricing_type: PricingType,
    /// Whether occupancy multipliers apply to unit pricing.
    #[serde(default)]
    pub use_multipliers: bool,
    /// The multiplier template, when multipliers are in use.
    #[serde(default)]
    pub multiplier_template: Option<MultiplierTemplate>,
}
