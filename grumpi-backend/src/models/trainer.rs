use serde::{Deserialize, Deserializer, Serialize};

/// A trainer record - the central entity of the game backend.
///
/// Records are persisted as one JSON array; older files may lack the
/// sequence fields or carry a non-numeric `currency`, so every field that
/// can be absent deserializes to a usable default instead of failing the
/// whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: u64,
    pub name: String,
    pub password: String,
    #[serde(default, deserialize_with = "lenient_currency")]
    pub currency: i64,
    #[serde(default)]
    pub creatures: Vec<String>,
    #[serde(default)]
    pub energies: Vec<String>,
    #[serde(default)]
    pub medals: Vec<String>,
    #[serde(default, rename = "combatItems")]
    pub combat_items: Vec<String>,
    #[serde(default, rename = "evolutionItems")]
    pub evolution_items: Vec<String>,
}

/// Accepts any JSON value where a currency balance is expected.
/// Numbers pass through (floats truncated toward zero); strings, null and
/// anything else count as 0.
fn lenient_currency<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_currency(&value))
}

pub fn coerce_currency(value: &serde_json::Value) -> i64 {
    value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        })
        .unwrap_or(0)
}

/// Which owned-item sequence an assignment appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Creature,
    Energy,
    Medal,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Creature => "creature",
            ItemKind::Energy => "energy",
            ItemKind::Medal => "medal",
        }
    }

    /// Parse the plural path segment used by the assignment routes.
    pub fn from_route(s: &str) -> Option<Self> {
        match s {
            "creatures" => Some(ItemKind::Creature),
            "energies" => Some(ItemKind::Energy),
            "medals" => Some(ItemKind::Medal),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request type for creating a trainer. Only the name is required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrainerRequest {
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, deserialize_with = "lenient_currency")]
    pub currency: i64,
}

/// Request type for updating profile fields. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTrainerRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub currency: Option<i64>,
}

/// Request type for assigning a creature, energy or medal.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignItemRequest {
    pub value: String,
}

/// Request type for depositing grumpidolars.
///
/// The amount stays a raw JSON value so that non-numeric input surfaces as
/// an `InvalidAmount` store error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct DepositRequest {
    #[serde(default)]
    pub amount: serde_json::Value,
}
