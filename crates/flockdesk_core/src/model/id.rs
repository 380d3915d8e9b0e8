//! Identifier aliases and wire decoding helpers.
//!
//! The console API emits numeric primary keys while session values are
//! strings; both are normalized to one string form so comparisons never
//! depend on the wire representation.

use serde::{Deserialize, Deserializer};

/// Tenant ("church") identifier.
pub type TenantId = String;
/// Authenticated actor (user account) identifier.
pub type ActorId = String;
/// Person identifier referenced by meeting attendees and task employees.
pub type PersonId = String;
/// Task identifier referenced by meeting tasks.
pub type TaskId = String;
/// Meeting identifier.
pub type MeetingId = String;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl RawId {
    fn into_id(self) -> String {
        match self {
            Self::Text(value) => value.trim().to_string(),
            Self::Int(value) => value.to_string(),
        }
    }
}

/// Decodes a required id given as JSON string or integer.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RawId::into_id)
}

/// Decodes an optional id; `null` and blank strings become `None`.
pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(RawId::into_id).filter(|value| !value.is_empty()))
}

/// Decodes an id list; `null` becomes an empty list.
pub fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawId>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(RawId::into_id)
        .collect())
}
