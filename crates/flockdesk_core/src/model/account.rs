//! Console user accounts and subscription payments.

use crate::model::actor::PrivilegeTier;
use crate::model::id::{deserialize_id, deserialize_opt_id, ActorId, TenantId};
use crate::model::{require_text, validate_email, RecordValidationError};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Login account of a console actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ActorId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    /// Serialized as `user_type`; unrecognized codes decode to `None`.
    #[serde(default, rename = "user_type", deserialize_with = "deserialize_lenient_tier")]
    pub tier: Option<PrivilegeTier>,
    /// Serialized as `church` to match the console API.
    #[serde(default, rename = "church", deserialize_with = "deserialize_opt_id")]
    pub tenant_id: Option<TenantId>,
}

impl UserAccount {
    /// Checks the fields the user form requires.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        validate_email(&self.email)
    }

    /// Tier label for listings; `-` when the stored code is unrecognized.
    pub fn tier_label(&self) -> &'static str {
        self.tier.map(PrivilegeTier::label).unwrap_or("-")
    }
}

/// Subscription payment made by a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(deserialize_with = "deserialize_id")]
    pub payment_id: String,
    /// Serialized as `church_id` to match the payments API.
    #[serde(default, rename = "church_id", deserialize_with = "deserialize_opt_id")]
    pub tenant_id: Option<TenantId>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub amount: f64,
    /// RFC 3339 timestamp as sent by the payments API.
    #[serde(default)]
    pub date: String,
}

impl Payment {
    /// Payment instant parsed from `date`.
    ///
    /// Accepts RFC 3339 timestamps (any offset, fractional seconds) and bare
    /// `YYYY-MM-DD` days taken as UTC midnight; anything else is `None`.
    pub fn paid_at(&self) -> Option<DateTime<FixedOffset>> {
        let value = self.date.trim();
        DateTime::parse_from_rfc3339(value).ok().or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|day| day.and_hms_opt(0, 0, 0))
                .map(|midnight| midnight.and_utc().fixed_offset())
        })
    }
}

fn deserialize_lenient_tier<'de, D>(deserializer: D) -> Result<Option<PrivilegeTier>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = deserialize_opt_id(deserializer)?;
    Ok(code.as_deref().and_then(PrivilegeTier::from_code))
}
