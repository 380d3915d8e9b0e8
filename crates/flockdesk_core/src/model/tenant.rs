//! Tenants ("churches") and the people they own.

use crate::model::id::{deserialize_id, deserialize_opt_id, PersonId, TenantId};
use crate::model::{require_text, validate_email, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Organizational scoping unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: TenantId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    /// Serialized as `ph_no` to match the console API.
    #[serde(default, rename = "ph_no")]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Person owned by a tenant, referenced by id from meetings and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Serialized as `church` to match the console API.
    #[serde(default, rename = "church", deserialize_with = "deserialize_opt_id")]
    pub tenant_id: Option<TenantId>,
}

impl Person {
    /// Checks the fields the people form requires.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("name", &self.name)?;
        validate_email(&self.email)
    }
}
