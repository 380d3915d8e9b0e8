//! Meeting record.
//!
//! # Invariants
//! - `attendees` and `meeting_tasks` hold ids only; labels are resolved by
//!   the reference resolver, never stored here.
//! - `tenant_id`/`created_by` are optional on the wire; a meeting missing
//!   either is malformed and never visible.

use crate::model::id::{
    deserialize_id, deserialize_id_list, deserialize_opt_id, ActorId, MeetingId, PersonId, TaskId,
    TenantId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: MeetingId,
    /// Serialized as `church` to match the console API.
    #[serde(default, rename = "church", deserialize_with = "deserialize_opt_id")]
    pub tenant_id: Option<TenantId>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub created_by: Option<ActorId>,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub attendees: Vec<PersonId>,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub meeting_tasks: Vec<TaskId>,
    #[serde(default)]
    pub name: String,
    /// Serialized as `type` to match the console API.
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub agenda: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub action_steps: String,
    #[serde(default)]
    pub questions: String,
}

impl Meeting {
    /// Creates a meeting with only identity and ownership set.
    pub fn new(
        id: impl Into<MeetingId>,
        tenant_id: impl Into<TenantId>,
        created_by: impl Into<ActorId>,
    ) -> Self {
        Self {
            id: id.into(),
            tenant_id: Some(tenant_id.into()),
            created_by: Some(created_by.into()),
            attendees: Vec::new(),
            meeting_tasks: Vec::new(),
            name: String::new(),
            kind: String::new(),
            date: String::new(),
            time: String::new(),
            agenda: None,
            notes: None,
            objective: None,
            action_steps: String::new(),
            questions: String::new(),
        }
    }
}
