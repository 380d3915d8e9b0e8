//! Task record and priority levels.

use crate::model::id::{
    deserialize_id, deserialize_id_list, deserialize_opt_id, ActorId, PersonId, TaskId, TenantId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Parses a priority ignoring case; blank or unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Assignable unit of work owned by a tenant.
///
/// Dates are kept as the API's `YYYY-MM-DD` strings; the core only compares
/// them for equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: TaskId,
    /// Serialized as `church` to match the console API.
    #[serde(default, rename = "church", deserialize_with = "deserialize_opt_id")]
    pub tenant_id: Option<TenantId>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub created_by: Option<ActorId>,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub employees: Vec<PersonId>,
    #[serde(default)]
    pub task_name: String,
    /// Serialized as `task_description` to match the console API.
    #[serde(default, rename = "task_description")]
    pub description: String,
    /// Unrecognized or blank priorities decode to `None`.
    #[serde(default, deserialize_with = "deserialize_lenient_priority")]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Task {
    /// Creates an open task with only identity and ownership set.
    pub fn new(
        id: impl Into<TaskId>,
        tenant_id: impl Into<TenantId>,
        created_by: impl Into<ActorId>,
    ) -> Self {
        Self {
            id: id.into(),
            tenant_id: Some(tenant_id.into()),
            created_by: Some(created_by.into()),
            employees: Vec::new(),
            task_name: String::new(),
            description: String::new(),
            priority: None,
            start_date: String::new(),
            end_date: String::new(),
            is_completed: false,
            is_deleted: false,
        }
    }

    /// Calendar day the task is due, if `end_date` is a valid `YYYY-MM-DD`.
    pub fn due_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.end_date.trim(), "%Y-%m-%d").ok()
    }

    /// Returns whether this task is still shown in lists and calendars.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

fn deserialize_lenient_priority<'de, D>(deserializer: D) -> Result<Option<TaskPriority>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(TaskPriority::parse))
}
