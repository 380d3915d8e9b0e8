//! JSON snapshot implementation of the console read API.
//!
//! # Responsibility
//! - Serve every `ChurchApi` read from one decoded JSON document.
//!
//! # Invariants
//! - Missing collections decode as empty; unknown fields are ignored.
//! - `fetch_people` returns only people of the requested tenant, matching the
//!   tenant-scoped person endpoint.

use crate::api::{ApiResult, ChurchApi};
use crate::model::account::{Payment, UserAccount};
use crate::model::meeting::Meeting;
use crate::model::task::Task;
use crate::model::tenant::{Person, Tenant};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete console dataset as one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Serialized as `churches` to match the console API.
    #[serde(default, rename = "churches")]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub users: Vec<UserAccount>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

/// `ChurchApi` served from an in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotApi {
    snapshot: Snapshot,
}

impl SnapshotApi {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Decodes a snapshot from JSON text.
    pub fn from_json(text: &str) -> ApiResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(text)?;
        Ok(Self::new(snapshot))
    }

    /// Reads and decodes a snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let api = Self::from_json(&text)?;
        info!(
            "event=snapshot_load module=api status=ok tenants={} meetings={} tasks={} people={}",
            api.snapshot.tenants.len(),
            api.snapshot.meetings.len(),
            api.snapshot.tasks.len(),
            api.snapshot.people.len()
        );
        Ok(api)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Mutable access for callers simulating create/update/delete round trips.
    pub fn snapshot_mut(&mut self) -> &mut Snapshot {
        &mut self.snapshot
    }
}

impl ChurchApi for SnapshotApi {
    fn fetch_meetings(&self) -> ApiResult<Vec<Meeting>> {
        Ok(self.snapshot.meetings.clone())
    }

    fn fetch_tasks(&self) -> ApiResult<Vec<Task>> {
        Ok(self.snapshot.tasks.clone())
    }

    fn fetch_people(&self, tenant_id: &str) -> ApiResult<Vec<Person>> {
        Ok(self
            .snapshot
            .people
            .iter()
            .filter(|person| person.tenant_id.as_deref() == Some(tenant_id))
            .cloned()
            .collect())
    }

    fn fetch_tenants(&self) -> ApiResult<Vec<Tenant>> {
        Ok(self.snapshot.tenants.clone())
    }

    fn fetch_users(&self) -> ApiResult<Vec<UserAccount>> {
        Ok(self.snapshot.users.clone())
    }

    fn fetch_payments(&self) -> ApiResult<Vec<Payment>> {
        Ok(self.snapshot.payments.clone())
    }
}
