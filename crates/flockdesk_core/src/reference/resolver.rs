//! Person/task reference maps and their builders.

use crate::api::{ApiError, ChurchApi};
use crate::model::id::{PersonId, TaskId, TenantId};
use crate::model::task::Task;
use crate::model::tenant::Person;
use log::{info, warn};
use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Prefix of the display label used for ids with no resolver entry.
pub const UNKNOWN_ID_PREFIX: &str = "Unknown ID: ";

/// Which reference table a fetch was building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Person,
    Task,
}

impl ReferenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Task => "task",
        }
    }
}

/// Reference fetch failed; recovered by callers with an empty map.
#[derive(Debug)]
pub struct ReferenceFetchError {
    pub kind: ReferenceKind,
    pub tenant_id: TenantId,
    pub source: ApiError,
}

impl Display for ReferenceFetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to load {} references for tenant `{}`: {}",
            self.kind.as_str(),
            self.tenant_id,
            self.source
        )
    }
}

impl Error for ReferenceFetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Person id → display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonMap {
    names: HashMap<PersonId, String>,
}

impl PersonMap {
    /// Builds the map for `tenant_id`; later duplicates overwrite earlier ones.
    ///
    /// People explicitly owned by another tenant are dropped.
    pub fn from_people(tenant_id: &str, people: impl IntoIterator<Item = Person>) -> Self {
        let names = people
            .into_iter()
            .filter(|person| belongs_to(person.tenant_id.as_deref(), tenant_id, true))
            .map(|person| (person.id, person.name))
            .collect();
        Self { names }
    }

    /// Resolved name, or `None` when the id has no entry.
    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Display label; unresolved ids render as `Unknown ID: <id>`.
    pub fn label<'a>(&'a self, id: &str) -> Cow<'a, str> {
        match self.resolve(id) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(unknown_label(id)),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Task id → task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskMap {
    tasks: HashMap<TaskId, Task>,
}

impl TaskMap {
    /// Builds the map for `tenant_id` from an unscoped task list.
    ///
    /// Tasks without a tenant are dropped since the task endpoint is not
    /// tenant-scoped.
    pub fn from_tasks(tenant_id: &str, tasks: impl IntoIterator<Item = Task>) -> Self {
        let tasks = tasks
            .into_iter()
            .filter(|task| belongs_to(task.tenant_id.as_deref(), tenant_id, false))
            .map(|task| (task.id.clone(), task))
            .collect();
        Self { tasks }
    }

    pub fn resolve(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Display label; unresolved ids render as `Unknown ID: <id>`.
    pub fn label<'a>(&'a self, id: &str) -> Cow<'a, str> {
        match self.resolve(id) {
            Some(task) => Cow::Borrowed(task.task_name.as_str()),
            None => Cow::Owned(unknown_label(id)),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Reference tables for one tenant scope.
///
/// `Default` is the unscoped, empty set used before any tenant is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceMaps {
    tenant_id: Option<TenantId>,
    pub person: PersonMap,
    pub task: TaskMap,
}

impl ReferenceMaps {
    pub fn new(tenant_id: impl Into<TenantId>, person: PersonMap, task: TaskMap) -> Self {
        Self {
            tenant_id: Some(tenant_id.into()),
            person,
            task,
        }
    }

    /// Empty tables bound to `tenant_id`.
    pub fn empty(tenant_id: impl Into<TenantId>) -> Self {
        Self::new(tenant_id, PersonMap::default(), TaskMap::default())
    }

    /// Builds both tables for `tenant_id`, absorbing fetch failures.
    ///
    /// A failed table is replaced by an empty one, so search degrades to
    /// scalar fields instead of failing.
    pub fn load<A: ChurchApi + ?Sized>(api: &A, tenant_id: &str) -> Self {
        let started_at = Instant::now();
        let person = build_person_map(api, tenant_id).unwrap_or_else(|err| {
            log_fetch_failure(&err);
            PersonMap::default()
        });
        let task = build_task_map(api, tenant_id).unwrap_or_else(|err| {
            log_fetch_failure(&err);
            TaskMap::default()
        });
        info!(
            "event=reference_rebuild module=reference status=ok tenant_id={} people={} tasks={} duration_ms={}",
            tenant_id,
            person.len(),
            task.len(),
            started_at.elapsed().as_millis()
        );
        Self::new(tenant_id, person, task)
    }

    /// Tenant these tables were built for.
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }
}

/// Fetches the tenant's people once and builds the name table.
pub fn build_person_map<A: ChurchApi + ?Sized>(
    api: &A,
    tenant_id: &str,
) -> Result<PersonMap, ReferenceFetchError> {
    let people = api
        .fetch_people(tenant_id)
        .map_err(|source| ReferenceFetchError {
            kind: ReferenceKind::Person,
            tenant_id: tenant_id.to_string(),
            source,
        })?;
    Ok(PersonMap::from_people(tenant_id, people))
}

/// Fetches tasks once and builds the task table for `tenant_id`.
pub fn build_task_map<A: ChurchApi + ?Sized>(
    api: &A,
    tenant_id: &str,
) -> Result<TaskMap, ReferenceFetchError> {
    let tasks = api.fetch_tasks().map_err(|source| ReferenceFetchError {
        kind: ReferenceKind::Task,
        tenant_id: tenant_id.to_string(),
        source,
    })?;
    Ok(TaskMap::from_tasks(tenant_id, tasks))
}

/// Fallback label for an id with no resolver entry.
pub fn unknown_label(id: &str) -> String {
    format!("{UNKNOWN_ID_PREFIX}{id}")
}

fn belongs_to(record_tenant: Option<&str>, tenant_id: &str, allow_unscoped: bool) -> bool {
    match record_tenant {
        Some(value) => value == tenant_id,
        None => allow_unscoped,
    }
}

fn log_fetch_failure(err: &ReferenceFetchError) {
    warn!(
        "event=reference_fetch module=reference status=degraded kind={} tenant_id={} error={}",
        err.kind.as_str(),
        err.tenant_id,
        err.source
    );
}
