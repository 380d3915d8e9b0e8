//! Console list use-cases.
//!
//! # Responsibility
//! - Resolve the actor once at the session boundary.
//! - Serve meeting/task/people/user/payment lists narrowed by visibility,
//!   then by search.
//! - Own the session's tenant scope selector.
//!
//! # Invariants
//! - Visibility is applied before search; search never widens a list.
//! - People and reference labels come only from the current reference
//!   tenant.

use crate::api::{ApiError, ChurchApi};
use crate::model::account::{Payment, UserAccount};
use crate::model::actor::Actor;
use crate::model::meeting::Meeting;
use crate::model::task::Task;
use crate::model::tenant::Person;
use crate::reference::resolver::ReferenceMaps;
use crate::scope::selector::{
    available_scopes, RebuildOutcome, ScopeError, ScopeOption, TenantScopeSelector,
};
use crate::search::matcher::search_records;
use crate::session::identity::{current_actor, IdentityError, SessionStore};
use crate::visibility::filter::filter_visible;
use chrono::NaiveDate;
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::cmp::Reverse;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

static CALENDAR_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});

/// Service error for console use-cases.
#[derive(Debug)]
pub enum ConsoleError {
    /// No valid actor; the caller must re-authenticate.
    Identity(IdentityError),
    /// Record collection fetch failed.
    Api(ApiError),
    Scope(ScopeError),
    /// Calendar date is not `YYYY-MM-DD`.
    InvalidDate(String),
}

impl Display for ConsoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity(err) => write!(f, "{err}"),
            Self::Api(err) => write!(f, "{err}"),
            Self::Scope(err) => write!(f, "{err}"),
            Self::InvalidDate(value) => {
                write!(f, "invalid calendar date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for ConsoleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Identity(err) => Some(err),
            Self::Api(err) => Some(err),
            Self::Scope(err) => Some(err),
            Self::InvalidDate(_) => None,
        }
    }
}

impl From<IdentityError> for ConsoleError {
    fn from(value: IdentityError) -> Self {
        Self::Identity(value)
    }
}

impl From<ApiError> for ConsoleError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<ScopeError> for ConsoleError {
    fn from(value: ScopeError) -> Self {
        Self::Scope(value)
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Console facade for one authenticated session.
pub struct ConsoleService<A: ChurchApi> {
    api: A,
    selector: TenantScopeSelector,
}

impl<A: ChurchApi> ConsoleService<A> {
    /// Opens a session for `actor` and loads references for its tenant.
    ///
    /// Owners start unscoped with empty references.
    pub fn open(api: A, actor: Actor) -> Self {
        let mut selector = TenantScopeSelector::new(actor);
        selector.refresh(&api);
        info!(
            "event=console_open module=service status=ok tier={} actor_id={}",
            selector.actor().tier().code(),
            selector.actor().actor_id()
        );
        Self { api, selector }
    }

    /// Resolves the actor from session state and opens the console.
    ///
    /// # Errors
    /// - `ConsoleError::Identity` when the session holds no valid actor.
    pub fn from_session(api: A, store: &dyn SessionStore) -> ConsoleResult<Self> {
        let actor = current_actor(store)?;
        Ok(Self::open(api, actor))
    }

    pub fn actor(&self) -> &Actor {
        self.selector.actor()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Mutable API access for callers performing mutations; follow with a
    /// list call to re-filter.
    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    pub fn scope(&self) -> Option<&str> {
        self.selector.scope()
    }

    pub fn selector(&self) -> &TenantScopeSelector {
        &self.selector
    }

    /// Selector access for callers running rebuilds off-thread.
    pub fn selector_mut(&mut self) -> &mut TenantScopeSelector {
        &mut self.selector
    }

    pub fn reference_maps(&self) -> Arc<ReferenceMaps> {
        self.selector.reference_maps()
    }

    /// Tenant choices for the scope selector; empty (and unfetched) for
    /// non-Owner actors.
    pub fn scope_options(&self) -> ConsoleResult<Vec<ScopeOption>> {
        if !self.selector.is_enabled() {
            return Ok(Vec::new());
        }
        let tenants = self.fetch("fetch_tenants", |api| api.fetch_tenants())?;
        Ok(available_scopes(self.actor(), &tenants))
    }

    /// Switches the Owner's scope and rebuilds references for it.
    pub fn select_scope(&mut self, tenant_id: &str) -> ConsoleResult<RebuildOutcome> {
        Ok(self.selector.select_and_rebuild(&self.api, tenant_id)?)
    }

    /// Rebuilds references for the current tenant, e.g. after people edits.
    pub fn refresh_references(&mut self) -> Option<RebuildOutcome> {
        self.selector.refresh(&self.api)
    }

    /// Visible meetings matching `query`, in source order.
    pub fn meetings(&self, query: &str) -> ConsoleResult<Vec<Meeting>> {
        let meetings = self.fetch("fetch_meetings", |api| api.fetch_meetings())?;
        let visible = filter_visible(self.actor(), meetings, self.scope());
        Ok(search_records(query, visible, &self.reference_maps()))
    }

    /// Visible, non-deleted tasks matching `query`, in source order.
    pub fn tasks(&self, query: &str) -> ConsoleResult<Vec<Task>> {
        let visible = self.active_visible_tasks()?;
        Ok(search_records(query, visible, &self.reference_maps()))
    }

    /// Visible, non-deleted tasks due on `date` (`YYYY-MM-DD`).
    ///
    /// # Errors
    /// - `ConsoleError::InvalidDate` when `date` is not a real calendar day.
    pub fn tasks_due_on(&self, date: &str) -> ConsoleResult<Vec<Task>> {
        let day = parse_calendar_day(date)?;
        let mut tasks = self.active_visible_tasks()?;
        tasks.retain(|task| task.due_date() == Some(day));
        Ok(tasks)
    }

    /// People of the reference tenant matching `query`.
    ///
    /// Empty for an Owner with no scope selected.
    pub fn people(&self, query: &str) -> ConsoleResult<Vec<Person>> {
        let Some(tenant_id) = self.selector.reference_tenant() else {
            return Ok(Vec::new());
        };
        let mut people = self.fetch("fetch_people", |api| api.fetch_people(tenant_id))?;
        people.retain(|person| {
            person
                .tenant_id
                .as_deref()
                .map_or(true, |value| value == tenant_id)
        });
        Ok(search_records(query, people, &self.reference_maps()))
    }

    /// Visible user accounts.
    pub fn users(&self) -> ConsoleResult<Vec<UserAccount>> {
        let users = self.fetch("fetch_users", |api| api.fetch_users())?;
        Ok(filter_visible(self.actor(), users, self.scope()))
    }

    /// Visible payments, newest first.
    ///
    /// Ordered by payment instant; unparseable dates go last and ties keep
    /// source order.
    pub fn payments(&self) -> ConsoleResult<Vec<Payment>> {
        let mut payments = self.fetch("fetch_payments", |api| api.fetch_payments())?;
        payments.sort_by_key(|payment| Reverse(payment.paid_at()));
        Ok(filter_visible(self.actor(), payments, self.scope()))
    }

    fn active_visible_tasks(&self) -> ConsoleResult<Vec<Task>> {
        let mut tasks = self.fetch("fetch_tasks", |api| api.fetch_tasks())?;
        tasks.retain(Task::is_active);
        Ok(filter_visible(self.actor(), tasks, self.scope()))
    }

    fn fetch<T>(
        &self,
        operation: &'static str,
        call: impl FnOnce(&A) -> Result<T, ApiError>,
    ) -> ConsoleResult<T> {
        call(&self.api).map_err(|err| {
            error!(
                "event=api_fetch module=service status=error operation={} error={}",
                operation, err
            );
            ConsoleError::Api(err)
        })
    }
}

fn parse_calendar_day(date: &str) -> ConsoleResult<NaiveDate> {
    let date = date.trim();
    if !CALENDAR_DATE_RE.is_match(date) {
        return Err(ConsoleError::InvalidDate(date.to_string()));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ConsoleError::InvalidDate(date.to_string()))
}
