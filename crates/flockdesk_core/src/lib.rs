//! Core domain logic for the FlockDesk church console.
//! This crate decides which tenant records an actor may see and how they are
//! searched; transport and rendering live with its callers.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod reference;
pub mod scope;
pub mod search;
pub mod service;
pub mod session;
pub mod visibility;

pub use api::snapshot::{Snapshot, SnapshotApi};
pub use api::{ApiError, ApiResult, ChurchApi};
pub use config::{ConfigError, ConsoleConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::account::{Payment, UserAccount};
pub use model::actor::{Actor, PrivilegeTier};
pub use model::id::{ActorId, MeetingId, PersonId, TaskId, TenantId};
pub use model::meeting::Meeting;
pub use model::task::{Task, TaskPriority};
pub use model::tenant::{Person, Tenant};
pub use model::RecordValidationError;
pub use reference::resolver::{
    build_person_map, build_task_map, PersonMap, ReferenceFetchError, ReferenceMaps, TaskMap,
};
pub use scope::selector::{
    available_scopes, RebuildOutcome, ScopeError, ScopeOption, ScopeTicket, TenantScopeSelector,
};
pub use search::matcher::{matches, search_records, SearchQuery, Searchable};
pub use service::console::{ConsoleError, ConsoleResult, ConsoleService};
pub use service::navigation::{navigation, shows_scope_selector, NavItem};
pub use session::identity::{
    clear_session, current_actor, record_login, IdentityError, InMemorySessionStore, SessionStore,
};
pub use visibility::filter::{check_visibility, filter_visible, is_visible};
pub use visibility::record::{MalformedRecordError, RecordKind, ScopedRecord};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
