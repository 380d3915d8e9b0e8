//! External read API consumed by the core.
//!
//! # Responsibility
//! - Define the collaborator contract for fetching tenant-scoped collections.
//! - Provide a JSON snapshot implementation for the CLI and tests.
//!
//! # Invariants
//! - Fetches return complete collections; the core applies no pagination.
//! - Fetch results carry no visibility guarantees; callers must filter.

pub mod snapshot;

use crate::model::account::{Payment, UserAccount};
use crate::model::meeting::Meeting;
use crate::model::task::Task;
use crate::model::tenant::{Person, Tenant};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure surfaced by the external data-fetch collaborator.
#[derive(Debug)]
pub enum ApiError {
    /// The collaborator could not serve the request.
    Unavailable {
        operation: &'static str,
        message: String,
    },
    /// Payload could not be decoded.
    Decode(serde_json::Error),
    /// Payload source could not be read.
    Io(std::io::Error),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { operation, message } => {
                write!(f, "{operation} failed: {message}")
            }
            Self::Decode(err) => write!(f, "invalid API payload: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable { .. } => None,
            Self::Decode(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Read operations of the console API.
pub trait ChurchApi {
    fn fetch_meetings(&self) -> ApiResult<Vec<Meeting>>;
    fn fetch_tasks(&self) -> ApiResult<Vec<Task>>;
    fn fetch_people(&self, tenant_id: &str) -> ApiResult<Vec<Person>>;
    fn fetch_tenants(&self) -> ApiResult<Vec<Tenant>>;
    fn fetch_users(&self) -> ApiResult<Vec<UserAccount>>;
    fn fetch_payments(&self) -> ApiResult<Vec<Payment>>;
}

impl<A: ChurchApi + ?Sized> ChurchApi for &A {
    fn fetch_meetings(&self) -> ApiResult<Vec<Meeting>> {
        (**self).fetch_meetings()
    }

    fn fetch_tasks(&self) -> ApiResult<Vec<Task>> {
        (**self).fetch_tasks()
    }

    fn fetch_people(&self, tenant_id: &str) -> ApiResult<Vec<Person>> {
        (**self).fetch_people(tenant_id)
    }

    fn fetch_tenants(&self) -> ApiResult<Vec<Tenant>> {
        (**self).fetch_tenants()
    }

    fn fetch_users(&self) -> ApiResult<Vec<UserAccount>> {
        (**self).fetch_users()
    }

    fn fetch_payments(&self) -> ApiResult<Vec<Payment>> {
        (**self).fetch_payments()
    }
}
