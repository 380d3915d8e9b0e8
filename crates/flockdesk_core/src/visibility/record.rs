//! Ownership view of the record kinds the visibility gate understands.

use crate::model::account::{Payment, UserAccount};
use crate::model::meeting::Meeting;
use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record kinds subject to visibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Meeting,
    Task,
    User,
    Payment,
}

/// What a Leader-tier actor may see of one record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderAccess {
    /// Records whose `created_by` equals the leader's actor id.
    Authored,
    /// Nothing; the kind carries no authorship.
    Denied,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Task => "task",
            Self::User => "user",
            Self::Payment => "payment",
        }
    }

    pub fn leader_access(self) -> LeaderAccess {
        match self {
            Self::Meeting | Self::Task => LeaderAccess::Authored,
            Self::User | Self::Payment => LeaderAccess::Denied,
        }
    }
}

/// Tenant and authorship fields of a record, as seen by the gate.
pub trait ScopedRecord {
    const KIND: RecordKind;

    fn record_id(&self) -> &str;
    fn tenant_id(&self) -> Option<&str>;
    fn created_by(&self) -> Option<&str>;

    /// Checks that the ownership fields the gate needs are present.
    fn check_well_formed(&self) -> Result<(), MalformedRecordError> {
        if self.tenant_id().is_none() {
            return Err(MalformedRecordError::new(Self::KIND, self.record_id(), "tenant_id"));
        }
        if Self::KIND.leader_access() == LeaderAccess::Authored && self.created_by().is_none() {
            return Err(MalformedRecordError::new(Self::KIND, self.record_id(), "created_by"));
        }
        Ok(())
    }
}

/// Record lacks an ownership field and is excluded from every collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecordError {
    pub kind: RecordKind,
    pub record_id: String,
    pub missing: &'static str,
}

impl MalformedRecordError {
    fn new(kind: RecordKind, record_id: &str, missing: &'static str) -> Self {
        Self {
            kind,
            record_id: record_id.to_string(),
            missing,
        }
    }
}

impl Display for MalformedRecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} `{}` is missing `{}`",
            self.kind.as_str(),
            self.record_id,
            self.missing
        )
    }
}

impl Error for MalformedRecordError {}

impl ScopedRecord for Meeting {
    const KIND: RecordKind = RecordKind::Meeting;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }
}

impl ScopedRecord for Task {
    const KIND: RecordKind = RecordKind::Task;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }
}

impl ScopedRecord for UserAccount {
    const KIND: RecordKind = RecordKind::User;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    fn created_by(&self) -> Option<&str> {
        None
    }
}

impl ScopedRecord for Payment {
    const KIND: RecordKind = RecordKind::Payment;

    fn record_id(&self) -> &str {
        &self.payment_id
    }

    fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    fn created_by(&self) -> Option<&str> {
        None
    }
}
