//! Per-call collaborators: who is asking, and when.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::executor::QueryExecutor;

/// Identity of the requester, stamped into `generatedBy`.
pub trait IdentityProvider {
    fn current_user(&self) -> String;
}

/// Time source, stamped into `generatedOn`.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity(pub String);

impl StaticIdentity {
    pub fn new(user: impl Into<String>) -> Self {
        Self(user.into())
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2017-06-01T12:30:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Collaborators one report generation runs against.
pub struct ReportContext<'a> {
    pub executor: &'a dyn QueryExecutor,
    pub identity: &'a dyn IdentityProvider,
    pub clock: &'a dyn Clock,
}

impl<'a> ReportContext<'a> {
    pub fn new(
        executor: &'a dyn QueryExecutor,
        identity: &'a dyn IdentityProvider,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            executor,
            identity,
            clock,
        }
    }
}
