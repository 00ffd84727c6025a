use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};

use super::domain::TemplateId;

/// Source of "now" for template timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Formats an instant the way saved templates record `createdAt`.
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub trait TemplateIdGenerator: Send + Sync {
    fn next_id(&self) -> TemplateId;
}

/// Millisecond Unix timestamps rendered as decimal strings.
///
/// Two ids requested within the same millisecond would collide, so the
/// generator never hands out a value at or below the previous one.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last: AtomicI64,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&self, millis: i64) -> i64 {
        let mut previous = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = millis.max(previous + 1);
            match self.last.compare_exchange_weak(
                previous,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }
}

impl TemplateIdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> TemplateId {
        TemplateId(self.issue(Utc::now().timestamp_millis()).to_string())
    }
}

/// Deterministic `tpl-000001`, `tpl-000002`, ... ids.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateIdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> TemplateId {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        TemplateId(format!("tpl-{id:06}"))
    }
}
