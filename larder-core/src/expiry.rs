//! Expiry urgency classification.
//!
//! Pure functions of `(now, expiry_date)`. Callers pass the current wall-clock
//! time on every render; nothing here caches a "now".

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// How loudly an item should be flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Neutral,
    Warning,
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryLabel {
    Expired,
    ExpiredYesterday,
    ExpiringToday,
    ExpiringSoon,
}

impl ExpiryLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryLabel::Expired => "Expired",
            ExpiryLabel::ExpiredYesterday => "Expired Yesterday",
            ExpiryLabel::ExpiringToday => "Expiring Today",
            ExpiryLabel::ExpiringSoon => "Expiring Soon",
        }
    }
}

impl fmt::Display for ExpiryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryStatus {
    pub label: Option<ExpiryLabel>,
    pub severity: Severity,
}

impl ExpiryStatus {
    const NONE: Self = Self {
        label: None,
        severity: Severity::Neutral,
    };

    fn flagged(label: ExpiryLabel, severity: Severity) -> Self {
        Self {
            label: Some(label),
            severity,
        }
    }
}

/// Whole days from `now` until midnight UTC of `expiry`, rounded up.
pub fn days_until(now: DateTime<Utc>, expiry: NaiveDate) -> i64 {
    let expiry = expiry.and_time(NaiveTime::MIN).and_utc();
    let millis = (expiry - now).num_milliseconds();
    // Integer division truncates toward zero, which already rounds negatives up.
    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

pub fn classify(now: DateTime<Utc>, expiry: Option<NaiveDate>) -> ExpiryStatus {
    let Some(expiry) = expiry else {
        return ExpiryStatus::NONE;
    };

    match days_until(now, expiry) {
        d if d < -1 => ExpiryStatus::flagged(ExpiryLabel::Expired, Severity::Alert),
        -1 => ExpiryStatus::flagged(ExpiryLabel::ExpiredYesterday, Severity::Alert),
        0 => ExpiryStatus::flagged(ExpiryLabel::ExpiringToday, Severity::Warning),
        1..=2 => ExpiryStatus::flagged(ExpiryLabel::ExpiringSoon, Severity::Warning),
        _ => ExpiryStatus::NONE,
    }
}
