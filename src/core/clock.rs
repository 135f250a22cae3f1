use chrono::{
    DateTime, Datelike, Days, LocalResult, Months, NaiveDate, NaiveDateTime, TimeZone, Timelike,
    Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Upper bound on residual corrections when local midnight does not exist.
pub const MAX_ZONE_CORRECTIONS: usize = 3;

/// Source of the current instant, in Unix epoch milliseconds.
///
/// The engine never reads the wall clock directly; hosts inject a source so
/// that "today" highlighting and default anchors are deterministic in tests.
pub trait TimeSource {
    fn now_ms(&self) -> i64;
}

/// Wall-clock source backed by `chrono::Utc::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Source that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimeSource {
    now_ms: i64,
}

impl FixedTimeSource {
    #[must_use]
    pub const fn new(now_ms: i64) -> Self {
        Self { now_ms }
    }

    pub fn set(&mut self, now_ms: i64) {
        self.now_ms = now_ms;
    }
}

impl TimeSource for FixedTimeSource {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }
}

/// Calendar period used for boundary truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Day,
    /// ISO week, starting on Monday.
    Week,
    Month,
}

/// Zone-aware calendar arithmetic over epoch milliseconds.
///
/// All boundaries are computed in the configured IANA zone, never in the host
/// machine's local zone. Unknown zone identifiers resolve to UTC.
#[derive(Debug, Clone)]
pub struct TimeZoneClock<S> {
    zone: Tz,
    zone_id: String,
    fallback: bool,
    source: S,
}

impl<S: TimeSource> TimeZoneClock<S> {
    #[must_use]
    pub fn new(zone_id: &str, source: S) -> Self {
        let (zone, fallback) = resolve_zone(zone_id);
        Self {
            zone,
            zone_id: zone_id.to_owned(),
            fallback,
            source,
        }
    }

    #[must_use]
    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Identifier as supplied by the host, even when it failed to resolve.
    #[must_use]
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    /// Returns `true` when the supplied identifier was unknown and UTC is used.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn set_zone(&mut self, zone_id: &str) {
        let (zone, fallback) = resolve_zone(zone_id);
        self.zone = zone;
        self.zone_id = zone_id.to_owned();
        self.fallback = fallback;
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.source.now_ms()
    }

    /// Zone-local calendar date of "now".
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.local_date(self.now_ms())
    }

    #[must_use]
    pub fn zoned(&self, instant_ms: i64) -> DateTime<Tz> {
        Utc.timestamp_millis_opt(instant_ms)
            .single()
            .unwrap_or_default()
            .with_timezone(&self.zone)
    }

    #[must_use]
    pub fn local_datetime(&self, instant_ms: i64) -> NaiveDateTime {
        self.zoned(instant_ms).naive_local()
    }

    #[must_use]
    pub fn local_date(&self, instant_ms: i64) -> NaiveDate {
        self.zoned(instant_ms).date_naive()
    }

    #[must_use]
    pub fn local_hour(&self, instant_ms: i64) -> u32 {
        self.zoned(instant_ms).hour()
    }

    /// Formats an instant with a `chrono` strftime pattern in the clock's zone.
    #[must_use]
    pub fn format_local(&self, instant_ms: i64, pattern: &str) -> String {
        self.zoned(instant_ms).format(pattern).to_string()
    }

    /// Instant of local midnight starting the period that contains `instant_ms`.
    ///
    /// Idempotent: applying it to its own result returns the same instant.
    #[must_use]
    pub fn start_of_period(&self, instant_ms: i64, period: Period) -> i64 {
        let date = self.local_date(instant_ms);
        self.local_midnight(first_day_of_period(date, period))
    }

    /// Instant of local midnight starting the period after the one containing `instant_ms`.
    #[must_use]
    pub fn next_period_start(&self, instant_ms: i64, period: Period) -> i64 {
        let first = first_day_of_period(self.local_date(instant_ms), period);
        let next = match period {
            Period::Day => first.checked_add_days(Days::new(1)),
            Period::Week => first.checked_add_days(Days::new(7)),
            Period::Month => first.checked_add_months(Months::new(1)),
        };
        self.local_midnight(next.unwrap_or(first))
    }

    /// Earliest instant whose zone-local date is `date`.
    #[must_use]
    pub fn local_midnight(&self, date: NaiveDate) -> i64 {
        let Some(target) = date.and_hms_opt(0, 0, 0) else {
            return Utc.from_utc_datetime(&NaiveDateTime::default()).timestamp_millis();
        };

        match self.zone.from_local_datetime(&target) {
            LocalResult::Single(resolved) => resolved.timestamp_millis(),
            LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
            LocalResult::None => self.resolve_by_correction(target),
        }
    }

    // Midnight falls in a DST gap: walk the candidate by the observed local
    // residual until it stops shrinking. Lands on the first instant after the gap.
    fn resolve_by_correction(&self, target: NaiveDateTime) -> i64 {
        let target_ms = naive_as_utc_ms(target);
        let mut candidate = target_ms;
        let mut best = candidate;
        let mut best_residual = i64::MAX;

        for _ in 0..MAX_ZONE_CORRECTIONS {
            let observed = naive_as_utc_ms(self.local_datetime(candidate));
            let residual = observed - target_ms;
            if residual.abs() >= best_residual {
                break;
            }
            best = candidate;
            best_residual = residual.abs();
            if residual == 0 {
                break;
            }
            candidate -= residual;
        }

        best
    }
}

fn resolve_zone(zone_id: &str) -> (Tz, bool) {
    match zone_id.trim().parse::<Tz>() {
        Ok(zone) => (zone, false),
        Err(_) => {
            warn!(zone_id, "unknown time zone, falling back to UTC");
            (Tz::UTC, true)
        }
    }
}

fn first_day_of_period(date: NaiveDate, period: Period) -> NaiveDate {
    match period {
        Period::Day => date,
        Period::Week => {
            let offset = u64::from(date.weekday().num_days_from_monday());
            date.checked_sub_days(Days::new(offset)).unwrap_or(date)
        }
        Period::Month => date.with_day(1).unwrap_or(date),
    }
}

fn naive_as_utc_ms(value: NaiveDateTime) -> i64 {
    Utc.from_utc_datetime(&value).timestamp_millis()
}
