use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::clock::{Period, TimeSource, TimeZoneClock};
use crate::core::scale::GridScale;
use crate::core::zoom::{ViewMode, ZoomConfig, ZoomUnit};
use crate::error::{TimelineError, TimelineResult};

/// Hard cap on columns emitted for one view window.
pub const MAX_GRID_COLUMNS: usize = 5_000;

/// One ruler column: a tick `[start_ms, end_ms)` with zone-local labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridColumn {
    pub start_ms: i64,
    pub end_ms: i64,
    pub label: String,
    pub sub_label: Option<String>,
    pub is_today: bool,
}

/// Ruler columns plus the scale used to place everything else on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineGrid {
    pub view_start_ms: i64,
    pub view_end_ms: i64,
    pub zoom: ZoomConfig,
    pub scale: GridScale,
    pub columns: Vec<GridColumn>,
}

impl TimelineGrid {
    #[must_use]
    pub fn total_width_px(&self) -> f64 {
        self.scale.time_to_px(self.view_end_ms)
    }

    #[must_use]
    pub fn contains(&self, time_ms: i64) -> bool {
        time_ms >= self.view_start_ms && time_ms <= self.view_end_ms
    }
}

/// Builds zone-aware grids from a clock.
#[derive(Debug, Clone, Copy)]
pub struct GridBuilder<'a, S> {
    clock: &'a TimeZoneClock<S>,
}

impl<'a, S: TimeSource> GridBuilder<'a, S> {
    #[must_use]
    pub fn new(clock: &'a TimeZoneClock<S>) -> Self {
        Self { clock }
    }

    /// Calendar window of `mode` containing `anchor_ms`, as `(start, end)`.
    #[must_use]
    pub fn view_window(&self, anchor_ms: i64, mode: ViewMode) -> (i64, i64) {
        let period = mode.period();
        (
            self.clock.start_of_period(anchor_ms, period),
            self.clock.next_period_start(anchor_ms, period),
        )
    }

    /// Walks `[view_start_ms, view_end_ms]` in ticks of the zoom level.
    ///
    /// Minute and hour ticks are fixed durations. Day and week ticks follow the
    /// zone-local calendar, so every column starts at a local midnight and a
    /// DST transition day is 23 or 25 hours wide. The final column is truncated
    /// at `view_end_ms` so that columns cover the window exactly.
    pub fn build(
        &self,
        view_start_ms: i64,
        view_end_ms: i64,
        zoom: ZoomConfig,
    ) -> TimelineResult<TimelineGrid> {
        if view_end_ms <= view_start_ms {
            return Err(TimelineError::InvalidData(format!(
                "view window must be non-empty: start={view_start_ms}, end={view_end_ms}"
            )));
        }
        let scale = GridScale::new(view_start_ms, zoom)?;
        let tick_ms = zoom.tick_ms();
        let span = view_end_ms.saturating_sub(view_start_ms);
        let column_count = usize::try_from(span.saturating_add(tick_ms - 1) / tick_ms).unwrap_or(usize::MAX);
        if column_count > MAX_GRID_COLUMNS {
            return Err(TimelineError::InvalidData(format!(
                "zoom level yields {column_count} columns, limit is {MAX_GRID_COLUMNS}"
            )));
        }

        let today_key = self.today_key(zoom.unit);
        let mut columns = Vec::with_capacity(column_count);
        let mut previous_date: Option<NaiveDate> = None;
        let mut cursor = view_start_ms;
        while cursor < view_end_ms {
            if columns.len() == MAX_GRID_COLUMNS {
                return Err(TimelineError::InvalidData(format!(
                    "zoom level yields more than {MAX_GRID_COLUMNS} columns"
                )));
            }
            let end_ms = self.tick_end(cursor, zoom).min(view_end_ms);
            let date = self.clock.local_date(cursor);
            let (label, sub_label) = self.labels(cursor, zoom.unit, previous_date != Some(date));
            columns.push(GridColumn {
                start_ms: cursor,
                end_ms,
                label,
                sub_label,
                is_today: self.date_key(cursor, zoom.unit) == today_key,
            });
            previous_date = Some(date);
            cursor = end_ms;
        }

        trace!(
            columns = columns.len(),
            view_start_ms, view_end_ms, "built timeline grid"
        );
        Ok(TimelineGrid {
            view_start_ms,
            view_end_ms,
            zoom,
            scale,
            columns,
        })
    }

    /// Convenience: window for `mode` around `anchor_ms`, then `build`.
    pub fn build_for_view(
        &self,
        anchor_ms: i64,
        mode: ViewMode,
        zoom: ZoomConfig,
    ) -> TimelineResult<TimelineGrid> {
        let (start, end) = self.view_window(anchor_ms, mode);
        self.build(start, end, zoom)
    }

    fn tick_end(&self, cursor: i64, zoom: ZoomConfig) -> i64 {
        let days = match zoom.unit {
            ZoomUnit::Minute | ZoomUnit::Hour => return cursor.saturating_add(zoom.tick_ms()),
            ZoomUnit::Day => u64::from(zoom.step),
            ZoomUnit::Week => 7 * u64::from(zoom.step),
        };
        let end = self
            .clock
            .local_date(cursor)
            .checked_add_days(Days::new(days))
            .map(|date| self.clock.local_midnight(date));
        match end {
            Some(end) if end > cursor => end,
            _ => cursor.saturating_add(zoom.tick_ms()),
        }
    }

    // "Today" is a calendar-date comparison in the clock's zone, never a
    // millisecond range test, so DST days need no special casing.
    fn date_key(&self, instant_ms: i64, unit: ZoomUnit) -> NaiveDate {
        match unit {
            ZoomUnit::Week => self
                .clock
                .local_date(self.clock.start_of_period(instant_ms, Period::Week)),
            _ => self.clock.local_date(instant_ms),
        }
    }

    fn today_key(&self, unit: ZoomUnit) -> NaiveDate {
        self.date_key(self.clock.now_ms(), unit)
    }

    fn labels(&self, instant_ms: i64, unit: ZoomUnit, new_day: bool) -> (String, Option<String>) {
        match unit {
            ZoomUnit::Minute | ZoomUnit::Hour => (
                self.clock.format_local(instant_ms, "%H:%M"),
                new_day.then(|| self.clock.format_local(instant_ms, "%a %d %b")),
            ),
            ZoomUnit::Day => (
                self.clock.format_local(instant_ms, "%d"),
                Some(self.clock.format_local(instant_ms, "%a")),
            ),
            ZoomUnit::Week => (
                self.clock.format_local(instant_ms, "W%V"),
                Some(self.clock.format_local(instant_ms, "%d %b")),
            ),
        }
    }
}
