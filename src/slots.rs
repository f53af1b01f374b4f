//! Slot allocation.
//!
//! Derives the bookable slots of every (day, field) pair from the daily
//! window, the match duration, and the midday break. Slots are produced
//! lazily; the full day/field grid is never materialized.
//!
//! # Rule
//! Candidate starts begin at the window start and advance by the match
//! duration. A candidate whose interval intersects the break is dropped and
//! the sequence resumes at the break end. The sequence stops at the first
//! candidate that would end after the window end. Every (day, field) pair
//! shares the same sequence of start times.

use crate::models::{ScheduleConfig, Slot, TimeOfDay, TimeWindow};

/// Enumerates bookable slots for a configuration.
#[derive(Debug, Clone, Copy)]
pub struct SlotAllocator {
    days: u32,
    fields: u32,
    window: TimeWindow,
    match_duration: u32,
    midday_break: Option<TimeWindow>,
}

impl SlotAllocator {
    /// Creates an allocator for a configuration.
    pub fn new(config: &ScheduleConfig) -> Self {
        Self {
            days: config.days,
            fields: config.fields,
            window: config.daily_window(),
            match_duration: config.match_duration,
            midday_break: config.midday_break,
        }
    }

    /// Number of days in the grid.
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Number of fields per day.
    pub fn fields(&self) -> u32 {
        self.fields
    }

    /// Candidate start times of one (day, field), in order.
    pub fn start_times(&self) -> StartTimes {
        let first = self.window.start.minutes();
        StartTimes {
            next: (self.match_duration > 0).then_some(first),
            window_end: self.window.end.minutes(),
            duration: self.match_duration,
            midday_break: self.midday_break,
        }
    }

    /// Candidate slots of one (day, field), in order.
    ///
    /// Empty if the day or field is outside the grid.
    pub fn candidates(&self, day: u32, field: u32) -> impl Iterator<Item = Slot> + '_ {
        let in_grid = day < self.days && field < self.fields;
        let duration = self.match_duration;
        self.start_times()
            .filter(move |_| in_grid)
            .filter_map(move |start| {
                let end = start.plus(duration)?;
                Some(Slot::new(day, field, start, end))
            })
    }

    /// The `index`-th candidate slot of a (day, field).
    pub fn slot(&self, day: u32, field: u32, index: usize) -> Option<Slot> {
        self.candidates(day, field).nth(index)
    }

    /// Number of candidate slots per field per day.
    pub fn slots_per_field_day(&self) -> usize {
        self.start_times().count()
    }

    /// Total slots in the grid: days x fields x slots per field per day.
    ///
    /// Saturates at `usize::MAX`.
    pub fn total_capacity(&self) -> usize {
        (self.days as usize)
            .saturating_mul(self.fields as usize)
            .saturating_mul(self.slots_per_field_day())
    }
}

/// Iterator over candidate start times of a single (day, field).
#[derive(Debug, Clone)]
pub struct StartTimes {
    next: Option<u32>,
    window_end: u32,
    duration: u32,
    midday_break: Option<TimeWindow>,
}

impl Iterator for StartTimes {
    type Item = TimeOfDay;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.next?;
            let end = start.saturating_add(self.duration);
            if end > self.window_end {
                self.next = None;
                return None;
            }
            if let Some(brk) = self.midday_break {
                let (bs, be) = (brk.start.minutes(), brk.end.minutes());
                if start < be && bs < end {
                    // start < be, so this always moves forward.
                    self.next = Some(be);
                    continue;
                }
            }
            self.next = Some(end);
            return TimeOfDay::from_minutes(start);
        }
    }
}
