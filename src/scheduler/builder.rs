//! Greedy earliest-feasible-slot schedule builder.
//!
//! # Algorithm
//!
//! 1. Take contests in pairing order.
//! 2. For each day (ascending), scan every field (ascending) from its cursor
//!    for the first free slot where both teams are rested and under the
//!    daily cap. Keep the earliest such slot of the day; ties go to the
//!    lower field.
//! 3. Use the first day that has a feasible slot; book it for both teams.
//! 4. If no day has one, fail with the contest.
//!
//! Each contest is placed once and never revisited (no backtracking).
//!
//! # Rest
//! A slot is rested for a team when it is at least `rest` minutes away from
//! every match the team already has on that day, before or after. This also
//! rules out two simultaneous matches on different fields, even with zero
//! rest. Rest does not carry across days.
//!
//! # Complexity
//! O(c * d * f * s) where c=contests, d=days, f=fields, s=slots per field
//! per day.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info, trace, warn};

use crate::error::CapacityError;
use crate::models::{Contest, Match, Schedule, ScheduleConfig, Slot, TimeWindow};
use crate::slots::SlotAllocator;

/// Greedy slot assignment.
///
/// The builder does not validate the configuration; run
/// [`validate_config`](crate::validation::validate_config) first or use
/// [`generate`](crate::generate).
///
/// # Example
///
/// ```
/// use fixture_schedule::scheduler::ScheduleBuilder;
/// use fixture_schedule::models::{Contest, ScheduleConfig, Team};
///
/// let contests = vec![
///     Contest::new(Team::new("A", "A"), Team::new("B", "B")),
///     Contest::new(Team::new("C", "C"), Team::new("D", "D")),
/// ];
/// let config = ScheduleConfig::new().with_fields(2);
/// let schedule = ScheduleBuilder::new(&config).build(&contests).unwrap();
/// assert_eq!(schedule.len(), 2);
/// // Disjoint pairs play in parallel.
/// assert_eq!(schedule.matches[0].slot.start, schedule.matches[1].slot.start);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    slots: SlotAllocator,
    rest: u32,
    daily_cap: Option<u32>,
}

/// Per-(day, field) booking state: first possibly-free candidate index plus
/// the indices taken beyond it.
#[derive(Debug, Default)]
struct FieldCursor {
    next_free: usize,
    taken: BTreeSet<usize>,
}

impl FieldCursor {
    fn is_taken(&self, index: usize) -> bool {
        index < self.next_free || self.taken.contains(&index)
    }

    fn take(&mut self, index: usize) {
        self.taken.insert(index);
        while self.taken.remove(&self.next_free) {
            self.next_free += 1;
        }
    }
}

/// Booking state for one generation call.
#[derive(Debug, Default)]
struct Bookings<'c> {
    fields: HashMap<(u32, u32), FieldCursor>,
    /// Booked windows per team ID, then per day.
    teams: HashMap<&'c str, HashMap<u32, Vec<TimeWindow>>>,
}

impl<'c> Bookings<'c> {
    fn team_day<'s>(&'s self, team_id: &str, day: u32) -> &'s [TimeWindow] {
        self.teams
            .get(team_id)
            .and_then(|days| days.get(&day))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn book(&mut self, contest: &'c Contest, slot: Slot, index: usize) {
        self.fields
            .entry((slot.day, slot.field))
            .or_default()
            .take(index);
        for id in [contest.home.id.as_str(), contest.away.id.as_str()] {
            self.teams
                .entry(id)
                .or_default()
                .entry(slot.day)
                .or_default()
                .push(slot.window());
        }
    }
}

impl ScheduleBuilder {
    /// Creates a builder for a configuration.
    pub fn new(config: &ScheduleConfig) -> Self {
        Self {
            slots: SlotAllocator::new(config),
            rest: config.rest,
            daily_cap: config.max_matches_per_day,
        }
    }

    /// Assigns every contest to a slot.
    ///
    /// # Errors
    /// [`CapacityError::Unplaceable`] with the first contest that has no
    /// feasible slot anywhere in the grid.
    pub fn build(&self, contests: &[Contest]) -> Result<Schedule, CapacityError> {
        let mut schedule = Schedule::new();
        let mut bookings = Bookings::default();

        for contest in contests {
            let Some((slot, index)) = self.find_slot(contest, &bookings) else {
                warn!(%contest, placed = schedule.len(), "no feasible slot");
                return Err(CapacityError::Unplaceable {
                    contest: Box::new(contest.clone()),
                });
            };
            trace!(%contest, %slot, "placed");
            bookings.book(contest, slot, index);
            schedule.add_match(Match::new(contest.clone(), slot));
        }

        info!(
            matches = schedule.len(),
            days_used = (0..self.slots.days())
                .filter(|&d| schedule.last_end_on_day(d).is_some())
                .count(),
            "schedule built"
        );
        Ok(schedule)
    }

    /// Earliest feasible slot on the first day that has one.
    fn find_slot(&self, contest: &Contest, bookings: &Bookings<'_>) -> Option<(Slot, usize)> {
        let home = contest.home.id.as_str();
        let away = contest.away.id.as_str();

        for day in 0..self.slots.days() {
            let home_day = bookings.team_day(home, day);
            let away_day = bookings.team_day(away, day);
            if self.at_cap(home_day) || self.at_cap(away_day) {
                continue;
            }

            let mut best: Option<(Slot, usize)> = None;
            for field in 0..self.slots.fields() {
                let cursor = bookings.fields.get(&(day, field));
                let skip = cursor.map_or(0, |c| c.next_free);

                for (index, slot) in self.slots.candidates(day, field).enumerate().skip(skip) {
                    if best.is_some_and(|(b, _)| slot.start >= b.start) {
                        break;
                    }
                    if cursor.is_some_and(|c| c.is_taken(index)) {
                        continue;
                    }
                    if self.is_rested(home_day, &slot) && self.is_rested(away_day, &slot) {
                        best = Some((slot, index));
                        break;
                    }
                }
            }

            if best.is_some() {
                return best;
            }
            debug!(%contest, day = day + 1, "no feasible slot on day, trying next");
        }
        None
    }

    fn at_cap(&self, booked: &[TimeWindow]) -> bool {
        self.daily_cap
            .is_some_and(|cap| booked.len() >= cap as usize)
    }

    fn is_rested(&self, booked: &[TimeWindow], slot: &Slot) -> bool {
        let (start, end) = (slot.start.minutes(), slot.end.minutes());
        booked.iter().all(|w| {
            start >= w.end.minutes().saturating_add(self.rest)
                || end.saturating_add(self.rest) <= w.start.minutes()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Team, TimeOfDay};
    use crate::validation::verify_schedule;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn contest(a: &str, b: &str) -> Contest {
        Contest::new(Team::new(a, a), Team::new(b, b))
    }

    fn starts(schedule: &Schedule) -> Vec<String> {
        schedule.iter().map(|m| m.slot.start.to_string()).collect()
    }

    #[test]
    fn test_sequential_single_field() {
        let config = ScheduleConfig::new().with_rest(0);
        let contests = vec![contest("A", "B"), contest("A", "C"), contest("B", "C")];
        let schedule = ScheduleBuilder::new(&config).build(&contests).unwrap();
        assert_eq!(starts(&schedule), vec!["09:00", "10:00", "11:00"]);
        assert!(schedule
            .iter()
            .all(|m| m.slot.field == 0 && m.slot.day == 0));
    }

    #[test]
    fn test_rest_pushes_later() {
        let config = ScheduleConfig::new().with_fields(2).with_rest(60);
        let contests = vec![contest("A", "B"), contest("A", "C"), contest("D", "E")];
        let schedule = ScheduleBuilder::new(&config).build(&contests).unwrap();
        // A-C must wait an hour after A-B ends; D-E fills the free 09:00 slot.
        assert_eq!(schedule.matches[1].slot.start, t("11:00"));
        assert_eq!(
            schedule.matches[2].slot,
            Slot::new(0, 1, t("09:00"), t("10:00"))
        );
        assert!(verify_schedule(&schedule, &config).is_empty());
    }

    #[test]
    fn test_earlier_gap_is_reused() {
        let config = ScheduleConfig::new().with_rest(60);
        let contests = vec![contest("A", "B"), contest("A", "C"), contest("D", "E")];
        let schedule = ScheduleBuilder::new(&config).build(&contests).unwrap();
        // 10:00 was skipped for A-C (rest) and is taken by D-E.
        assert_eq!(starts(&schedule), vec!["09:00", "11:00", "10:00"]);
    }

    #[test]
    fn test_no_simultaneous_matches_with_zero_rest() {
        let config = ScheduleConfig::new().with_fields(3).with_rest(0);
        let contests = vec![contest("A", "B"), contest("A", "C")];
        let schedule = ScheduleBuilder::new(&config).build(&contests).unwrap();
        assert_eq!(schedule.matches[1].slot.start, t("10:00"));
        assert_eq!(schedule.matches[1].slot.field, 0);
    }

    #[test]
    fn test_daily_cap_moves_to_next_day() {
        let config = ScheduleConfig::new()
            .with_days(2)
            .with_rest(0)
            .with_max_matches_per_day(1);
        let contests = vec![contest("A", "B"), contest("A", "C")];
        let schedule = ScheduleBuilder::new(&config).build(&contests).unwrap();
        assert_eq!(
            schedule.matches[1].slot,
            Slot::new(1, 0, t("09:00"), t("10:00"))
        );
    }

    #[test]
    fn test_break_respected() {
        let config = ScheduleConfig::new()
            .with_window(t("11:00"), t("15:00"))
            .with_midday_break(t("12:00"), t("13:00"))
            .with_rest(0);
        let contests = vec![contest("A", "B"), contest("C", "D"), contest("E", "F")];
        let schedule = ScheduleBuilder::new(&config).build(&contests).unwrap();
        assert_eq!(starts(&schedule), vec!["11:00", "13:00", "14:00"]);
    }

    #[test]
    fn test_unplaceable() {
        // Two slots, but the second encounter needs an hour of rest.
        let config = ScheduleConfig::new()
            .with_window(t("09:00"), t("11:00"))
            .with_rest(60);
        let contests = vec![contest("A", "B"), contest("B", "A")];
        let err = ScheduleBuilder::new(&config).build(&contests).unwrap_err();
        match err {
            CapacityError::Unplaceable { contest } => {
                assert_eq!(contest.home.id, "B");
                assert_eq!(contest.away.id, "A");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let builder = ScheduleBuilder::new(&ScheduleConfig::new());
        let schedule = builder.build(&[]).unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_bookings_lookup_by_team_and_day() {
        let contest = contest("A", "B");
        let slot = Slot::new(1, 0, t("10:00"), t("11:00"));
        let mut bookings = Bookings::default();
        bookings.book(&contest, slot, 1);

        let lookup_id = String::from("A");
        let booked = bookings.team_day(&lookup_id, 1);
        drop(lookup_id);
        assert_eq!(booked, &[slot.window()]);
        assert!(bookings.team_day("B", 0).is_empty());
        assert!(bookings.team_day("C", 1).is_empty());
        assert!(bookings.fields[&(1, 0)].is_taken(1));
    }

    #[test]
    fn test_field_cursor() {
        let mut c = FieldCursor::default();
        c.take(1);
        assert_eq!(c.next_free, 0);
        assert!(c.is_taken(1));
        assert!(!c.is_taken(0));
        c.take(0);
        assert_eq!(c.next_free, 2);
        assert!(c.taken.is_empty());
    }
}
