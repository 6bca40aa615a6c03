//! Week/phase calculation and the A/B/C rotation.
//!
//! All date arithmetic goes through a [`Clock`] so callers can inject "today".

use crate::{program, ProgramTemplate, WorkoutLetter};
use chrono::{Datelike, Local, NaiveDate, Weekday};

/// Last week the program defines; later dates stay on this week
pub const FINAL_WEEK: u32 = 8;

/// First week of Phase 2
pub const PHASE2_START_WEEK: u32 = 5;

/// Weekday names in the form stored in the schedule
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Source of the current calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Program week for `reference` given week 1 starts on `start`
///
/// Returns 0 before the start date, otherwise 1..=8.
pub fn week_between(start: NaiveDate, reference: NaiveDate) -> u32 {
    let diff_days = (reference - start).num_days();
    if diff_days < 0 {
        return 0;
    }
    let week = diff_days / 7 + 1;
    week.clamp(1, FINAL_WEEK as i64) as u32
}

/// Textual variant of [`week_between`]; unparseable input yields week 1
pub fn week_number(start_iso: &str, reference_iso: &str) -> u32 {
    match (parse_iso_date(start_iso), parse_iso_date(reference_iso)) {
        (Some(start), Some(reference)) => week_between(start, reference),
        _ => {
            tracing::warn!(
                "Unparseable program dates ({:?}, {:?}), assuming week 1",
                start_iso,
                reference_iso
            );
            1
        }
    }
}

pub fn is_phase2(week: u32) -> bool {
    week >= PHASE2_START_WEEK
}

/// Week number and phase flag for a reference date
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramWeek {
    pub week: u32,
    pub phase2: bool,
}

impl ProgramWeek {
    pub fn at(start: NaiveDate, reference: NaiveDate) -> Self {
        let week = week_between(start, reference);
        Self {
            week,
            phase2: is_phase2(week),
        }
    }

    pub fn today(start: NaiveDate, clock: &dyn Clock) -> Self {
        Self::at(start, clock.today())
    }

    /// Week 0 means the start date is still in the future
    pub fn has_started(&self) -> bool {
        self.week > 0
    }
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    let idx = match date.weekday() {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    };
    DAY_NAMES[idx]
}

/// Canonical spelling of a weekday name, case-insensitive
pub fn normalize_day_name(name: &str) -> Option<&'static str> {
    let wanted = name.trim();
    DAY_NAMES
        .iter()
        .copied()
        .find(|d| d.eq_ignore_ascii_case(wanted))
}

pub fn is_scheduled(schedule: &[String], date: NaiveDate) -> bool {
    let today = weekday_name(date);
    schedule.iter().any(|d| d == today)
}

/// Next letter in the A→B→C cycle
///
/// Driven only by how many sessions were completed, not by which letters.
pub fn next_letter(completed_count: usize) -> WorkoutLetter {
    WorkoutLetter::from_cycle(completed_count)
}

/// Today's letter, or `None` on a rest day
pub fn letter_for_day(
    schedule: &[String],
    date: NaiveDate,
    completed_count: usize,
) -> Option<WorkoutLetter> {
    if is_scheduled(schedule, date) {
        Some(next_letter(completed_count))
    } else {
        None
    }
}

/// Everything needed to show the workout for a given day
#[derive(Clone, Debug)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub program_week: ProgramWeek,
    pub letter: Option<WorkoutLetter>,
}

impl DayPlan {
    pub fn new(
        start: NaiveDate,
        schedule: &[String],
        date: NaiveDate,
        completed_count: usize,
    ) -> Self {
        Self {
            date,
            program_week: ProgramWeek::at(start, date),
            letter: letter_for_day(schedule, date, completed_count),
        }
    }

    pub fn is_rest_day(&self) -> bool {
        self.letter.is_none()
    }

    /// Template for the day, if it is a training day
    pub fn template(&self) -> Option<&'static ProgramTemplate> {
        self.letter
            .map(|l| program::workouts(self.program_week.phase2).template(l))
    }
}
