//! Progress analytics derived from the session history.
//!
//! Everything here is recomputed from scratch on each call. Unless noted,
//! only completed sessions count. Reps and weights go through
//! [`crate::numeric`]; a set that fails to parse contributes nothing.

use crate::numeric::{parse_reps, parse_weight};
use crate::{ExerciseEntry, Session, WorkoutLetter};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Days shown in the calendar view (8 weeks, today included)
pub const CALENDAR_DAYS: i64 = 56;

/// Bench press reps on the last set that trigger the progress alert
pub const BENCH_ALERT_REPS: i64 = 12;

pub const BENCH_ALERT_MESSAGE: &str =
    "Progress Alert! You've mastered your current weight for 12 reps. Try increasing next session.";

/// One cell of the calendar heat map
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub workout: Option<WorkoutLetter>,
}

impl CalendarDay {
    pub fn has_session(&self) -> bool {
        self.workout.is_some()
    }
}

/// Best set ever logged for an exercise
#[derive(Clone, Debug, PartialEq)]
pub struct PersonalRecord {
    pub exercise: String,
    pub reps: i64,
    /// Weight exactly as typed
    pub weight: String,
    score: f64,
}

impl PersonalRecord {
    /// `reps × weight` of the winning set
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Result of one AMRAP finisher
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmrapResult {
    pub date: NaiveDate,
    pub rounds: i64,
    pub extra_reps: i64,
    pub exercise: String,
}

/// `reps × weight` for a single set, if both parse
fn set_load(reps: &str, weight: &str) -> Option<(i64, f64)> {
    let reps = parse_reps(reps)?;
    let weight = parse_weight(weight)?;
    Some((reps, reps as f64 * weight))
}

/// Session presence for the `CALENDAR_DAYS` days ending on `today`, oldest first
///
/// Counts every stored session, completed or not.
pub fn calendar<'a, I>(sessions: I, today: NaiveDate) -> Vec<CalendarDay>
where
    I: IntoIterator<Item = &'a Session>,
{
    let by_date: BTreeMap<NaiveDate, WorkoutLetter> =
        sessions.into_iter().map(|s| (s.date, s.workout)).collect();

    let first = today - Duration::days(CALENDAR_DAYS - 1);
    (0..CALENDAR_DAYS)
        .map(|offset| {
            let date = first + Duration::days(offset);
            CalendarDay {
                date,
                workout: by_date.get(&date).copied(),
            }
        })
        .collect()
}

/// Total `reps × weight` per exercise over completed sessions
pub fn volume_by_exercise<'a, I>(sessions: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut volume = BTreeMap::new();
    for session in sessions.into_iter().filter(|s| s.completed) {
        for entry in &session.entries {
            let total: f64 = entry
                .sets
                .iter()
                .filter_map(|set| set_load(&set.reps, &set.weight))
                .map(|(_, load)| load)
                .sum();
            *volume.entry(entry.exercise_name.clone()).or_insert(0.0) += total;
        }
    }
    volume
}

/// Volume for one exercise; 0 when nothing was logged
pub fn volume_for(volume: &BTreeMap<String, f64>, exercise: &str) -> f64 {
    volume.get(exercise).copied().unwrap_or(0.0)
}

/// Key-lift volumes in the given order, plus the bar-chart maximum (at least 1)
pub fn key_lift_volumes(
    volume: &BTreeMap<String, f64>,
    key_lifts: &[String],
) -> (Vec<(String, f64)>, f64) {
    let bars: Vec<(String, f64)> = key_lifts
        .iter()
        .map(|name| (name.clone(), volume_for(volume, name)))
        .collect();
    let max = bars.iter().map(|(_, v)| *v).fold(1.0, f64::max);
    (bars, max)
}

/// Baseline a set must beat to become the first record for an exercise
const NO_RECORD_SCORE: f64 = -1.0;

/// Best `reps × weight` set per exercise over completed sessions
///
/// Only a strictly higher score replaces a record, so ties keep the earliest
/// set. Records come out in order of each exercise's first qualifying set.
pub fn personal_records<'a, I>(sessions: I) -> Vec<PersonalRecord>
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut records: Vec<PersonalRecord> = Vec::new();

    for session in sessions.into_iter().filter(|s| s.completed) {
        for entry in &session.entries {
            for set in &entry.sets {
                let Some((reps, score)) = set_load(&set.reps, &set.weight) else {
                    continue;
                };

                match records.iter_mut().find(|r| r.exercise == entry.exercise_name) {
                    Some(record) if score > record.score => {
                        record.reps = reps;
                        record.weight = set.weight.clone();
                        record.score = score;
                    }
                    None if score > NO_RECORD_SCORE => records.push(PersonalRecord {
                        exercise: entry.exercise_name.clone(),
                        reps,
                        weight: set.weight.clone(),
                        score,
                    }),
                    Some(_) | None => {}
                }
            }
        }
    }

    records
}

fn amrap_entry(session: &Session) -> Option<&ExerciseEntry> {
    session
        .entries
        .iter()
        .find(|e| e.exercise_name.contains("AMRAP"))
}

/// AMRAP finisher results over completed sessions, newest first
///
/// The first logged set holds rounds in `reps` and leftover reps in `weight`.
/// Sessions whose rounds do not parse are left out.
pub fn amrap_history<'a, I>(sessions: I) -> Vec<AmrapResult>
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut results: Vec<AmrapResult> = sessions
        .into_iter()
        .filter(|s| s.completed)
        .filter_map(|session| {
            let entry = amrap_entry(session)?;
            let first = entry.sets.first();
            let rounds = parse_reps(first.map_or("", |s| s.reps.as_str()))?;
            let extra_reps = first.and_then(|s| parse_reps(&s.weight)).unwrap_or(0);
            Some(AmrapResult {
                date: session.date,
                rounds,
                extra_reps,
                exercise: entry.exercise_name.clone(),
            })
        })
        .collect();

    results.sort_by(|a, b| b.date.cmp(&a.date));
    results
}

/// Alert shown after a live workout when the last bench set hit the rep ceiling
pub fn bench_progress_alert(entries: &[ExerciseEntry]) -> Option<&'static str> {
    let bench = entries
        .iter()
        .find(|e| e.exercise_name == "Dumbbell Bench Press")?;
    let last_reps = bench.sets.last().map_or("", |s| s.reps.as_str());
    let last_reps = if last_reps.is_empty() { "0" } else { last_reps };

    match parse_reps(last_reps) {
        Some(reps) if reps >= BENCH_ALERT_REPS => Some(BENCH_ALERT_MESSAGE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::parse_iso_date;
    use crate::LoggedSet;

    fn date(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn entry(name: &str, sets: &[(&str, &str)]) -> ExerciseEntry {
        ExerciseEntry {
            exercise_name: name.into(),
            sets: sets.iter().map(|(r, w)| LoggedSet::new(*r, *w)).collect(),
        }
    }

    fn session(day: &str, completed: bool, entries: Vec<ExerciseEntry>) -> Session {
        Session::create(
            date(day),
            WorkoutLetter::A,
            date("2024-01-01"),
            entries,
            "",
            completed,
        )
    }

    #[test]
    fn test_volume_example() {
        let sessions = vec![session(
            "2024-01-01",
            true,
            vec![entry("Goblet Squats", &[("10", "20kg"), ("8", "20kg")])],
        )];
        let volume = volume_by_exercise(&sessions);
        assert_eq!(volume_for(&volume, "Goblet Squats"), 360.0);
        assert_eq!(volume_for(&volume, "Push-ups"), 0.0);
    }

    #[test]
    fn test_volume_skips_incomplete_sessions() {
        let sessions = vec![
            session("2024-01-01", true, vec![entry("Goblet Squats", &[("10", "20")])]),
            session("2024-01-03", false, vec![entry("Goblet Squats", &[("10", "20")])]),
        ];
        assert_eq!(volume_for(&volume_by_exercise(&sessions), "Goblet Squats"), 200.0);
    }

    #[test]
    fn test_malformed_weight_contributes_nothing() {
        let sessions = vec![session(
            "2024-01-01",
            true,
            vec![entry(
                "Goblet Squats",
                &[("10", "heavy"), ("8", "20kg"), ("", "20kg")],
            )],
        )];
        let volume = volume_by_exercise(&sessions);
        assert_eq!(volume_for(&volume, "Goblet Squats"), 160.0);

        let prs = personal_records(&sessions);
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].reps, 8);
        assert_eq!(prs[0].weight, "20kg");
    }

    #[test]
    fn test_pr_example() {
        let sessions = vec![session(
            "2024-01-01",
            true,
            vec![entry("Dumbbell Bench Press", &[("8", "20kg"), ("5", "24kg")])],
        )];
        let prs = personal_records(&sessions);
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].exercise, "Dumbbell Bench Press");
        assert_eq!(prs[0].reps, 8);
        assert_eq!(prs[0].weight, "20kg");
        assert_eq!(prs[0].score(), 160.0);
    }

    #[test]
    fn test_pr_ties_keep_earliest() {
        let sessions = vec![
            session("2024-01-01", true, vec![entry("Goblet Squats", &[("10", "20kg")])]),
            session("2024-01-03", true, vec![entry("Goblet Squats", &[("20", "10 kg")])]),
        ];
        let prs = personal_records(&sessions);
        assert_eq!(prs[0].weight, "20kg");
        assert_eq!(prs[0].reps, 10);
    }

    #[test]
    fn test_pr_ignores_negative_scores() {
        let sessions = vec![
            session("2024-01-01", true, vec![entry("Goblet Squats", &[("-3", "20kg")])]),
            session("2024-01-03", true, vec![entry("Goblet Squats", &[("0", "24kg")])]),
        ];
        let prs = personal_records(&sessions);
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].reps, 0);
        assert_eq!(prs[0].weight, "24kg");
        assert_eq!(prs[0].score(), 0.0);

        let only_negative = vec![session(
            "2024-01-01",
            true,
            vec![entry("Goblet Squats", &[("-3", "20kg")])],
        )];
        assert!(personal_records(&only_negative).is_empty());
    }

    #[test]
    fn test_pr_order_follows_first_appearance() {
        let sessions = vec![session(
            "2024-01-01",
            true,
            vec![
                entry("Two-Hand Kettlebell Swings", &[("15", "16kg")]),
                entry("Plank Series", &[("", "")]),
                entry("Goblet Squats", &[("10", "20kg")]),
            ],
        )];
        let names: Vec<_> = personal_records(&sessions)
            .into_iter()
            .map(|r| r.exercise)
            .collect();
        assert_eq!(names, vec!["Two-Hand Kettlebell Swings", "Goblet Squats"]);
    }

    #[test]
    fn test_amrap_sorted_newest_first() {
        let sessions = vec![
            session("2024-01-01", true, vec![entry("10-Minute AMRAP", &[("5", "3")])]),
            session("2024-01-08", true, vec![entry("10-Minute AMRAP", &[("6", "")])]),
        ];
        let history = amrap_history(&sessions);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, date("2024-01-08"));
        assert_eq!(history[0].rounds, 6);
        assert_eq!(history[0].extra_reps, 0);
        assert_eq!(history[1].date, date("2024-01-01"));
        assert_eq!(history[1].rounds, 5);
        assert_eq!(history[1].extra_reps, 3);
    }

    #[test]
    fn test_amrap_excludes_unparseable_rounds() {
        let sessions = vec![
            session("2024-01-01", true, vec![entry("15-Minute AMRAP", &[("lots", "3")])]),
            session("2024-01-03", true, vec![entry("15-Minute AMRAP", &[])]),
            session("2024-01-05", true, vec![entry("Push-ups", &[("20", "")])]),
            session("2024-01-08", true, vec![entry("15-Minute AMRAP", &[("7", "two")])]),
        ];
        let history = amrap_history(&sessions);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].rounds, 7);
        assert_eq!(history[0].extra_reps, 0);
        assert_eq!(history[0].exercise, "15-Minute AMRAP");
    }

    #[test]
    fn test_calendar_window() {
        let today = date("2024-03-01");
        let sessions = vec![
            session("2024-03-01", true, vec![]),
            session("2024-01-06", false, vec![]),
            session("2024-01-05", true, vec![]),
        ];
        let days = calendar(&sessions, today);
        assert_eq!(days.len(), 56);
        assert_eq!(days[0].date, date("2024-01-06"));
        assert_eq!(days[55].date, today);
        assert!(days[0].has_session());
        assert_eq!(days[55].workout, Some(WorkoutLetter::A));
        assert_eq!(days.iter().filter(|d| d.has_session()).count(), 2);
    }

    #[test]
    fn test_key_lift_volumes() {
        let sessions = vec![session(
            "2024-01-01",
            true,
            vec![entry("Goblet Squats", &[("10", "20kg")])],
        )];
        let volume = volume_by_exercise(&sessions);
        let lifts = vec!["Dumbbell Bench Press".to_string(), "Goblet Squats".to_string()];
        let (bars, max) = key_lift_volumes(&volume, &lifts);
        assert_eq!(bars[0].1, 0.0);
        assert_eq!(bars[1].1, 200.0);
        assert_eq!(max, 200.0);

        let (_, empty_max) = key_lift_volumes(&BTreeMap::new(), &lifts);
        assert_eq!(empty_max, 1.0);
    }

    #[test]
    fn test_bench_progress_alert() {
        let hit = vec![entry("Dumbbell Bench Press", &[("10", "12kg"), ("12", "12kg")])];
        assert_eq!(bench_progress_alert(&hit), Some(BENCH_ALERT_MESSAGE));

        let missed = vec![entry("Dumbbell Bench Press", &[("12", "12kg"), ("", "")])];
        assert_eq!(bench_progress_alert(&missed), None);

        let none = vec![entry("Goblet Squats", &[("15", "20kg")])];
        assert_eq!(bench_progress_alert(&none), None);
    }
}
