//! The session collection and session construction helpers.
//!
//! At most one session exists per calendar date. Sessions are never removed.

use crate::schedule::ProgramWeek;
use crate::{ExerciseEntry, LoggedSet, ProgramTemplate, Session, WorkoutLetter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All logged sessions, keyed by date
///
/// Loading goes through `upsert`, so a blob holding two sessions for one date
/// keeps only the later one.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(from = "Vec<Session>", into = "Vec<Session>")]
pub struct SessionStore {
    sessions: Vec<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert, or replace whatever session already exists for that date
    ///
    /// A replacement moves to the end of the collection.
    pub fn upsert(&mut self, session: Session) {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.date != session.date);
        if self.sessions.len() < before {
            tracing::info!("Replacing session for {}", session.date);
        } else {
            tracing::info!("Adding session for {}", session.date);
        }
        self.sessions.push(session);
    }

    pub fn completed_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.completed).count()
    }

    pub fn by_date(&self, date: NaiveDate) -> Option<&Session> {
        self.sessions.iter().find(|s| s.date == date)
    }

    pub fn all(&self) -> &[Session] {
        &self.sessions
    }

    pub fn completed(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter().filter(|s| s.completed)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl FromIterator<Session> for SessionStore {
    fn from_iter<I: IntoIterator<Item = Session>>(iter: I) -> Self {
        let mut store = SessionStore::new();
        for session in iter {
            store.upsert(session);
        }
        store
    }
}

impl From<Vec<Session>> for SessionStore {
    fn from(sessions: Vec<Session>) -> Self {
        let loaded = sessions.len();
        let store: SessionStore = sessions.into_iter().collect();
        if store.len() < loaded {
            tracing::warn!(
                "Dropped {} duplicate-date session(s) from saved state",
                loaded - store.len()
            );
        }
        store
    }
}

impl From<SessionStore> for Vec<Session> {
    fn from(store: SessionStore) -> Self {
        store.sessions
    }
}

impl Session {
    /// A new session with a fresh id and program-week caches filled in
    pub fn create(
        date: NaiveDate,
        workout: WorkoutLetter,
        start_date: NaiveDate,
        entries: Vec<ExerciseEntry>,
        notes: impl Into<String>,
        completed: bool,
    ) -> Self {
        let mut session = Session {
            id: Uuid::new_v4(),
            date,
            workout,
            week: 0,
            entries,
            notes: notes.into(),
            completed,
            phase2: false,
        };
        session.stamp(start_date);
        session
    }

    /// Like [`Session::create`], but keeps the id of `existing` when given
    pub fn revise(
        existing: Option<&Session>,
        date: NaiveDate,
        workout: WorkoutLetter,
        start_date: NaiveDate,
        entries: Vec<ExerciseEntry>,
        notes: impl Into<String>,
        completed: bool,
    ) -> Self {
        let mut session = Self::create(date, workout, start_date, entries, notes, completed);
        if let Some(prev) = existing {
            session.id = prev.id;
        }
        session
    }

    /// Recompute the cached `week` and `phase2` fields
    pub fn stamp(&mut self, start_date: NaiveDate) {
        let pw = ProgramWeek::at(start_date, self.date);
        self.week = pw.week;
        self.phase2 = pw.phase2;
    }

    /// Whether the cached fields still match `start_date`
    pub fn cache_is_fresh(&self, start_date: NaiveDate) -> bool {
        let pw = ProgramWeek::at(start_date, self.date);
        self.week == pw.week && self.phase2 == pw.phase2
    }

    pub fn entry(&self, exercise_name: &str) -> Option<&ExerciseEntry> {
        self.entries.iter().find(|e| e.exercise_name == exercise_name)
    }
}

/// One entry per prescription, each with `sets` blank sets
pub fn blank_entries(template: &ProgramTemplate) -> Vec<ExerciseEntry> {
    template
        .exercises
        .iter()
        .map(|ex| ExerciseEntry {
            exercise_name: ex.name.clone(),
            sets: vec![LoggedSet::default(); ex.sets as usize],
        })
        .collect()
}

/// Write `set` into the first blank slot for `exercise_name`
///
/// Appends a slot when all are filled, and a new entry when the exercise is
/// not in `entries` yet.
pub fn record_set(entries: &mut Vec<ExerciseEntry>, exercise_name: &str, set: LoggedSet) {
    match entries.iter_mut().find(|e| e.exercise_name == exercise_name) {
        Some(entry) => match entry.sets.iter_mut().find(|s| s.is_blank()) {
            Some(slot) => *slot = set,
            None => entry.sets.push(set),
        },
        None => entries.push(ExerciseEntry {
            exercise_name: exercise_name.to_string(),
            sets: vec![set],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program;
    use crate::schedule::parse_iso_date;

    fn date(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn session_on(day: &str, letter: WorkoutLetter, completed: bool) -> Session {
        Session::create(date(day), letter, date("2024-01-01"), vec![], "", completed)
    }

    #[test]
    fn test_upsert_inserts_new_dates() {
        let mut store = SessionStore::new();
        store.upsert(session_on("2024-01-01", WorkoutLetter::A, true));
        store.upsert(session_on("2024-01-03", WorkoutLetter::B, true));
        assert_eq!(store.len(), 2);
        assert_eq!(store.completed_count(), 2);
    }

    #[test]
    fn test_upsert_replaces_same_date() {
        let mut store = SessionStore::new();
        let first = session_on("2024-01-01", WorkoutLetter::A, true);
        store.upsert(first.clone());

        let edited = Session::revise(
            store.by_date(date("2024-01-01")),
            date("2024-01-01"),
            WorkoutLetter::C,
            date("2024-01-01"),
            vec![],
            "felt strong",
            false,
        );
        store.upsert(edited);

        assert_eq!(store.len(), 1);
        let stored = store.by_date(date("2024-01-01")).unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.workout, WorkoutLetter::C);
        assert_eq!(stored.notes, "felt strong");
        assert!(!stored.completed);
        assert_eq!(store.completed_count(), 0);
    }

    #[test]
    fn test_create_mints_new_identity() {
        let mut store = SessionStore::new();
        let first = session_on("2024-01-01", WorkoutLetter::A, true);
        store.upsert(first.clone());
        let second = session_on("2024-01-01", WorkoutLetter::A, true);
        store.upsert(second.clone());

        assert_eq!(store.len(), 1);
        assert_ne!(first.id, second.id);
        assert_eq!(store.by_date(date("2024-01-01")).unwrap().id, second.id);
    }

    #[test]
    fn test_replacement_moves_to_end() {
        let mut store = SessionStore::new();
        store.upsert(session_on("2024-01-01", WorkoutLetter::A, true));
        store.upsert(session_on("2024-01-03", WorkoutLetter::B, true));
        store.upsert(session_on("2024-01-01", WorkoutLetter::C, true));
        let dates: Vec<_> = store.all().iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![date("2024-01-03"), date("2024-01-01")]);
    }

    #[test]
    fn test_by_date_missing() {
        let store = SessionStore::new();
        assert!(store.by_date(date("2024-01-01")).is_none());
    }

    #[test]
    fn test_cached_week_matches_recomputation() {
        let start = date("2024-01-01");
        for day in ["2023-12-30", "2024-01-01", "2024-01-20", "2024-02-05", "2024-09-01"] {
            let s = Session::create(date(day), WorkoutLetter::A, start, vec![], "", true);
            assert!(s.cache_is_fresh(start), "{}", day);
            assert_eq!(s.week, ProgramWeek::at(start, s.date).week);
        }

        let mut s = session_on("2024-02-05", WorkoutLetter::A, true);
        assert!(s.phase2);
        let moved_start = date("2024-02-01");
        assert!(!s.cache_is_fresh(moved_start));
        s.stamp(moved_start);
        assert!(s.cache_is_fresh(moved_start));
        assert!(!s.phase2);
    }

    #[test]
    fn test_blank_entries_follow_template() {
        let entries = blank_entries(&program::phase2().a);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[1].exercise_name, "Dumbbell Bench Press");
        assert_eq!(entries[1].sets.len(), 5);
        assert!(entries[1].sets.iter().all(LoggedSet::is_blank));
    }

    #[test]
    fn test_record_set_fills_slots_in_order() {
        let mut entries = blank_entries(&program::phase1().a);
        record_set(&mut entries, "Goblet Squats", LoggedSet::new("10", "20kg"));
        record_set(&mut entries, "Goblet Squats", LoggedSet::new("9", "20kg"));

        let squats = &entries[2];
        assert_eq!(squats.sets.len(), 4);
        assert_eq!(squats.sets[0], LoggedSet::new("10", "20kg"));
        assert_eq!(squats.sets[1], LoggedSet::new("9", "20kg"));
        assert!(squats.sets[2].is_blank());
    }

    #[test]
    fn test_record_set_appends_when_full_or_unknown() {
        let mut entries = vec![ExerciseEntry {
            exercise_name: "Push-ups".into(),
            sets: vec![LoggedSet::new("20", "")],
        }];
        record_set(&mut entries, "Push-ups", LoggedSet::new("18", ""));
        record_set(&mut entries, "Burpees", LoggedSet::new("10", ""));

        assert_eq!(entries[0].sets.len(), 2);
        assert_eq!(entries[1].exercise_name, "Burpees");
    }
}
