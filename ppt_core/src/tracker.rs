//! The application state container.
//!
//! A [`Tracker`] owns the [`AppState`], a [`BlobStore`] and a [`Clock`]. All
//! mutations go through it and are written through to the store right away.
//! A failed write is logged and otherwise ignored; the in-memory state stays
//! as mutated.

use crate::schedule::{self, Clock, DayPlan, ProgramWeek};
use crate::state::BlobStore;
use crate::store::{blank_entries, SessionStore};
use crate::{program, AppState, Error, ExerciseEntry, Result, Session, UserProfile, WorkoutLetter};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Training days a schedule must contain
pub const SCHEDULE_DAYS: usize = 3;

/// Check and canonicalize a training schedule
///
/// Exactly three distinct weekday names are required. Names are matched
/// case-insensitively and returned in their canonical spelling.
pub fn validate_schedule(days: &[String]) -> Result<Vec<String>> {
    let mut canonical: Vec<String> = Vec::with_capacity(days.len());
    for day in days {
        let name = schedule::normalize_day_name(day)
            .ok_or_else(|| Error::Setup(format!("'{}' is not a weekday name", day)))?;
        if canonical.iter().any(|d| d == name) {
            return Err(Error::Setup(format!("{} listed more than once", name)));
        }
        canonical.push(name.to_string());
    }

    if canonical.len() != SCHEDULE_DAYS {
        return Err(Error::Setup(format!(
            "Pick exactly {} training days, got {}",
            SCHEDULE_DAYS,
            canonical.len()
        )));
    }
    Ok(canonical)
}

/// Outcome of finishing today's live workout
#[derive(Clone, Debug)]
pub struct CompletedWorkout {
    pub session: Session,
    pub alert: Option<&'static str>,
}

pub struct Tracker<S: BlobStore, C: Clock> {
    state: AppState,
    store: S,
    clock: C,
}

impl<S: BlobStore, C: Clock> Tracker<S, C> {
    /// Load persisted state, or start from defaults
    pub fn open(store: S, clock: C) -> Self {
        let state = AppState::load(&store, clock.today());
        Self {
            state,
            store,
            clock,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn profile(&self) -> &UserProfile {
        &self.state.user
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.state.sessions
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn is_onboarded(&self) -> bool {
        self.state.onboarded
    }

    /// Current program week and phase
    pub fn program_week(&self) -> ProgramWeek {
        ProgramWeek::today(self.state.user.start_date, &self.clock)
    }

    /// Workout plan for today
    pub fn today_plan(&self) -> DayPlan {
        self.plan_for(self.today())
    }

    pub fn plan_for(&self, date: NaiveDate) -> DayPlan {
        DayPlan::new(
            self.state.user.start_date,
            &self.state.user.schedule,
            date,
            self.state.sessions.completed_count(),
        )
    }

    /// Entries to start logging `letter` on `date`, sized by that date's phase
    pub fn blank_entries_for(&self, date: NaiveDate, letter: WorkoutLetter) -> Vec<ExerciseEntry> {
        let pw = ProgramWeek::at(self.state.user.start_date, date);
        blank_entries(program::workouts(pw.phase2).template(letter))
    }

    /// Finish onboarding with a schedule, start date and equipment overrides
    pub fn complete_onboarding(
        &mut self,
        schedule: &[String],
        start_date: NaiveDate,
        equipment: BTreeMap<String, String>,
    ) -> Result<()> {
        let schedule = validate_schedule(schedule)?;
        self.mutate(|state| {
            state.user.schedule = schedule;
            state.user.start_date = start_date;
            state.user.equipment.extend(equipment);
            state.onboarded = true;
        });
        tracing::info!("Onboarding complete, week 1 starts {}", start_date);
        Ok(())
    }

    /// Apply an explicit profile edit
    ///
    /// The schedule is only checked during onboarding, so no validation here.
    pub fn update_profile<F>(&mut self, f: F)
    where
        F: FnOnce(&mut UserProfile),
    {
        self.mutate(|state| f(&mut state.user));
    }

    /// Store a completed workout for today under a fresh id
    pub fn complete_today(
        &mut self,
        letter: WorkoutLetter,
        entries: Vec<ExerciseEntry>,
        notes: &str,
    ) -> CompletedWorkout {
        let session = Session::create(
            self.today(),
            letter,
            self.state.user.start_date,
            entries,
            notes,
            true,
        );
        let alert = crate::analytics::bench_progress_alert(&session.entries);
        self.upsert(session.clone());
        CompletedWorkout { session, alert }
    }

    /// Add or edit the session for a past (or any) date
    ///
    /// Editing keeps the existing session's id.
    pub fn save_session(
        &mut self,
        date: NaiveDate,
        letter: WorkoutLetter,
        entries: Vec<ExerciseEntry>,
        notes: &str,
        completed: bool,
    ) -> Session {
        let session = Session::revise(
            self.state.sessions.by_date(date),
            date,
            letter,
            self.state.user.start_date,
            entries,
            notes,
            completed,
        );
        self.upsert(session.clone());
        session
    }

    fn upsert(&mut self, session: Session) {
        self.mutate(|state| state.sessions.upsert(session));
    }

    fn mutate<F>(&mut self, f: F)
    where
        F: FnOnce(&mut AppState),
    {
        f(&mut self.state);
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.state.save(&mut self.store) {
            tracing::warn!("Failed to save state: {}", e);
        }
    }
}
