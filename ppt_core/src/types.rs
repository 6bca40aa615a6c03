//! Core domain types for the Progressive Performance Tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise prescriptions and program templates
//! - Logged sets, exercise entries and sessions
//! - The user profile and the persisted application state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::store::SessionStore;

// ============================================================================
// Program Types
// ============================================================================

/// Informational tag on a prescription
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Power,
    Strength,
    Accessory,
    Core,
    Endurance,
    Complex,
    Finisher,
}

/// Identifies one of the three rotating templates
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkoutLetter {
    A,
    B,
    C,
}

impl WorkoutLetter {
    /// Rotation order
    pub const ALL: [WorkoutLetter; 3] = [WorkoutLetter::A, WorkoutLetter::B, WorkoutLetter::C];

    /// Letter at position `index` of the A→B→C cycle
    pub fn from_cycle(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

impl fmt::Display for WorkoutLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkoutLetter::A => "A",
            WorkoutLetter::B => "B",
            WorkoutLetter::C => "C",
        };
        f.write_str(s)
    }
}

impl FromStr for WorkoutLetter {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(WorkoutLetter::A),
            "B" => Ok(WorkoutLetter::B),
            "C" => Ok(WorkoutLetter::C),
            other => Err(crate::Error::Other(format!(
                "Unknown workout letter '{}', expected A, B or C",
                other
            ))),
        }
    }
}

/// Rep target: a plain count or descriptive text ("8-12", "AMRAP")
///
/// Advisory only, nothing parses it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RepsTarget {
    Count(u32),
    Text(String),
}

impl fmt::Display for RepsTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepsTarget::Count(n) => write!(f, "{}", n),
            RepsTarget::Text(s) => f.write_str(s),
        }
    }
}

/// One planned exercise within a template
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExercisePrescription {
    pub name: String,
    pub category: Category,
    pub sets: u32,
    pub reps_target: RepsTarget,
    pub rest_seconds: u32,
}

impl ExercisePrescription {
    pub fn new(
        category: Category,
        name: &str,
        sets: u32,
        reps_target: RepsTarget,
        rest_seconds: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            category,
            sets,
            reps_target,
            rest_seconds,
        }
    }
}

/// An ordered list of prescriptions for one workout letter
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramTemplate {
    pub letter: WorkoutLetter,
    pub exercises: Vec<ExercisePrescription>,
}

impl ProgramTemplate {
    pub fn find(&self, name: &str) -> Option<&ExercisePrescription> {
        self.exercises.iter().find(|e| e.name == name)
    }
}

/// All three templates of one phase
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramPhase {
    pub a: ProgramTemplate,
    pub b: ProgramTemplate,
    pub c: ProgramTemplate,
}

impl ProgramPhase {
    pub fn template(&self, letter: WorkoutLetter) -> &ProgramTemplate {
        match letter {
            WorkoutLetter::A => &self.a,
            WorkoutLetter::B => &self.b,
            WorkoutLetter::C => &self.c,
        }
    }

    pub fn templates(&self) -> [&ProgramTemplate; 3] {
        [&self.a, &self.b, &self.c]
    }
}

// ============================================================================
// Session Types
// ============================================================================

/// One performed set, as typed by the user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoggedSet {
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub weight: String,
}

impl LoggedSet {
    pub fn new(reps: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            reps: reps.into(),
            weight: weight.into(),
        }
    }

    /// Nothing typed in either field yet
    pub fn is_blank(&self) -> bool {
        self.reps.trim().is_empty() && self.weight.trim().is_empty()
    }
}

/// Sets logged for one exercise within a session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseEntry {
    pub exercise_name: String,
    #[serde(default)]
    pub sets: Vec<LoggedSet>,
}

/// One logged calendar day of training
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub date: NaiveDate,
    pub workout: WorkoutLetter,
    /// Cached at save time; see [`Session::cache_is_fresh`]
    pub week: u32,
    #[serde(default)]
    pub entries: Vec<ExerciseEntry>,
    #[serde(default)]
    pub notes: String,
    pub completed: bool,
    /// Cached at save time
    #[serde(default)]
    pub phase2: bool,
}

// ============================================================================
// Profile and State Types
// ============================================================================

/// Per-installation user settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Equipment slot → free text, display only
    #[serde(default)]
    pub equipment: BTreeMap<String, String>,
    /// Training weekday names, e.g. "Monday"
    #[serde(default)]
    pub schedule: Vec<String>,
    pub start_date: NaiveDate,
}

/// The single persisted value
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    #[serde(default)]
    pub onboarded: bool,
    pub user: UserProfile,
    #[serde(default)]
    pub sessions: SessionStore,
}
