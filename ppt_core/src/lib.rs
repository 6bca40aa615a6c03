#![forbid(unsafe_code)]

//! Core domain model and business logic for the Progressive Performance Tracker.
//!
//! This crate provides:
//! - Domain types (prescriptions, templates, sessions, profile)
//! - Program definitions and the Phase 2 transform
//! - Week/phase calculation and the A/B/C rotation
//! - The session store and progress analytics
//! - Persistence (blob store, state) and the state container

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod numeric;
pub mod program;
pub mod library;
pub mod schedule;
pub mod store;
pub mod analytics;
pub mod state;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use schedule::{Clock, DayPlan, FixedClock, ProgramWeek, SystemClock};
pub use state::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use store::SessionStore;
pub use tracker::Tracker;
