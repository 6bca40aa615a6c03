use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ppt_core::analytics;
use ppt_core::schedule::{self, Clock};
use ppt_core::store::record_set;
use ppt_core::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ppt")]
#[command(about = "Progressive performance tracker for an 8-week strength program", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick training days, start date and equipment
    Setup {
        /// Exactly three weekday names, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        days: Vec<String>,

        /// Week 1 start date (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Equipment override, e.g. Swings=20kg
        #[arg(long = "equipment", value_parser = parse_equipment)]
        equipment: Vec<(String, String)>,
    },

    /// Show today's workout (default)
    Today,

    /// Log today's scheduled workout as completed
    Complete {
        /// Logged set as NAME:REPS:WEIGHT (repeat per set)
        #[arg(long = "set", value_parser = parse_set)]
        sets: Vec<(String, LoggedSet)>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Add or edit the session for any date
    Log {
        /// Session date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Workout letter (A, B or C)
        #[arg(long)]
        workout: Option<WorkoutLetter>,

        /// Logged set as NAME:REPS:WEIGHT (repeat per set)
        #[arg(long = "set", value_parser = parse_set)]
        sets: Vec<(String, LoggedSet)>,

        #[arg(long)]
        notes: Option<String>,

        /// Record the session as not completed
        #[arg(long)]
        incomplete: bool,
    },

    /// Calendar, volume, AMRAP results and personal records
    Progress,

    /// Exercise reference library
    Library {
        /// Filter by name
        query: Option<String>,
    },

    /// List logged sessions
    History,
}

type CliTracker = Tracker<FileBlobStore, FixedClock>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    ppt_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data_dir().to_path_buf());
    let today = cli.today.unwrap_or_else(|| SystemClock.today());
    tracing::debug!("Using data directory {:?}, today is {}", data_dir, today);

    let mut tracker = Tracker::open(FileBlobStore::new(&data_dir), FixedClock(today));

    match cli.command {
        Some(Commands::Setup {
            days,
            start,
            equipment,
        }) => cmd_setup(&mut tracker, &days, start, equipment),
        Some(Commands::Complete { sets, notes }) => cmd_complete(&mut tracker, sets, &notes),
        Some(Commands::Log {
            date,
            workout,
            sets,
            notes,
            incomplete,
        }) => cmd_log(&mut tracker, date, workout, sets, notes, incomplete),
        Some(Commands::Progress) => {
            cmd_progress(&tracker, &config);
            Ok(())
        }
        Some(Commands::Library { query }) => {
            cmd_library(&tracker, query.as_deref());
            Ok(())
        }
        Some(Commands::History) => {
            cmd_history(&tracker);
            Ok(())
        }
        Some(Commands::Today) | None => {
            cmd_today(&tracker);
            Ok(())
        }
    }
}

fn parse_equipment(s: &str) -> std::result::Result<(String, String), String> {
    let (slot, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=VALUE, got '{}'", s))?;
    if slot.trim().is_empty() {
        return Err("equipment slot cannot be empty".into());
    }
    Ok((slot.trim().to_string(), value.trim().to_string()))
}

fn parse_set(s: &str) -> std::result::Result<(String, LoggedSet), String> {
    let mut parts = s.rsplitn(3, ':');
    let weight = parts.next().unwrap_or_default();
    let (reps, name) = match (parts.next(), parts.next()) {
        (Some(reps), Some(name)) if !name.trim().is_empty() => (reps, name),
        _ => return Err(format!("expected NAME:REPS:WEIGHT, got '{}'", s)),
    };
    Ok((
        name.trim().to_string(),
        LoggedSet::new(reps.trim(), weight.trim()),
    ))
}

fn cmd_setup(
    tracker: &mut CliTracker,
    days: &[String],
    start: Option<NaiveDate>,
    equipment: Vec<(String, String)>,
) -> Result<()> {
    let start = start.unwrap_or_else(|| tracker.today());
    let equipment: BTreeMap<String, String> = equipment.into_iter().collect();
    tracker.complete_onboarding(days, start, equipment)?;

    println!("✓ Setup complete");
    println!("  Training days: {}", tracker.profile().schedule.join(", "));
    println!("  Week 1 starts: {}", tracker.profile().start_date);
    Ok(())
}

fn require_onboarding(tracker: &CliTracker) -> Result<()> {
    if tracker.is_onboarded() {
        Ok(())
    } else {
        Err(Error::Setup(
            "Run `ppt setup --days <three weekdays>` first".into(),
        ))
    }
}

fn print_header(tracker: &CliTracker) {
    let pw = tracker.program_week();
    println!("Progressive Performance Tracker");
    if !pw.has_started() {
        println!("Program starts on {}", tracker.profile().start_date);
    } else if pw.phase2 {
        println!("Week {} • Phase 2", pw.week);
    } else {
        println!("Week {}", pw.week);
    }
    println!();
}

fn cmd_today(tracker: &CliTracker) {
    print_header(tracker);

    if !tracker.is_onboarded() {
        println!("Quick setup needed: run `ppt setup --days Monday,Wednesday,Friday`.");
        return;
    }

    let plan = tracker.today_plan();
    let (Some(letter), Some(template)) = (plan.letter, plan.template()) else {
        println!("Rest Day");
        println!(
            "Today ({}) is not one of your scheduled training days. Recovery is part of the plan.",
            schedule::weekday_name(plan.date)
        );
        return;
    };

    println!("Workout {} • Week {}", letter, plan.program_week.week);
    if plan.program_week.phase2 {
        println!("Phase 2 Active");
    }
    println!();

    for (i, ex) in template.exercises.iter().enumerate() {
        let info = library::lookup(&ex.name);
        println!("  {}. {}", i + 1, ex.name);
        println!("     {} sets × {} reps", ex.sets, ex.reps_target);
        if plan.program_week.phase2 && !program::is_main_lift(&ex.name) && ex.rest_seconds > 0 {
            println!("     Rest: {}s (−15s in Phase 2)", ex.rest_seconds);
        } else {
            println!("     Rest: {}s", ex.rest_seconds);
        }
        println!("     Equipment: {}", info.equipment);
        println!(
            "     Cues: {}",
            library::cues_for(&ex.name, plan.program_week.phase2)
        );
    }
    println!();
}

fn cmd_complete(
    tracker: &mut CliTracker,
    sets: Vec<(String, LoggedSet)>,
    notes: &str,
) -> Result<()> {
    require_onboarding(tracker)?;

    let plan = tracker.today_plan();
    let Some(letter) = plan.letter else {
        println!(
            "Today ({}) is a rest day - nothing to log.",
            schedule::weekday_name(plan.date)
        );
        return Ok(());
    };

    let mut entries = tracker.blank_entries_for(plan.date, letter);
    for (name, set) in sets {
        record_set(&mut entries, &name, set);
    }

    let done = tracker.complete_today(letter, entries, notes);
    println!(
        "✓ Workout {} logged for {} (week {})",
        letter, done.session.date, done.session.week
    );
    if let Some(alert) = done.alert {
        println!();
        println!("{}", alert);
    }
    Ok(())
}

fn cmd_log(
    tracker: &mut CliTracker,
    date: NaiveDate,
    workout: Option<WorkoutLetter>,
    sets: Vec<(String, LoggedSet)>,
    notes: Option<String>,
    incomplete: bool,
) -> Result<()> {
    let existing = tracker.sessions().by_date(date).cloned();

    let letter = workout
        .or(existing.as_ref().map(|s| s.workout))
        .unwrap_or(WorkoutLetter::A);

    // Editing keeps logged entries even when the letter changes
    let mut entries = match &existing {
        Some(s) => s.entries.clone(),
        None => tracker.blank_entries_for(date, letter),
    };
    for (name, set) in sets {
        record_set(&mut entries, &name, set);
    }

    let notes = notes
        .or(existing.as_ref().map(|s| s.notes.clone()))
        .unwrap_or_default();

    let session = tracker.save_session(date, letter, entries, &notes, !incomplete);
    let verb = if existing.is_some() { "Updated" } else { "Added" };
    println!(
        "✓ {} workout {} on {} (week {}{})",
        verb,
        letter,
        session.date,
        session.week,
        if session.phase2 { ", Phase 2" } else { "" }
    );
    Ok(())
}

fn bar(value: f64, max: f64) -> String {
    const WIDTH: f64 = 24.0;
    let filled = ((value / max) * WIDTH).round().clamp(0.0, WIDTH) as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(WIDTH as usize - filled))
}

fn cmd_progress(tracker: &CliTracker, config: &Config) {
    let sessions = tracker.sessions().all();
    println!("Progress");
    println!();

    println!("Workout Calendar (past 8 weeks)");
    let days = analytics::calendar(sessions, tracker.today());
    for row in days.chunks(8) {
        let cells: Vec<String> = row
            .iter()
            .map(|d| match d.workout {
                Some(letter) => letter.to_string(),
                None => "·".to_string(),
            })
            .collect();
        println!(
            "  {}  {}",
            row.first().map(|d| d.date.to_string()).unwrap_or_default(),
            cells.join(" ")
        );
    }
    println!();

    println!("Volume Load");
    let volume = analytics::volume_by_exercise(sessions);
    let (bars, max) = analytics::key_lift_volumes(&volume, &config.progress.key_lifts);
    for (name, value) in &bars {
        println!("  {:<24} {} {}", name, bar(*value, max), value.round());
    }
    println!();

    println!("AMRAP Finisher (Workout C)");
    let amrap = analytics::amrap_history(sessions);
    if amrap.is_empty() {
        println!("  No AMRAP results yet.");
    }
    for r in &amrap {
        println!(
            "  {}  {} rounds + {} reps ({})",
            r.date, r.rounds, r.extra_reps, r.exercise
        );
    }
    println!();

    println!("Personal Records");
    let prs = analytics::personal_records(sessions);
    if prs.is_empty() {
        println!("  Log more sessions to unlock PRs.");
    }
    for pr in &prs {
        println!("  {}: {} reps @ {}", pr.exercise, pr.reps, pr.weight);
    }
}

fn cmd_library(tracker: &CliTracker, query: Option<&str>) {
    let phase2 = tracker.program_week().phase2;
    let items = match query {
        Some(q) => library::search(q),
        None => library::entries().collect(),
    };

    if items.is_empty() {
        let name = query.unwrap_or_default();
        let info = library::lookup(name);
        println!("{}", name);
        println!("  Equipment: {}", info.equipment);
        println!("  Cues: {}", info.cues);
        println!("  Video: {}", info.video_url);
        return;
    }

    for (name, info) in items {
        println!("{}", name);
        println!("  Equipment: {}", info.equipment);
        println!("  Cues: {}", library::cues_for(name, phase2));
        println!("  Video: {}", info.video_url);
    }
}

fn cmd_history(tracker: &CliTracker) {
    let mut sessions: Vec<&Session> = tracker.sessions().all().iter().collect();
    if sessions.is_empty() {
        println!("No sessions logged yet.");
        return;
    }
    sessions.sort_by_key(|s| s.date);

    for s in sessions {
        let logged: usize = s
            .entries
            .iter()
            .map(|e| e.sets.iter().filter(|set| !set.is_blank()).count())
            .sum();
        println!(
            "{}  Workout {}  week {}{}  {}  {} sets{}",
            s.date,
            s.workout,
            s.week,
            if s.phase2 { " (Phase 2)" } else { "" },
            if s.completed { "completed" } else { "incomplete" },
            logged,
            if s.notes.is_empty() {
                String::new()
            } else {
                format!("  \"{}\"", s.notes)
            }
        );
    }
}
