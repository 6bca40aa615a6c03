//! Program definitions and the Phase 2 transform.
//!
//! Phase 1 is fixed data. Phase 2 is derived from it:
//! - Non-main-lift rest drops by 15s (floored at 0)
//! - Template A: one extra set of bench press and goblet squats
//! - Template B: overhead press becomes clean and press
//! - Template C: the 10-minute AMRAP finisher becomes a 15-minute one
//!
//! Both phases are built once and shared; [`workouts`] selects by phase flag.

use crate::{Category, ExercisePrescription, ProgramPhase, ProgramTemplate, RepsTarget, WorkoutLetter};
use once_cell::sync::Lazy;

/// Exercises exempt from the Phase 2 rest reduction
pub const MAIN_LIFTS: [&str; 4] = [
    "Two-Hand Kettlebell Swings",
    "Dumbbell Bench Press",
    "Goblet Squats",
    "Double Kettlebell Deadlifts",
];

/// Seconds removed from non-main-lift rest in Phase 2
pub const PHASE2_REST_REDUCTION: u32 = 15;

static PHASE1: Lazy<ProgramPhase> = Lazy::new(build_phase1);
static PHASE2: Lazy<ProgramPhase> = Lazy::new(|| phase2_transform(&PHASE1));

pub fn is_main_lift(name: &str) -> bool {
    MAIN_LIFTS.contains(&name)
}

/// The base program
pub fn phase1() -> &'static ProgramPhase {
    &PHASE1
}

/// The derived Phase 2 program
pub fn phase2() -> &'static ProgramPhase {
    &PHASE2
}

/// Templates in effect for the given phase flag
pub fn workouts(is_phase2: bool) -> &'static ProgramPhase {
    if is_phase2 {
        phase2()
    } else {
        phase1()
    }
}

fn count(n: u32) -> RepsTarget {
    RepsTarget::Count(n)
}

fn text(s: &str) -> RepsTarget {
    RepsTarget::Text(s.to_string())
}

fn build_phase1() -> ProgramPhase {
    use Category::*;
    type P = ExercisePrescription;

    ProgramPhase {
        a: ProgramTemplate {
            letter: WorkoutLetter::A,
            exercises: vec![
                P::new(Power, "Two-Hand Kettlebell Swings", 5, count(15), 60),
                P::new(Strength, "Dumbbell Bench Press", 4, text("8-12"), 90),
                P::new(Strength, "Goblet Squats", 4, count(10), 90),
                P::new(Accessory, "Bent-Over Dumbbell Rows", 3, text("12-15"), 60),
                P::new(Core, "Plank Series", 3, text("45s + 30s + 30s"), 30),
            ],
        },
        b: ProgramTemplate {
            letter: WorkoutLetter::B,
            exercises: vec![
                P::new(Strength, "Double Kettlebell Deadlifts", 4, count(8), 90),
                P::new(Strength, "Single-Arm Overhead Press", 4, text("8-10 each"), 75),
                P::new(Accessory, "Renegade Rows", 3, text("8-10 each"), 60),
                P::new(Endurance, "Kettlebell Clean", 5, text("5 each"), 60),
                P::new(Core, "Leg Raises & Twists", 3, text("15 + 20"), 45),
            ],
        },
        c: ProgramTemplate {
            letter: WorkoutLetter::C,
            exercises: vec![
                P::new(Complex, "Kettlebell Front Squats", 4, count(10), 90),
                P::new(Complex, "Push-ups", 4, text("AMRAP"), 60),
                P::new(Complex, "Alternating Lunges", 3, text("10 each"), 60),
                P::new(Finisher, "10-Minute AMRAP", 1, text("As Many Rounds As Possible"), 0),
            ],
        },
    }
}

/// Apply the Phase 2 rest reduction to every exercise of a template
fn reduce_rest(template: &ProgramTemplate) -> ProgramTemplate {
    let exercises = template
        .exercises
        .iter()
        .map(|ex| {
            let mut ex = ex.clone();
            if ex.rest_seconds > 0 && !is_main_lift(&ex.name) {
                ex.rest_seconds = ex.rest_seconds.saturating_sub(PHASE2_REST_REDUCTION);
            }
            ex
        })
        .collect();

    ProgramTemplate {
        letter: template.letter,
        exercises,
    }
}

/// Derive Phase 2 from a Phase 1 program
///
/// Each substitution is a no-op when its target exercise is absent.
pub fn phase2_transform(base: &ProgramPhase) -> ProgramPhase {
    let mut a = reduce_rest(&base.a);
    for ex in a.exercises.iter_mut() {
        if ex.name == "Dumbbell Bench Press" || ex.name == "Goblet Squats" {
            ex.sets += 1;
        }
    }

    // Replacements carry their final rest values and are not reduced again
    let mut b = reduce_rest(&base.b);
    if let Some(idx) = b
        .exercises
        .iter()
        .position(|e| e.name == "Single-Arm Overhead Press")
    {
        b.exercises[idx] = ExercisePrescription::new(
            Category::Strength,
            "Kettlebell Clean and Press",
            4,
            text("8-10 each"),
            75,
        );
    }

    let mut c = reduce_rest(&base.c);
    if let Some(idx) = c.exercises.iter().position(|e| e.name.contains("AMRAP")) {
        c.exercises[idx] = ExercisePrescription::new(
            Category::Finisher,
            "15-Minute AMRAP",
            1,
            text("As Many Rounds As Possible"),
            0,
        );
    }

    tracing::debug!("Derived Phase 2 program");
    ProgramPhase { a, b, c }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest_of(template: &ProgramTemplate, name: &str) -> u32 {
        template.find(name).unwrap().rest_seconds
    }

    #[test]
    fn test_phase1_shape() {
        let p1 = phase1();
        assert_eq!(p1.a.exercises.len(), 5);
        assert_eq!(p1.b.exercises.len(), 5);
        assert_eq!(p1.c.exercises.len(), 4);
        for letter in WorkoutLetter::ALL {
            assert_eq!(p1.template(letter).letter, letter);
        }
    }

    #[test]
    fn test_main_lifts_keep_rest() {
        let p1 = phase1();
        let p2 = phase2();
        for template in p1.templates() {
            for ex in template.exercises.iter().filter(|e| is_main_lift(&e.name)) {
                let phase2_ex = p2.template(template.letter).find(&ex.name).unwrap();
                assert_eq!(phase2_ex.rest_seconds, ex.rest_seconds, "{}", ex.name);
            }
        }
    }

    #[test]
    fn test_accessory_rest_reduced() {
        let p2 = phase2();
        assert_eq!(rest_of(&p2.a, "Bent-Over Dumbbell Rows"), 45);
        assert_eq!(rest_of(&p2.a, "Plank Series"), 15);
        assert_eq!(rest_of(&p2.b, "Leg Raises & Twists"), 30);
        assert_eq!(rest_of(&p2.c, "Kettlebell Front Squats"), 75);
    }

    #[test]
    fn test_template_a_extra_sets() {
        let p2 = phase2();
        assert_eq!(p2.a.find("Dumbbell Bench Press").unwrap().sets, 5);
        assert_eq!(p2.a.find("Goblet Squats").unwrap().sets, 5);
        assert_eq!(p2.a.find("Two-Hand Kettlebell Swings").unwrap().sets, 5);
        assert_eq!(p2.a.find("Bent-Over Dumbbell Rows").unwrap().sets, 3);
    }

    #[test]
    fn test_template_b_substitution_in_place() {
        let p2 = phase2();
        assert!(p2.b.find("Single-Arm Overhead Press").is_none());
        let cp = &p2.b.exercises[1];
        assert_eq!(cp.name, "Kettlebell Clean and Press");
        assert_eq!(cp.sets, 4);
        assert_eq!(cp.reps_target, RepsTarget::Text("8-10 each".into()));
        assert_eq!(cp.rest_seconds, 75);
    }

    #[test]
    fn test_template_c_finisher_replaced() {
        let p2 = phase2();
        let last = p2.c.exercises.last().unwrap();
        assert_eq!(last.name, "15-Minute AMRAP");
        assert_eq!(last.sets, 1);
        assert_eq!(last.rest_seconds, 0);
        assert!(p2.c.find("10-Minute AMRAP").is_none());
    }

    #[test]
    fn test_rest_floor_is_idempotent() {
        let mut base = phase1().clone();
        base.a.exercises[4].rest_seconds = 10;
        let once = phase2_transform(&base);
        assert_eq!(rest_of(&once.a, "Plank Series"), 0);

        let twice = phase2_transform(&once);
        assert_eq!(rest_of(&twice.a, "Plank Series"), 0);
    }

    #[test]
    fn test_missing_targets_are_noops() {
        let mut base = phase1().clone();
        base.b.exercises.retain(|e| e.name != "Single-Arm Overhead Press");
        base.c.exercises.retain(|e| !e.name.contains("AMRAP"));

        let p2 = phase2_transform(&base);
        assert_eq!(p2.b.exercises.len(), 4);
        assert!(p2.b.find("Kettlebell Clean and Press").is_none());
        assert_eq!(p2.c.exercises.len(), 3);
    }

    #[test]
    fn test_workouts_selects_by_flag() {
        assert_eq!(workouts(false), phase1());
        assert_eq!(workouts(true), phase2());
    }
}
