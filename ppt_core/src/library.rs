//! Static exercise reference table.
//!
//! Maps exercise names to equipment, coaching cues and a demo video. Lookups
//! for names not in the table degrade to a placeholder instead of failing.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Shown for any field of an unknown exercise
pub const PLACEHOLDER: &str = "—";

const PLANK_PHASE2_CUE: &str = " • Phase 2: try lifting one foot off the ground.";

/// Reference information for one exercise
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExerciseInfo {
    pub equipment: &'static str,
    pub cues: &'static str,
    pub video_url: &'static str,
}

impl ExerciseInfo {
    const UNKNOWN: ExerciseInfo = ExerciseInfo {
        equipment: PLACEHOLDER,
        cues: PLACEHOLDER,
        video_url: PLACEHOLDER,
    };
}

static LIBRARY: Lazy<BTreeMap<&'static str, ExerciseInfo>> = Lazy::new(|| {
    let entries: [(&str, &str, &str, &str); 16] = [
        ("Two-Hand Kettlebell Swings", "16kg or 20kg KB", "Explode with your hips; hinge, don't squat.", "https://www.youtube.com/embed/2Z1QW1bZ8nE"),
        ("Dumbbell Bench Press", "12kg DBs", "Control the negative. Squeeze chest at lockout.", "https://www.youtube.com/embed/rT7DgCr-3pg"),
        ("Goblet Squats", "20kg KB", "Chest up, back straight. Drive your knees out.", "https://www.youtube.com/embed/6xwS9l3iUEM"),
        ("Bent-Over Dumbbell Rows", "12kg DBs", "Hinge, flat back; pull toward hips.", "https://www.youtube.com/embed/vT2GjY_Umpw"),
        ("Plank Series", "Bodyweight", "45s plank → 30s side plank (R) → 30s side plank (L).", "https://www.youtube.com/embed/pSHjTRCQxIw"),
        ("Double Kettlebell Deadlifts", "16kg KBs", "Flat back. Drive through heels.", "https://www.youtube.com/embed/2A5tVpw3tRk"),
        ("Single-Arm Overhead Press", "12kg DB or 16kg KB", "Brace core; press straight up.", "https://www.youtube.com/embed/qEwKCR5JCog"),
        ("Kettlebell Clean", "16kg KB", "Keep bell close; tame the arc.", "https://www.youtube.com/embed/p5L2w2QxwY8"),
        ("Kettlebell Clean and Press", "16kg KB", "Clean to rack, then press.", "https://www.youtube.com/embed/cFO2VYl9Dpo"),
        ("Renegade Rows", "10–12kg DBs", "Strong plank; row without rotating hips.", "https://www.youtube.com/embed/2z8JmcrW-As"),
        ("Leg Raises & Twists", "Bodyweight / 10kg KB", "15 leg raises then 20 Russian twists.", "https://www.youtube.com/embed/JB2oyawG9KI"),
        ("Kettlebell Front Squats", "10kg or 16kg KBs", "Rack position; core engaged.", "https://www.youtube.com/embed/4QYyQF_5k3U"),
        ("Push-ups", "Bodyweight", "Maintain a straight line head-to-heels.", "https://www.youtube.com/embed/IODxDxX7oi4"),
        ("Alternating Lunges", "12kg DBs", "Step forward; drop back knee near floor.", "https://www.youtube.com/embed/QOVaHwm-Q6U"),
        ("10-Minute AMRAP", "10kg & 16kg KBs", "8 Goblet Squats (16kg), 10 Swings (16kg), 12 Sit-ups.", "https://www.youtube.com/embed/3UWi44yN-wE"),
        ("15-Minute AMRAP", "10kg & 16kg KBs", "Same circuit; go 15 minutes.", "https://www.youtube.com/embed/3UWi44yN-wE"),
    ];

    entries
        .into_iter()
        .map(|(name, equipment, cues, video_url)| {
            (
                name,
                ExerciseInfo {
                    equipment,
                    cues,
                    video_url,
                },
            )
        })
        .collect()
});

/// Exact-name lookup
pub fn get(name: &str) -> Option<&'static ExerciseInfo> {
    LIBRARY.get(name)
}

/// Lookup that never fails; unknown names get [`PLACEHOLDER`] fields
pub fn lookup(name: &str) -> ExerciseInfo {
    match get(name) {
        Some(info) => *info,
        None => {
            tracing::debug!("No reference entry for {:?}", name);
            ExerciseInfo::UNKNOWN
        }
    }
}

/// Coaching cues, with the Phase 2 plank progression appended when relevant
pub fn cues_for(name: &str, is_phase2: bool) -> String {
    let info = lookup(name);
    if is_phase2 && name == "Plank Series" {
        format!("{}{}", info.cues, PLANK_PHASE2_CUE)
    } else {
        info.cues.to_string()
    }
}

/// All known exercises, sorted by name
pub fn entries() -> impl Iterator<Item = (&'static str, &'static ExerciseInfo)> {
    LIBRARY.iter().map(|(name, info)| (*name, info))
}

/// Case-insensitive substring search over exercise names
pub fn search(query: &str) -> Vec<(&'static str, &'static ExerciseInfo)> {
    let needle = query.to_lowercase();
    entries()
        .filter(|(name, _)| name.to_lowercase().contains(&needle))
        .collect()
}
