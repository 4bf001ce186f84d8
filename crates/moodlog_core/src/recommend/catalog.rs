//! Static recommendation content per mood.

use crate::model::mood::MoodLabel;

/// Static content buckets for one mood.
pub struct MoodCatalog {
    pub music: &'static [&'static str],
    pub quotes: &'static [&'static str],
    pub relaxation: &'static [&'static str],
    pub tips: &'static [&'static str],
}

static ENERGETIC: MoodCatalog = MoodCatalog {
    music: &["Upbeat Pop Mix", "EDM Booster", "Morning Run Beats"],
    quotes: &[
        "The future depends on what you do today.",
        "Action is the foundational key to all success.",
    ],
    relaxation: &["10-min stretch", "Box breathing 2 min"],
    tips: &["Tackle deep work first", "Channel energy into a short sprint"],
};

static CALM: MoodCatalog = MoodCatalog {
    music: &["Lo-Fi Chill", "Ambient Focus", "Acoustic Calm"],
    quotes: &[
        "Peace comes from within.",
        "Almost everything will work again if you unplug it for a few minutes.",
    ],
    relaxation: &["Body scan 5 min", "4-7-8 breathing 3 min"],
    tips: &["Good time for reading/study", "Batch shallow tasks"],
};

static STRESSED: MoodCatalog = MoodCatalog {
    music: &["Piano Relax", "Deep Focus", "Nature Sounds"],
    quotes: &[
        "You don't have to control your thoughts. You just have to stop letting them control you.",
        "Simplicity is the ultimate sophistication.",
    ],
    relaxation: &["Guided meditation 5 min", "Progressive muscle relaxation"],
    tips: &[
        "Timebox work in 25-min Pomodoros",
        "Limit notifications 1 hour",
    ],
};

static DEPRESSED: MoodCatalog = MoodCatalog {
    music: &["Gentle Uplift", "Soft Indie", "Warm Acoustic"],
    quotes: &["No dark night lasts forever.", "You are stronger than you think."],
    relaxation: &["Sunlight walk 10 min", "Gratitude journaling 3 prompts"],
    tips: &[
        "Start with one tiny task",
        "Pair with a friend for accountability",
    ],
};

static NEUTRAL: MoodCatalog = MoodCatalog {
    music: &["Daily Mix", "Chillhop Essentials", "Indie Discovery"],
    quotes: &[
        "Small steps every day.",
        "Do what you can, with what you have, where you are.",
    ],
    relaxation: &["Mindful tea break", "Light stretching 5 min"],
    tips: &["Plan next 3 priorities", "Declutter your workspace 5 min"],
};

/// Returns the static bucket for `mood`.
pub fn catalog_for(mood: MoodLabel) -> &'static MoodCatalog {
    match mood {
        MoodLabel::Energetic => &ENERGETIC,
        MoodLabel::Calm => &CALM,
        MoodLabel::Stressed => &STRESSED,
        MoodLabel::Depressed => &DEPRESSED,
        MoodLabel::Neutral => &NEUTRAL,
    }
}
