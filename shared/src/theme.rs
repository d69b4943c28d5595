use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// The closed set of wheel moods. Purely cosmetic: a mood picks colors and
/// preset entries and never touches timing or selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
    Serialize, Deserialize, Display, EnumIter, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mood {
    #[default]
    Happy,
    Chill,
    Adventurous,
    Cozy,
    Hungry,
}

#[derive(Debug, PartialEq)]
pub struct MoodTheme {
    pub label: &'static str,
    pub emoji: &'static str,
    pub slice_colors: &'static [&'static str],
    /// `r, g, b` used for glows at varying alpha
    pub glow_rgb: (u8, u8, u8),
    pub pointer: &'static str,
    /// Tailwind gradient for buttons and headings
    pub accent: &'static str,
}

static HAPPY: MoodTheme = MoodTheme {
    label: "Happy",
    emoji: "😄",
    slice_colors: &["#f97316", "#facc15", "#ec4899", "#22c55e", "#06b6d4", "#a855f7"],
    glow_rgb: (255, 200, 90),
    pointer: "#f59e0b",
    accent: "from-yellow-400 to-orange-500",
};

static CHILL: MoodTheme = MoodTheme {
    label: "Chill",
    emoji: "🌊",
    slice_colors: &["#0ea5e9", "#14b8a6", "#6366f1", "#38bdf8", "#2dd4bf", "#818cf8"],
    glow_rgb: (100, 180, 255),
    pointer: "#38bdf8",
    accent: "from-sky-400 to-indigo-500",
};

static ADVENTUROUS: MoodTheme = MoodTheme {
    label: "Adventurous",
    emoji: "🧭",
    slice_colors: &["#dc2626", "#ea580c", "#65a30d", "#0891b2", "#ca8a04"],
    glow_rgb: (255, 120, 60),
    pointer: "#ef4444",
    accent: "from-red-500 to-amber-500",
};

static COZY: MoodTheme = MoodTheme {
    label: "Cozy",
    emoji: "🕯️",
    slice_colors: &["#b45309", "#9f1239", "#a16207", "#7c2d12", "#be185d", "#854d0e"],
    glow_rgb: (255, 170, 110),
    pointer: "#fbbf24",
    accent: "from-amber-600 to-rose-700",
};

static HUNGRY: MoodTheme = MoodTheme {
    label: "Hungry",
    emoji: "🍕",
    slice_colors: &["#ef4444", "#f59e0b", "#84cc16", "#f97316", "#eab308", "#10b981"],
    glow_rgb: (255, 150, 80),
    pointer: "#f97316",
    accent: "from-red-400 to-yellow-500",
};

impl Mood {
    pub fn theme(self) -> &'static MoodTheme {
        match self {
            Mood::Happy => &HAPPY,
            Mood::Chill => &CHILL,
            Mood::Adventurous => &ADVENTUROUS,
            Mood::Cozy => &COZY,
            Mood::Hungry => &HUNGRY,
        }
    }

    pub fn presets(self) -> &'static [&'static str] {
        match self {
            Mood::Happy => &["Dance party", "Karaoke", "Call a friend", "Bake cookies", "Board games", "Picnic"],
            Mood::Chill => &["Read a book", "Nap", "Stretch", "Tea break", "Podcast", "Sketch"],
            Mood::Adventurous => &["New trail", "Climbing gym", "Day trip", "Try a new cuisine", "Geocaching"],
            Mood::Cozy => &["Movie night", "Hot cocoa", "Puzzle", "Knitting", "Candle bath", "Journal"],
            Mood::Hungry => &["Pizza", "Burger", "Sushi", "Tacos", "Ramen", "Salad"],
        }
    }

    pub fn all() -> impl Iterator<Item = Mood> {
        Mood::iter()
    }
}

impl MoodTheme {
    /// Color for slice `index` of `count`. The palette cycles, skipping a step
    /// for the last slice when it would otherwise match slice 0 across the seam.
    pub fn slice_color(&self, index: usize, count: usize) -> &'static str {
        let palette = self.slice_colors.len();
        let mut color = index % palette;
        if count > 1 && index == count - 1 && color == 0 {
            color = 1 % palette;
        }
        self.slice_colors[color]
    }

    pub fn glow(&self, alpha: f64) -> String {
        let (r, g, b) = self.glow_rgb;
        format!("rgba({}, {}, {}, {:.3})", r, g, b, alpha)
    }
}
