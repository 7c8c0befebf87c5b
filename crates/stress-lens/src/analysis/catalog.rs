pub const UNKNOWN_LABEL: &str = "Unknown";

/// Stress classes the shipped classifier was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StressLevel {
    NoStress,
    CalmAndBalanced,
    EnergeticActive,
    MildStress,
    ModerateStress,
    HighStress,
}

impl StressLevel {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::NoStress,
            Self::CalmAndBalanced,
            Self::EnergeticActive,
            Self::MildStress,
            Self::ModerateStress,
            Self::HighStress,
        ]
    }

    pub const fn from_level(level: i64) -> Option<Self> {
        match level {
            0 => Some(Self::NoStress),
            1 => Some(Self::CalmAndBalanced),
            2 => Some(Self::EnergeticActive),
            3 => Some(Self::MildStress),
            4 => Some(Self::ModerateStress),
            5 => Some(Self::HighStress),
            _ => None,
        }
    }

    pub const fn level(self) -> i64 {
        match self {
            Self::NoStress => 0,
            Self::CalmAndBalanced => 1,
            Self::EnergeticActive => 2,
            Self::MildStress => 3,
            Self::ModerateStress => 4,
            Self::HighStress => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NoStress => "Absolutely No Stress – good in everything",
            Self::CalmAndBalanced => "Calm & Balanced – good in mood check",
            Self::EnergeticActive => "Energetic / Active Person – lifestyle problem",
            Self::MildStress => "Mild Stress – bad in your story",
            Self::ModerateStress => "Moderate Stress – bad lifestyle and bad in your story",
            Self::HighStress => "High Stress – bad in 4 parts",
        }
    }

    pub const fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::NoStress => &["Maintain your healthy balance.", "Keep positive habits going!"],
            Self::CalmAndBalanced => &[
                "Stay calm & mindful.",
                "Continue managing small stressors.",
            ],
            Self::EnergeticActive => &[
                "Take breaks between activities.",
                "Stay consistent with sleep.",
            ],
            Self::MildStress => &["Try journaling your stress.", "Practice deep breathing."],
            Self::ModerateStress => &["Reorganize tasks.", "Focus on one thing at a time."],
            Self::HighStress => &["Seek support if needed.", "Talk to a friend or counselor."],
        }
    }

    /// Narrative paragraph used in the report's observations section.
    pub const fn observation(self) -> &'static str {
        match self {
            Self::NoStress | Self::CalmAndBalanced => {
                "You appear to be calm and emotionally balanced. Keep maintaining your current habits and mental well-being."
            }
            Self::EnergeticActive => {
                "You are active and energetic, but small lifestyle habits may be adding mild stress. Keep a regular rest schedule."
            }
            Self::MildStress => {
                "Your responses suggest early signs of stress. Try identifying minor triggers and maintaining a consistent routine."
            }
            Self::ModerateStress => {
                "Your responses suggest that stress is affecting multiple areas. You may be struggling with time balance or emotional fatigue."
            }
            Self::HighStress => {
                "Your responses indicate high stress across several areas. Please prioritize self-care and seek professional or social support if needed."
            }
        }
    }
}

/// Label for a raw level, `"Unknown"` outside the catalog.
pub fn label_for(level: i64) -> &'static str {
    StressLevel::from_level(level).map_or(UNKNOWN_LABEL, StressLevel::label)
}

/// Canned advice for a raw level, empty outside the catalog.
pub fn recommendations_for(level: i64) -> &'static [&'static str] {
    match StressLevel::from_level(level) {
        Some(level) => level.recommendations(),
        None => &[],
    }
}

/// Display string combining the numeric level and its label, e.g. `"3 - Mild Stress – ..."`.
pub fn level_display(level: i64) -> String {
    format!("{} - {}", level, label_for(level))
}
