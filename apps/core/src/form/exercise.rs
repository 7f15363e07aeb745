//! Supported exercises.
//!
//! The set is closed: every variant has an analyzer family and the dispatcher
//! matches on it exhaustively. Labels that do not parse fall through to the
//! generic encouragement response.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An exercise the classifier knows how to analyze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    Squat,
    JumpSquat,
    PushUp,
    ForwardLunge,
    SideLunge,
    JumpingJack,
    Plank,
    MountainClimber,
    HighKnees,
    Burpee,
}

/// Analyzer family. Exercises in the same family share joints and thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Squat,
    PushUp,
    Lunge,
    JumpingJack,
    Plank,
    MountainClimber,
    HighKnees,
    Burpee,
}

impl Exercise {
    pub const ALL: [Exercise; 10] = [
        Exercise::Squat,
        Exercise::JumpSquat,
        Exercise::PushUp,
        Exercise::ForwardLunge,
        Exercise::SideLunge,
        Exercise::JumpingJack,
        Exercise::Plank,
        Exercise::MountainClimber,
        Exercise::HighKnees,
        Exercise::Burpee,
    ];

    /// Canonical wire label, as sent by clients
    pub fn label(&self) -> &'static str {
        match self {
            Exercise::Squat => "squat",
            Exercise::JumpSquat => "jump squat",
            Exercise::PushUp => "push-up",
            Exercise::ForwardLunge => "forward lunge",
            Exercise::SideLunge => "side lunge",
            Exercise::JumpingJack => "jumping jack",
            Exercise::Plank => "plank",
            Exercise::MountainClimber => "mountain climber",
            Exercise::HighKnees => "high knees",
            Exercise::Burpee => "burpee",
        }
    }

    /// Parse a client label. Matching is case-insensitive and otherwise exact.
    pub fn from_label(label: &str) -> Option<Self> {
        let folded = normalize_label(label);
        Self::ALL.into_iter().find(|e| e.label() == folded)
    }

    pub fn family(&self) -> Family {
        match self {
            Exercise::Squat | Exercise::JumpSquat => Family::Squat,
            Exercise::PushUp => Family::PushUp,
            Exercise::ForwardLunge | Exercise::SideLunge => Family::Lunge,
            Exercise::JumpingJack => Family::JumpingJack,
            Exercise::Plank => Family::Plank,
            Exercise::MountainClimber => Family::MountainClimber,
            Exercise::HighKnees => Family::HighKnees,
            Exercise::Burpee => Family::Burpee,
        }
    }

    /// Minimum length of the positional keypoint sequence
    pub fn required_keypoints(&self) -> usize {
        self.family().required_keypoints()
    }
}

impl Family {
    pub fn required_keypoints(&self) -> usize {
        match self {
            Family::Squat | Family::PushUp => 3,
            Family::Lunge | Family::JumpingJack => 6,
            Family::Plank | Family::MountainClimber | Family::HighKnees | Family::Burpee => 4,
        }
    }

    /// Name used in the insufficient-data tip
    pub fn noun(&self) -> &'static str {
        match self {
            Family::Squat => "squat",
            Family::PushUp => "push-up",
            Family::Lunge => "lunge",
            Family::JumpingJack => "jumping jack",
            Family::Plank => "plank",
            Family::MountainClimber => "mountain climber",
            Family::HighKnees => "high knees",
            Family::Burpee => "burpee",
        }
    }

    pub fn insufficient_data_tip(&self) -> String {
        format!("Insufficient keypoints for {} analysis", self.noun())
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Returned by `FromStr` for labels outside the supported set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported exercise '{0}'")]
pub struct UnknownExercise(pub String);

impl FromStr for Exercise {
    type Err = UnknownExercise;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownExercise(normalize_label(s)))
    }
}

/// Case-fold a client label
pub fn normalize_label(label: &str) -> String {
    label.to_lowercase()
}
