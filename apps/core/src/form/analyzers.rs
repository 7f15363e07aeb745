//! Per-exercise form analyzers.
//!
//! Every analyzer is total: a labeled pose always maps to an outcome, and a
//! sequence too short to label maps to the insufficient-data default.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::bands::{self, Outcome};
use super::exercise::{Exercise, Family};
use super::geometry::angle_at_vertex;
use super::pose::{
    ArmChain, BurpeePose, ExercisePose, JumpingJackPose, KneeDrivePose, Keypoint, LegChain,
    LungePose, PlankPose,
};

/// A single coaching tip and its quality score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub tip: String,
    /// Quality heuristic in [0, 1], quantized to a few levels per exercise
    pub score: f64,
}

impl Analysis {
    pub fn new(tip: impl Into<String>, score: f64) -> Self {
        Self {
            tip: tip.into(),
            score,
        }
    }

    /// Degraded default for a sequence shorter than the family requires
    pub fn insufficient(family: Family) -> Self {
        Self::new(family.insufficient_data_tip(), bands::INSUFFICIENT_DATA_SCORE)
    }

    /// Encouragement for an exercise outside the supported set
    pub fn unsupported(label: &str) -> Self {
        Self::new(
            format!("Exercise '{}' not yet supported. Keep up the good work!", label),
            bands::UNSUPPORTED_EXERCISE_SCORE,
        )
    }
}

impl From<Outcome> for Analysis {
    fn from(outcome: Outcome) -> Self {
        Self::new(outcome.tip, outcome.score)
    }
}

/// Knee angle of a leg chain
pub fn knee_angle(leg: &LegChain) -> f64 {
    angle_at_vertex(leg.hip, leg.knee, leg.ankle)
}

pub fn analyze_squat(leg: &LegChain) -> Outcome {
    let angle = knee_angle(leg);
    trace!(angle, "squat knee angle");
    bands::SQUAT.classify(angle)
}

pub fn analyze_push_up(arm: &ArmChain) -> Outcome {
    let angle = angle_at_vertex(arm.shoulder, arm.elbow, arm.wrist);
    trace!(angle, "push-up elbow angle");
    bands::PUSH_UP.classify(angle)
}

/// The deeper (smaller) knee angle of the two legs decides
pub fn analyze_lunge(pose: &LungePose) -> Outcome {
    let angle = knee_angle(&pose.left).min(knee_angle(&pose.right));
    trace!(angle, "lunge knee angle");
    bands::LUNGE.classify(angle)
}

pub fn analyze_jumping_jack(pose: &JumpingJackPose) -> Outcome {
    let arm_spread = (pose.left_wrist.x - pose.right_wrist.x).abs();
    let shoulder_width = (pose.left_shoulder.x - pose.right_shoulder.x).abs();
    trace!(arm_spread, shoulder_width, "jumping jack spread");
    bands::JUMPING_JACK.classify_scaled(arm_spread, shoulder_width)
}

pub fn analyze_plank(pose: &PlankPose) -> Outcome {
    let deviation = (pose.shoulder.y - pose.ankle.y).abs();
    trace!(deviation, "plank deviation");
    bands::PLANK.classify(deviation)
}

pub fn analyze_mountain_climber(pose: &KneeDrivePose) -> Outcome {
    let (left, right) = pose.knee_heights();
    let difference = (left - right).abs();
    trace!(left, right, difference, "mountain climber knee heights");
    bands::MOUNTAIN_CLIMBER.classify(difference)
}

pub fn analyze_high_knees(pose: &KneeDrivePose) -> Outcome {
    let (left, right) = pose.knee_heights();
    trace!(left, right, "high knees knee heights");
    // Either knee above the bound counts
    bands::HIGH_KNEES.classify(left.max(right))
}

/// Squat phase while not standing, landing phase while standing tall.
///
/// Standing means the shoulder sits below the hip in image coordinates.
pub fn analyze_burpee(pose: &BurpeePose) -> Outcome {
    let angle = knee_angle(&pose.leg);
    let is_standing = pose.shoulder.y > pose.leg.hip.y;
    trace!(angle, is_standing, "burpee phase");

    if angle < bands::BURPEE_SQUAT_ANGLE && !is_standing {
        bands::BURPEE_SQUAT
    } else if is_standing && angle > bands::BURPEE_LANDING_ANGLE {
        bands::BURPEE_LANDING
    } else {
        bands::BURPEE_OTHERWISE
    }
}

/// Run the analyzer matching the labeled pose
pub fn analyze_pose(pose: &ExercisePose) -> Outcome {
    match pose {
        ExercisePose::Squat(leg) => analyze_squat(leg),
        ExercisePose::PushUp(arm) => analyze_push_up(arm),
        ExercisePose::Lunge(lunge) => analyze_lunge(lunge),
        ExercisePose::JumpingJack(jack) => analyze_jumping_jack(jack),
        ExercisePose::Plank(plank) => analyze_plank(plank),
        ExercisePose::MountainClimber(drive) => analyze_mountain_climber(drive),
        ExercisePose::HighKnees(drive) => analyze_high_knees(drive),
        ExercisePose::Burpee(burpee) => analyze_burpee(burpee),
    }
}

/// Label the positional sequence for `exercise` and analyze it
pub fn analyze_keypoints(exercise: Exercise, keypoints: &[Keypoint]) -> Analysis {
    match ExercisePose::from_keypoints(exercise, keypoints) {
        Ok(pose) => analyze_pose(&pose).into(),
        Err(short) => {
            trace!(
                required = short.required,
                received = short.received,
                "insufficient keypoints"
            );
            Analysis::insufficient(short.family)
        }
    }
}
