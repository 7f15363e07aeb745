//! Keypoints and per-exercise joint layouts.
//!
//! Clients send an ordered keypoint list whose positions carry an implicit,
//! exercise-specific role. `ExercisePose::from_keypoints` is the only place
//! that knows those positions; analyzers only ever see named joints.

use serde::{Deserialize, Serialize};

use super::exercise::{Exercise, Family};
use super::geometry::Point;

/// A tracked body landmark with its detection confidence
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    /// Detection confidence. Carried through, not used for classification.
    pub score: f64,
}

impl Keypoint {
    pub const fn new(x: f64, y: f64, score: f64) -> Self {
        Self { x, y, score }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Hip, knee and ankle of one leg
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegChain {
    pub hip: Point,
    pub knee: Point,
    pub ankle: Point,
}

/// Shoulder, elbow and wrist of one arm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmChain {
    pub shoulder: Point,
    pub elbow: Point,
    pub wrist: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LungePose {
    pub left: LegChain,
    pub right: LegChain,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpingJackPose {
    pub left_wrist: Point,
    pub right_wrist: Point,
    pub left_shoulder: Point,
    pub right_shoulder: Point,
    pub left_ankle: Point,
    pub right_ankle: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlankPose {
    pub shoulder: Point,
    pub elbow: Point,
    pub hip: Point,
    pub ankle: Point,
}

/// Hips and knees of both legs, used by knee-drive exercises
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KneeDrivePose {
    pub left_hip: Point,
    pub left_knee: Point,
    pub right_hip: Point,
    pub right_knee: Point,
}

impl KneeDrivePose {
    /// Vertical hip-to-knee offset of each leg, left first
    pub fn knee_heights(&self) -> (f64, f64) {
        (
            self.left_hip.y - self.left_knee.y,
            self.right_hip.y - self.right_knee.y,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurpeePose {
    pub leg: LegChain,
    pub shoulder: Point,
}

/// Joints of one sample, labeled for the exercise being performed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExercisePose {
    Squat(LegChain),
    PushUp(ArmChain),
    Lunge(LungePose),
    JumpingJack(JumpingJackPose),
    Plank(PlankPose),
    MountainClimber(KneeDrivePose),
    HighKnees(KneeDrivePose),
    Burpee(BurpeePose),
}

/// The keypoint sequence is shorter than the exercise needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientKeypoints {
    pub family: Family,
    pub required: usize,
    pub received: usize,
}

impl ExercisePose {
    /// Label the positional sequence for `exercise`.
    ///
    /// Only the length is checked; extra trailing keypoints are ignored.
    pub fn from_keypoints(
        exercise: Exercise,
        keypoints: &[Keypoint],
    ) -> Result<Self, InsufficientKeypoints> {
        let family = exercise.family();
        let required = family.required_keypoints();
        if keypoints.len() < required {
            return Err(InsufficientKeypoints {
                family,
                required,
                received: keypoints.len(),
            });
        }

        let p = |i: usize| keypoints[i].point();
        let leg = |i: usize| LegChain {
            hip: p(i),
            knee: p(i + 1),
            ankle: p(i + 2),
        };
        let knee_drive = || KneeDrivePose {
            left_hip: p(0),
            left_knee: p(1),
            right_hip: p(2),
            right_knee: p(3),
        };

        let pose = match family {
            Family::Squat => ExercisePose::Squat(leg(0)),
            Family::PushUp => ExercisePose::PushUp(ArmChain {
                shoulder: p(0),
                elbow: p(1),
                wrist: p(2),
            }),
            Family::Lunge => ExercisePose::Lunge(LungePose {
                left: leg(0),
                right: leg(3),
            }),
            Family::JumpingJack => ExercisePose::JumpingJack(JumpingJackPose {
                left_wrist: p(0),
                right_wrist: p(1),
                left_shoulder: p(2),
                right_shoulder: p(3),
                left_ankle: p(4),
                right_ankle: p(5),
            }),
            Family::Plank => ExercisePose::Plank(PlankPose {
                shoulder: p(0),
                elbow: p(1),
                hip: p(2),
                ankle: p(3),
            }),
            Family::MountainClimber => ExercisePose::MountainClimber(knee_drive()),
            Family::HighKnees => ExercisePose::HighKnees(knee_drive()),
            Family::Burpee => ExercisePose::Burpee(BurpeePose {
                leg: leg(0),
                shoulder: p(3),
            }),
        };

        Ok(pose)
    }

    pub fn family(&self) -> Family {
        match self {
            ExercisePose::Squat(_) => Family::Squat,
            ExercisePose::PushUp(_) => Family::PushUp,
            ExercisePose::Lunge(_) => Family::Lunge,
            ExercisePose::JumpingJack(_) => Family::JumpingJack,
            ExercisePose::Plank(_) => Family::Plank,
            ExercisePose::MountainClimber(_) => Family::MountainClimber,
            ExercisePose::HighKnees(_) => Family::HighKnees,
            ExercisePose::Burpee(_) => Family::Burpee,
        }
    }
}
