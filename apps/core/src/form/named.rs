//! Named keypoints.
//!
//! Pose detectors in the MoveNet family label each keypoint (`left_hip`,
//! `right_knee`, ...). This module turns such a labeled set into the ordinal
//! sequence an exercise analyzer expects, so clients do not have to know the
//! positional layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::exercise::{Exercise, Family};
use super::pose::Keypoint;

/// The 17 MoveNet joints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl JointName {
    pub const ALL: [JointName; 17] = [
        JointName::Nose,
        JointName::LeftEye,
        JointName::RightEye,
        JointName::LeftEar,
        JointName::RightEar,
        JointName::LeftShoulder,
        JointName::RightShoulder,
        JointName::LeftElbow,
        JointName::RightElbow,
        JointName::LeftWrist,
        JointName::RightWrist,
        JointName::LeftHip,
        JointName::RightHip,
        JointName::LeftKnee,
        JointName::RightKnee,
        JointName::LeftAnkle,
        JointName::RightAnkle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JointName::Nose => "nose",
            JointName::LeftEye => "left_eye",
            JointName::RightEye => "right_eye",
            JointName::LeftEar => "left_ear",
            JointName::RightEar => "right_ear",
            JointName::LeftShoulder => "left_shoulder",
            JointName::RightShoulder => "right_shoulder",
            JointName::LeftElbow => "left_elbow",
            JointName::RightElbow => "right_elbow",
            JointName::LeftWrist => "left_wrist",
            JointName::RightWrist => "right_wrist",
            JointName::LeftHip => "left_hip",
            JointName::RightHip => "right_hip",
            JointName::LeftKnee => "left_knee",
            JointName::RightKnee => "right_knee",
            JointName::LeftAnkle => "left_ankle",
            JointName::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for JointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JointName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|joint| joint.as_str() == folded)
            .ok_or(())
    }
}

/// A keypoint tagged with the joint it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedKeypoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub score: f64,
}

impl NamedKeypoint {
    pub fn new(joint: JointName, x: f64, y: f64, score: f64) -> Self {
        Self {
            name: joint.as_str().to_string(),
            x,
            y,
            score,
        }
    }

    pub fn joint(&self) -> Option<JointName> {
        self.name.parse().ok()
    }

    pub fn keypoint(&self) -> Keypoint {
        Keypoint::new(self.x, self.y, self.score)
    }
}

/// First keypoint labeled `joint`
pub fn find_joint(keypoints: &[NamedKeypoint], joint: JointName) -> Option<Keypoint> {
    keypoints
        .iter()
        .find(|kp| kp.joint() == Some(joint))
        .map(NamedKeypoint::keypoint)
}

use JointName::*;

const LEFT_LEG: &[JointName] = &[LeftHip, LeftKnee, LeftAnkle];
const RIGHT_LEG: &[JointName] = &[RightHip, RightKnee, RightAnkle];
const LEFT_ARM: &[JointName] = &[LeftShoulder, LeftElbow, LeftWrist];
const RIGHT_ARM: &[JointName] = &[RightShoulder, RightElbow, RightWrist];
const LEFT_PLANK: &[JointName] = &[LeftShoulder, LeftElbow, LeftHip, LeftAnkle];
const RIGHT_PLANK: &[JointName] = &[RightShoulder, RightElbow, RightHip, RightAnkle];
const LEFT_BURPEE: &[JointName] = &[LeftHip, LeftKnee, LeftAnkle, LeftShoulder];
const RIGHT_BURPEE: &[JointName] = &[RightHip, RightKnee, RightAnkle, RightShoulder];
const LUNGE: &[JointName] = &[LeftHip, LeftKnee, LeftAnkle, RightHip, RightKnee, RightAnkle];
const JUMPING_JACK: &[JointName] = &[
    LeftWrist,
    RightWrist,
    LeftShoulder,
    RightShoulder,
    LeftAnkle,
    RightAnkle,
];
const KNEE_DRIVE: &[JointName] = &[LeftHip, LeftKnee, RightHip, RightKnee];

/// Joint order an exercise reads, as candidate layouts in preference order.
///
/// Single-side exercises prefer the left side and fall back to the right.
pub fn layouts(family: Family) -> &'static [&'static [JointName]] {
    match family {
        Family::Squat => &[LEFT_LEG, RIGHT_LEG],
        Family::PushUp => &[LEFT_ARM, RIGHT_ARM],
        Family::Lunge => &[LUNGE],
        Family::JumpingJack => &[JUMPING_JACK],
        Family::Plank => &[LEFT_PLANK, RIGHT_PLANK],
        Family::MountainClimber | Family::HighKnees => &[KNEE_DRIVE],
        Family::Burpee => &[LEFT_BURPEE, RIGHT_BURPEE],
    }
}

/// Longest prefix of `layout` present in `keypoints`
fn collect_prefix(keypoints: &[NamedKeypoint], layout: &[JointName]) -> Vec<Keypoint> {
    layout
        .iter()
        .map_while(|joint| find_joint(keypoints, *joint))
        .collect()
}

/// Build the ordinal sequence `exercise` expects from labeled keypoints.
///
/// The first complete layout wins. When none is complete, the longest partial
/// prefix is returned, which the analyzer reports as insufficient data.
pub fn arrange_named(exercise: Exercise, keypoints: &[NamedKeypoint]) -> Vec<Keypoint> {
    let mut best: Vec<Keypoint> = Vec::new();
    for layout in layouts(exercise.family()) {
        let sequence = collect_prefix(keypoints, layout);
        if sequence.len() == layout.len() {
            return sequence;
        }
        if sequence.len() > best.len() {
            best = sequence;
        }
    }
    best
}

/// Outcome of the single-rule squat depth check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SquatCheck {
    GoodSquat,
    GoLower,
    PoseNotDetected,
}

impl SquatCheck {
    pub fn message(&self) -> &'static str {
        match self {
            SquatCheck::GoodSquat => "Good squat!",
            SquatCheck::GoLower => "Go lower!",
            SquatCheck::PoseNotDetected => "Pose not detected",
        }
    }
}

impl fmt::Display for SquatCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Vertical hip-to-knee distance below which the quick check passes
pub const QUICK_SQUAT_MAX_HIP_KNEE_GAP: f64 = 30.0;

/// Quick depth check on the left leg: hip close to knee height passes
pub fn quick_squat_check(keypoints: &[NamedKeypoint]) -> SquatCheck {
    let hip = find_joint(keypoints, LeftHip);
    let knee = find_joint(keypoints, LeftKnee);
    let ankle = find_joint(keypoints, LeftAnkle);

    match (hip, knee, ankle) {
        (Some(hip), Some(knee), Some(_)) => {
            if (hip.y - knee.y).abs() < QUICK_SQUAT_MAX_HIP_KNEE_GAP {
                SquatCheck::GoodSquat
            } else {
                SquatCheck::GoLower
            }
        }
        _ => SquatCheck::PoseNotDetected,
    }
}
