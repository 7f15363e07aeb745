use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::form::{arrange_named, Exercise, JointName, Keypoint, NamedKeypoint};

/// A keypoint as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct KeypointInput {
    /// Horizontal coordinate (image or normalized space).
    #[validate(custom(function = "validate_finite"))]
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    #[validate(custom(function = "validate_finite"))]
    pub y: f64,
    /// Detection confidence. Accepted but not used for classification.
    #[validate(custom(function = "validate_finite"))]
    pub score: f64,
    /// Optional MoveNet joint name, e.g. `left_knee`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl KeypointInput {
    pub fn new(x: f64, y: f64, score: f64) -> Self {
        Self {
            x,
            y,
            score,
            name: None,
        }
    }

    pub fn named(name: &str, x: f64, y: f64, score: f64) -> Self {
        Self {
            x,
            y,
            score,
            name: Some(name.to_string()),
        }
    }

    /// The MoveNet joint this keypoint is tagged with, if the name is one.
    pub fn joint(&self) -> Option<JointName> {
        self.name.as_deref().and_then(|name| name.parse().ok())
    }

    pub fn to_named(&self) -> NamedKeypoint {
        NamedKeypoint {
            name: self.name.clone().unwrap_or_default(),
            x: self.x,
            y: self.y,
            score: self.score,
        }
    }
}

/// Represents one pose sample submitted for feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PoseFeedbackRequest {
    /// Exercise label, matched case-insensitively.
    #[validate(length(max = 64))]
    pub pose_type: String,
    /// Ordered keypoints; position meaning depends on the exercise.
    #[validate(nested)]
    pub keypoints: Vec<KeypointInput>,
    /// Caller identity. Logged, never used for classification.
    #[validate(length(max = 128))]
    pub user_id: String,
}

impl PoseFeedbackRequest {
    /// Validate shape and size before the request reaches the classifier.
    pub fn validate_with_limit(&self, max_keypoints: usize) -> Result<(), AppError> {
        self.validate()?;
        check_keypoint_count(self.keypoints.len(), max_keypoints)
    }

    /// True when every keypoint is tagged with a recognized MoveNet joint.
    pub fn is_fully_named(&self) -> bool {
        !self.keypoints.is_empty() && self.keypoints.iter().all(|kp| kp.joint().is_some())
    }

    /// Keypoint sequence in the ordinal layout the analyzers read.
    ///
    /// Requests for a supported exercise whose keypoints all name a joint are
    /// arranged by joint name; everything else keeps its positional order.
    pub fn core_keypoints(&self) -> Vec<Keypoint> {
        if self.is_fully_named() {
            if let Some(exercise) = Exercise::from_label(&self.pose_type) {
                let named: Vec<NamedKeypoint> =
                    self.keypoints.iter().map(KeypointInput::to_named).collect();
                return arrange_named(exercise, &named);
            }
        }

        self.keypoints
            .iter()
            .map(|kp| Keypoint::new(kp.x, kp.y, kp.score))
            .collect()
    }
}

/// A labeled keypoint set for the one-rule squat depth check.
///
/// Carries no exercise label; keypoints are matched by joint name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuickCheckRequest {
    #[validate(nested)]
    pub keypoints: Vec<KeypointInput>,
    /// Caller identity, "anonymous" when absent. Logged only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 128))]
    pub user_id: Option<String>,
}

impl QuickCheckRequest {
    pub fn validate_with_limit(&self, max_keypoints: usize) -> Result<(), AppError> {
        self.validate()?;
        check_keypoint_count(self.keypoints.len(), max_keypoints)
    }

    pub fn user(&self) -> &str {
        self.user_id.as_deref().unwrap_or("anonymous")
    }

    pub fn named_keypoints(&self) -> Vec<NamedKeypoint> {
        self.keypoints.iter().map(KeypointInput::to_named).collect()
    }
}

/// Reply to a quick check: `{"feedback": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickCheckResponse {
    pub feedback: String,
}

fn check_keypoint_count(count: usize, max_keypoints: usize) -> Result<(), AppError> {
    if count > max_keypoints {
        return Err(AppError::Validation(format!(
            "Too many keypoints: {} (max {})",
            count, max_keypoints
        )));
    }
    Ok(())
}

fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite"))
    }
}
