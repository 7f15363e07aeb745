//! Feedback aggregation - the externally visible result of one pose sample.

use serde::{Deserialize, Serialize};

use super::analyzers::Analysis;
use super::dispatcher::ExerciseDispatcher;
use super::pose::Keypoint;

/// Coaching tips and a quality score for one pose sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    /// Coaching tips. Exactly one entry today.
    pub tips: Vec<String>,
    /// Quality score in [0, 1]
    pub score: f64,
}

impl FeedbackResponse {
    /// The first (and currently only) tip
    pub fn primary_tip(&self) -> Option<&str> {
        self.tips.first().map(String::as_str)
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Score: {:.0}%, Tip: {}",
            self.score * 100.0,
            self.primary_tip().unwrap_or("-")
        )
    }
}

impl From<Analysis> for FeedbackResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            tips: vec![analysis.tip],
            score: analysis.score,
        }
    }
}

/// Entry point of the classifier core: label + keypoints in, feedback out.
///
/// Stateless and cheap to construct; share one instance or create one per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormCoach {
    dispatcher: ExerciseDispatcher,
}

impl FormCoach {
    pub fn new() -> Self {
        Self {
            dispatcher: ExerciseDispatcher::new(),
        }
    }

    pub fn feedback(&self, pose_type: &str, keypoints: &[Keypoint]) -> FeedbackResponse {
        self.dispatcher.dispatch(pose_type, keypoints).into()
    }

    pub fn dispatcher(&self) -> &ExerciseDispatcher {
        &self.dispatcher
    }
}
