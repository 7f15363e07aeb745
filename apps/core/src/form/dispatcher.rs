//! Exercise dispatcher.
//!
//! Routes a client-supplied exercise label to its analyzer. Only labels that
//! fail to parse reach the generic fallback.

use serde::Serialize;
use tracing::debug;

use super::analyzers::{analyze_keypoints, Analysis};
use super::exercise::{normalize_label, Exercise};
use super::pose::Keypoint;

/// Where a label was routed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Route {
    Supported(Exercise),
    /// Case-folded label that matched no exercise
    Unsupported(String),
}

impl Route {
    pub fn exercise(&self) -> Option<Exercise> {
        match self {
            Route::Supported(exercise) => Some(*exercise),
            Route::Unsupported(_) => None,
        }
    }
}

/// Stateless label-to-analyzer router
#[derive(Debug, Clone, Copy, Default)]
pub struct ExerciseDispatcher;

impl ExerciseDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a label against the supported exercise set
    pub fn route(&self, label: &str) -> Route {
        match Exercise::from_label(label) {
            Some(exercise) => Route::Supported(exercise),
            None => Route::Unsupported(normalize_label(label)),
        }
    }

    /// Route `label` and analyze `keypoints` with the matching analyzer
    pub fn dispatch(&self, label: &str, keypoints: &[Keypoint]) -> Analysis {
        let route = self.route(label);
        let analysis = match &route {
            Route::Supported(exercise) => analyze_keypoints(*exercise, keypoints),
            Route::Unsupported(folded) => Analysis::unsupported(folded),
        };

        debug!(
            ?route,
            keypoints = keypoints.len(),
            score = analysis.score,
            "dispatched pose sample"
        );

        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squat_keypoints() -> Vec<Keypoint> {
        vec![
            Keypoint::new(100.0, 100.0, 0.9),
            Keypoint::new(150.0, 200.0, 0.9),
            Keypoint::new(100.0, 300.0, 0.9),
        ]
    }

    #[test]
    fn test_routes() {
        let dispatcher = ExerciseDispatcher::new();
        assert_eq!(dispatcher.route("squat"), Route::Supported(Exercise::Squat));
        assert_eq!(dispatcher.route("Jump Squat"), Route::Supported(Exercise::JumpSquat));
        assert_eq!(dispatcher.route("push-up"), Route::Supported(Exercise::PushUp));
        assert_eq!(dispatcher.route("Side Lunge"), Route::Supported(Exercise::SideLunge));
        assert_eq!(
            dispatcher.route("Forward Lunge"),
            Route::Supported(Exercise::ForwardLunge)
        );
        assert_eq!(
            dispatcher.route("JUMPING JACK"),
            Route::Supported(Exercise::JumpingJack)
        );
        assert_eq!(dispatcher.route("plank"), Route::Supported(Exercise::Plank));
        assert_eq!(
            dispatcher.route("mountain climber"),
            Route::Supported(Exercise::MountainClimber)
        );
        assert_eq!(dispatcher.route("high knees"), Route::Supported(Exercise::HighKnees));
        assert_eq!(dispatcher.route("Burpee"), Route::Supported(Exercise::Burpee));
    }

    #[test]
    fn test_unsupported_route_is_case_folded() {
        let dispatcher = ExerciseDispatcher::new();
        let route = dispatcher.route("CartWheel");
        assert_eq!(route, Route::Unsupported("cartwheel".to_string()));
        assert_eq!(route.exercise(), None);
    }

    #[test]
    fn test_case_insensitive_dispatch() {
        let dispatcher = ExerciseDispatcher::new();
        let keypoints = squat_keypoints();

        let lower = dispatcher.dispatch("squat", &keypoints);
        let upper = dispatcher.dispatch("SQUAT", &keypoints);
        let title = dispatcher.dispatch("Squat", &keypoints);

        assert_eq!(lower, upper);
        assert_eq!(lower, title);
    }

    #[test]
    fn test_jump_squat_shares_squat_analyzer() {
        let dispatcher = ExerciseDispatcher::new();
        let keypoints = squat_keypoints();
        assert_eq!(
            dispatcher.dispatch("jump squat", &keypoints),
            dispatcher.dispatch("squat", &keypoints)
        );
    }

    #[test]
    fn test_unknown_exercise_fallback() {
        let dispatcher = ExerciseDispatcher::new();
        let analysis = dispatcher.dispatch("cartwheel", &squat_keypoints());
        assert_eq!(
            analysis.tip,
            "Exercise 'cartwheel' not yet supported. Keep up the good work!"
        );
        assert_eq!(analysis.score, 0.8);

        let analysis = dispatcher.dispatch("", &[]);
        assert_eq!(analysis.tip, "Exercise '' not yet supported. Keep up the good work!");
    }
}
