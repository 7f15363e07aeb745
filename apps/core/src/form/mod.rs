//! # Form Module
//!
//! Stateless exercise-form classifier. Turns one pose sample (an exercise
//! label plus 2D keypoints) into a coaching tip and a quality score.
//!
//! ## Components
//! - `geometry`: angle-at-vertex primitive
//! - `exercise`: closed set of supported exercises
//! - `pose`: keypoints and per-exercise joint layouts
//! - `bands`: per-exercise threshold tables
//! - `analyzers`: one analyzer per exercise family
//! - `dispatcher`: label routing with a generic fallback
//! - `feedback`: response shape and the `FormCoach` entry point
//! - `named`: MoveNet joint names to ordinal layouts

pub mod analyzers;
pub mod bands;
pub mod dispatcher;
pub mod exercise;
pub mod feedback;
pub mod geometry;
pub mod named;
pub mod pose;

pub use analyzers::{analyze_keypoints, analyze_pose, Analysis};
pub use bands::{Band, BandTable, Comparison, Outcome};
pub use dispatcher::{ExerciseDispatcher, Route};
pub use exercise::{Exercise, Family, UnknownExercise};
pub use feedback::{FeedbackResponse, FormCoach};
pub use geometry::{angle_at_vertex, Point};
pub use named::{arrange_named, quick_squat_check, JointName, NamedKeypoint, SquatCheck};
pub use pose::{ExercisePose, InsufficientKeypoints, Keypoint};
