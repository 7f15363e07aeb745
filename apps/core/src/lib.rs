//! FlexItOut core: real-time exercise form feedback from 2D body keypoints.
//!
//! `form` holds the stateless classifier; `service` is the request-handling
//! layer that validates requests and runs them through it.

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod service;
pub mod telemetry;

pub use error::AppError;
pub use form::{FeedbackResponse, FormCoach};
pub use models::{KeypointInput, PoseFeedbackRequest, QuickCheckRequest, QuickCheckResponse};
pub use service::FeedbackServiceHandle;

#[cfg(test)]
mod tests;
