//! Feedback service actor.
//!
//! The request-handling layer in front of the classifier: validates requests,
//! tags each one with a request id for tracing, classifies it and replies
//! within the configured timeout. The classifier itself holds no state, so the
//! actor only owns its mailbox.

use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::form::{quick_squat_check, FeedbackResponse, FormCoach};
use crate::models::{PoseFeedbackRequest, QuickCheckRequest, QuickCheckResponse};

/// Messages that can be sent to the feedback actor.
#[derive(Debug)]
pub enum FeedbackMessage {
    /// Classify one pose sample.
    Analyze {
        request: PoseFeedbackRequest,
        /// A channel to send the response back.
        responder: oneshot::Sender<Result<FeedbackResponse, AppError>>,
    },
    /// Run the one-rule squat depth check on named keypoints.
    QuickCheck {
        request: QuickCheckRequest,
        responder: oneshot::Sender<Result<QuickCheckResponse, AppError>>,
    },
    /// Stop the actor. Messages already queued behind this one are dropped.
    Shutdown,
}

/// A handle to the feedback actor.
///
/// Cheap to clone; every clone talks to the same actor.
#[derive(Clone)]
pub struct FeedbackServiceHandle {
    sender: mpsc::Sender<FeedbackMessage>,
    request_timeout: Duration,
}

impl FeedbackServiceHandle {
    /// Spawns the actor on the current Tokio runtime and returns a handle to it.
    pub fn new(config: &Config) -> Self {
        let (sender, receiver) = mpsc::channel(config.channel_capacity);
        let runner = FeedbackRunner {
            receiver,
            coach: FormCoach::new(),
            max_keypoints: config.max_keypoints,
        };
        tokio::spawn(async move { runner.run().await });
        Self {
            sender,
            request_timeout: config.request_timeout(),
        }
    }

    /// Submits a pose sample and waits for its feedback.
    ///
    /// # Errors
    ///
    /// * `AppError::Validation` - the request failed boundary validation.
    /// * `AppError::Service` - the actor has stopped.
    /// * `AppError::Timeout` - no reply within the configured timeout.
    pub async fn submit(&self, request: PoseFeedbackRequest) -> Result<FeedbackResponse, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = FeedbackMessage::Analyze {
            request,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Service(e.to_string()))?;
        timeout(self.request_timeout, recv)
            .await?
            .map_err(|e| AppError::Service(e.to_string()))?
    }

    /// Runs the quick squat check on a named keypoint set.
    pub async fn submit_quick_check(
        &self,
        request: QuickCheckRequest,
    ) -> Result<QuickCheckResponse, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = FeedbackMessage::QuickCheck {
            request,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Service(e.to_string()))?;
        timeout(self.request_timeout, recv)
            .await?
            .map_err(|e| AppError::Service(e.to_string()))?
    }

    /// Asks the actor to stop. Later submits fail with `AppError::Service`.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(FeedbackMessage::Shutdown)
            .await
            .map_err(|e| AppError::Service(e.to_string()))
    }

    /// Handles one line of newline-delimited JSON.
    ///
    /// Returns the JSON reply line, or `None` for a blank line. Failures are
    /// reported in-band as `{"error": "..."}` so a bad line never ends the stream.
    pub async fn respond_to_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let result = match parse_line(line) {
            Ok(LineRequest::Feedback(request)) => self
                .submit(request)
                .await
                .and_then(|response| Ok(serde_json::to_string(&response)?)),
            Ok(LineRequest::QuickCheck(request)) => self
                .submit_quick_check(request)
                .await
                .and_then(|response| Ok(serde_json::to_string(&response)?)),
            Err(e) => Err(e),
        };

        let reply = match result {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Pose feedback request failed");
                serde_json::json!({ "error": e.to_string() }).to_string()
            }
        };
        Some(reply)
    }

    /// True once the actor's mailbox is closed.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// One parsed input line.
#[derive(Debug)]
enum LineRequest {
    Feedback(PoseFeedbackRequest),
    QuickCheck(QuickCheckRequest),
}

/// Lines carrying a `pose_type` are full feedback requests; lines without one
/// get the quick squat check.
fn parse_line(line: &str) -> Result<LineRequest, AppError> {
    let value: serde_json::Value = serde_json::from_str(line)?;
    if value.get("pose_type").is_some() {
        Ok(LineRequest::Feedback(serde_json::from_value(value)?))
    } else {
        Ok(LineRequest::QuickCheck(serde_json::from_value(value)?))
    }
}

#[cfg(test)]
impl FeedbackServiceHandle {
    /// A handle whose mailbox is never drained. Keep the receiver alive to
    /// make every submit wait out the timeout.
    fn stalled(config: &Config) -> (Self, mpsc::Receiver<FeedbackMessage>) {
        let (sender, receiver) = mpsc::channel(config.channel_capacity);
        let handle = Self {
            sender,
            request_timeout: config.request_timeout(),
        };
        (handle, receiver)
    }
}

// --- Actor Runner ---
struct FeedbackRunner {
    receiver: mpsc::Receiver<FeedbackMessage>,
    coach: FormCoach,
    max_keypoints: usize,
}

impl FeedbackRunner {
    async fn run(mut self) {
        info!("Feedback actor started");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                FeedbackMessage::Analyze { request, responder } => {
                    let result = self.handle(request);
                    // The caller may have timed out and dropped the receiver
                    let _ = responder.send(result);
                }
                FeedbackMessage::QuickCheck { request, responder } => {
                    let _ = responder.send(self.handle_quick_check(request));
                }
                FeedbackMessage::Shutdown => {
                    info!("Feedback actor shutting down");
                    break;
                }
            }
        }
        self.receiver.close();
    }

    fn handle(&self, request: PoseFeedbackRequest) -> Result<FeedbackResponse, AppError> {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "pose_feedback",
            %request_id,
            pose_type = %request.pose_type,
            user_id = %request.user_id,
            keypoints = request.keypoints.len(),
        );
        let _guard = span.enter();

        if let Err(e) = request.validate_with_limit(self.max_keypoints) {
            warn!(error = %e, "Rejected pose feedback request");
            return Err(e);
        }

        let keypoints = request.core_keypoints();
        let response = self.coach.feedback(&request.pose_type, &keypoints);
        debug!(summary = %response.summary(), "Pose feedback ready");
        Ok(response)
    }

    fn handle_quick_check(
        &self,
        request: QuickCheckRequest,
    ) -> Result<QuickCheckResponse, AppError> {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "quick_check",
            %request_id,
            user_id = %request.user(),
            keypoints = request.keypoints.len(),
        );
        let _guard = span.enter();

        if let Err(e) = request.validate_with_limit(self.max_keypoints) {
            warn!(error = %e, "Rejected quick check request");
            return Err(e);
        }

        let check = quick_squat_check(&request.named_keypoints());
        debug!(?check, "Quick check ready");
        Ok(QuickCheckResponse {
            feedback: check.message().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KeypointInput;

    fn squat_request(pose_type: &str) -> PoseFeedbackRequest {
        PoseFeedbackRequest {
            pose_type: pose_type.to_string(),
            keypoints: vec![
                KeypointInput::new(100.0, 100.0, 0.9),
                KeypointInput::new(160.0, 200.0, 0.9),
                KeypointInput::new(100.0, 300.0, 0.9),
            ],
            user_id: "tester".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_returns_feedback() {
        let handle = FeedbackServiceHandle::new(&Config::default());
        let response = handle.submit(squat_request("squat")).await.unwrap();
        assert_eq!(response.tips.len(), 1);
        assert!((0.0..=1.0).contains(&response.score));
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected() {
        let handle = FeedbackServiceHandle::new(&Config::default());
        let mut request = squat_request("squat");
        request.keypoints[0].x = f64::INFINITY;
        let err = handle.submit(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_submit_after_shutdown_fails() {
        let handle = FeedbackServiceHandle::new(&Config::default());
        handle.shutdown().await.unwrap();

        let mut closed = false;
        for _ in 0..100 {
            if handle.is_closed() {
                closed = true;
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(closed, "actor mailbox should close after shutdown");

        let err = handle.submit(squat_request("squat")).await.unwrap_err();
        assert!(matches!(err, AppError::Service(_)));
    }

    #[tokio::test]
    async fn test_stalled_actor_times_out() {
        let config = Config {
            request_timeout_ms: 20,
            ..Config::default()
        };
        let (handle, _mailbox) = FeedbackServiceHandle::stalled(&config);

        let err = handle.submit(squat_request("squat")).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout(_)));

        let reply = handle.respond_to_line(r#"{"keypoints": []}"#).await.unwrap();
        assert!(reply.contains("timed out"));
    }

    #[tokio::test]
    async fn test_quick_check_through_actor() {
        let handle = FeedbackServiceHandle::new(&Config::default());
        let request = QuickCheckRequest {
            keypoints: vec![
                KeypointInput::named("left_hip", 200.0, 290.0, 0.9),
                KeypointInput::named("left_knee", 220.0, 300.0, 0.9),
                KeypointInput::named("left_ankle", 210.0, 400.0, 0.9),
            ],
            user_id: None,
        };
        let response = handle.submit_quick_check(request).await.unwrap();
        assert_eq!(response.feedback, "Good squat!");
    }

    #[test]
    fn test_parse_line_routes_on_pose_type() {
        let feedback = parse_line(r#"{"pose_type": "squat", "keypoints": [], "user_id": "u"}"#);
        assert!(matches!(feedback, Ok(LineRequest::Feedback(_))));
        let quick = parse_line(r#"{"keypoints": [], "user_id": "u"}"#);
        assert!(matches!(quick, Ok(LineRequest::QuickCheck(_))));
        assert!(parse_line(r#"{"pose_type": "squat", "keypoints": []}"#).is_err());
        assert!(parse_line(r#"{"user_id": "u"}"#).is_err());
    }
}
