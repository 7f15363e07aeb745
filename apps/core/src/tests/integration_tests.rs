//! Integration Tests
//!
//! JSON line in, JSON line out: the path the stdin/stdout front end takes.

use crate::config::Config;
use crate::service::FeedbackServiceHandle;
use serde_json::{json, Value};

// ============================================================================
// Test Fixtures
// ============================================================================

fn handle() -> FeedbackServiceHandle {
    FeedbackServiceHandle::new(&Config::default())
}

async fn reply(handle: &FeedbackServiceHandle, request: Value) -> Value {
    let line = handle
        .respond_to_line(&request.to_string())
        .await
        .expect("non-blank line should get a reply");
    serde_json::from_str(&line).expect("reply should be JSON")
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_collinear_squat_line() {
    let handle = handle();
    let response = reply(
        &handle,
        json!({
            "pose_type": "squat",
            "keypoints": [
                {"x": 0.5, "y": 0.3, "score": 0.9},
                {"x": 0.5, "y": 0.6, "score": 0.8},
                {"x": 0.5, "y": 0.8, "score": 0.7}
            ],
            "user_id": "u1"
        }),
    )
    .await;

    assert_eq!(
        response,
        json!({
            "tips": ["Stand up straight and prepare for the next squat."],
            "score": 0.7
        })
    );
}

#[tokio::test]
async fn test_deep_squat_line() {
    let handle = handle();
    let response = reply(
        &handle,
        json!({
            "pose_type": "SQUAT",
            "keypoints": [
                {"x": 200.0, "y": 300.0, "score": 0.9},
                {"x": 260.0, "y": 320.0, "score": 0.9},
                {"x": 200.0, "y": 340.0, "score": 0.9}
            ],
            "user_id": "u1"
        }),
    )
    .await;

    assert_eq!(response["score"], json!(0.9));
    assert_eq!(
        response["tips"][0],
        json!("Great depth! Keep your chest up and knees aligned with toes.")
    );
}

#[tokio::test]
async fn test_cartwheel_line() {
    let handle = handle();
    let response = reply(
        &handle,
        json!({
            "pose_type": "cartwheel",
            "keypoints": [{"x": 1.0, "y": 2.0, "score": 0.3}],
            "user_id": "u2"
        }),
    )
    .await;

    assert_eq!(
        response,
        json!({
            "tips": ["Exercise 'cartwheel' not yet supported. Keep up the good work!"],
            "score": 0.8
        })
    );
}

#[tokio::test]
async fn test_named_movenet_line() {
    let handle = handle();
    let response = reply(
        &handle,
        json!({
            "pose_type": "push-up",
            "keypoints": [
                {"name": "nose", "x": 50.0, "y": 50.0, "score": 0.9},
                {"name": "left_wrist", "x": 100.0, "y": 100.0, "score": 0.8},
                {"name": "left_elbow", "x": 0.0, "y": 0.0, "score": 0.8},
                {"name": "left_shoulder", "x": 0.0, "y": 100.0, "score": 0.9}
            ],
            "user_id": "u3"
        }),
    )
    .await;

    // Shoulder above elbow, wrist out to the side: a 45 degree elbow
    assert_eq!(response["score"], json!(0.9));
}

#[tokio::test]
async fn test_malformed_lines_report_errors() {
    let handle = handle();

    let line = handle.respond_to_line("{not json").await.unwrap();
    let value: Value = serde_json::from_str(&line).unwrap();
    assert!(value["error"].as_str().unwrap().contains("JSON error"));

    let missing_user = json!({"pose_type": "plank", "keypoints": []});
    let value = reply(&handle, missing_user).await;
    assert!(value["error"].is_string());

    // The stream keeps working after errors
    let value = reply(
        &handle,
        json!({"pose_type": "plank", "keypoints": [], "user_id": "u4"}),
    )
    .await;
    assert_eq!(value["score"], json!(0.5));
}

#[tokio::test]
async fn test_unrecognized_names_use_positional_order() {
    let handle = handle();
    let response = reply(
        &handle,
        json!({
            "pose_type": "squat",
            "keypoints": [
                {"name": "hip", "x": 200.0, "y": 300.0, "score": 0.9},
                {"name": "knee", "x": 260.0, "y": 320.0, "score": 0.9},
                {"name": "ankle", "x": 200.0, "y": 340.0, "score": 0.9}
            ],
            "user_id": "u5"
        }),
    )
    .await;

    assert_eq!(response["score"], json!(0.9));
}

#[tokio::test]
async fn test_quick_check_lines() {
    let handle = handle();
    let leg = |hip_y: f64| {
        json!({
            "keypoints": [
                {"name": "left_hip", "x": 200.0, "y": hip_y, "score": 0.9},
                {"name": "left_knee", "x": 220.0, "y": 300.0, "score": 0.9},
                {"name": "left_ankle", "x": 210.0, "y": 400.0, "score": 0.9}
            ],
            "user_id": "demo-user"
        })
    };

    assert_eq!(reply(&handle, leg(285.0)).await, json!({"feedback": "Good squat!"}));
    assert_eq!(reply(&handle, leg(200.0)).await, json!({"feedback": "Go lower!"}));

    let anonymous = json!({"keypoints": [{"name": "nose", "x": 1.0, "y": 1.0, "score": 0.9}]});
    assert_eq!(
        reply(&handle, anonymous).await,
        json!({"feedback": "Pose not detected"})
    );
}

#[tokio::test]
async fn test_blank_lines_are_skipped() {
    let handle = handle();
    assert_eq!(handle.respond_to_line("").await, None);
    assert_eq!(handle.respond_to_line("   \t").await, None);
}
