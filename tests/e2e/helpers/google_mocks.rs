use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{TEST_OPERATION, TEST_PROJECT, TEST_TOKEN};

pub fn synthesize_path() -> String {
    format!(
        "/v1/projects/{}/locations/global:synthesizeLongAudio",
        TEST_PROJECT
    )
}

pub fn operation_path() -> String {
    format!("/v1/{}", TEST_OPERATION)
}

pub fn running_operation() -> Value {
    json!({
        "name": TEST_OPERATION,
        "metadata": {
            "@type": "type.googleapis.com/google.cloud.texttospeech.v1.SynthesizeLongAudioMetadata",
            "startTime": "2026-10-16T09:00:00Z",
            "progressPercentage": 0.0
        }
    })
}

pub fn finished_operation() -> Value {
    json!({
        "name": TEST_OPERATION,
        "done": true,
        "response": {
            "@type": "type.googleapis.com/google.cloud.texttospeech.v1.SynthesizeLongAudioResponse"
        }
    })
}

pub fn failed_operation(code: i32, message: &str) -> Value {
    json!({
        "name": TEST_OPERATION,
        "done": true,
        "error": { "code": code, "message": message }
    })
}

pub fn api_error(code: u16, status: &str, message: &str) -> Value {
    json!({
        "error": { "code": code, "message": message, "status": status }
    })
}

/// synthesizeLongAudio accepting the request with the given operation body
pub async fn mount_start(server: &MockServer, status: u16, body: Value, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(synthesize_path()))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// operations.get answering with the given operation body
pub async fn mount_poll(server: &MockServer, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(operation_path()))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// operations.get that keeps reporting a running job
pub async fn mount_poll_forever_running(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(operation_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(running_operation()))
        .mount(server)
        .await;
}
