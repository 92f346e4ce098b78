use crate::e2e::helpers;

use helpers::google_mocks::{
    api_error, failed_operation, finished_operation, mount_poll, mount_poll_forever_running,
    mount_start, running_operation, synthesize_path,
};
use helpers::{TestContext, TEST_OPERATION, TEST_TOKEN};
use long_audio_synth::domain::synthesis::{SynthesisError, SynthesisSubmitterApi};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use test_context::test_context;
use tokio_util::sync::CancellationToken;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_long_audio_into_destination(ctx: &mut TestContext) {
    ctx.write_text("Chapter One\n\nIt was a bright cold day in April.\n");
    mount_start(&ctx.server, 200, running_operation(), 1).await;
    mount_poll(&ctx.server, finished_operation(), 1).await;

    let completed = ctx
        .submitter()
        .submit(&ctx.job(), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(completed.operation.name(), TEST_OPERATION);
    assert_eq!(completed.destination_uri, "gs://test-bucket/audio/output.wav");

    let requests = ctx.received().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.path(), synthesize_path());
    assert_eq!(
        requests[0].headers.get("authorization").unwrap(),
        format!("Bearer {}", TEST_TOKEN).as_str()
    );

    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(
        body,
        json!({
            "input": { "text": "Chapter One\n\nIt was a bright cold day in April.\n" },
            "voice": {
                "languageCode": "en-US",
                "name": "en-US-Wavenet-D",
                "ssmlGender": "NEUTRAL"
            },
            "audioConfig": { "audioEncoding": "LINEAR16" },
            "outputGcsUri": "gs://test-bucket/audio/output.wav"
        })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_text_verbatim(ctx: &mut TestContext) {
    let text = "  Ünïcödé — leading and trailing whitespace\r\n\t \n";
    ctx.write_text(text);
    mount_start(&ctx.server, 200, finished_operation(), 1).await;
    mount_poll(&ctx.server, finished_operation(), 0).await;

    ctx.submitter()
        .submit(&ctx.job(), CancellationToken::new())
        .await
        .unwrap();

    let requests = ctx.received().await;
    assert_eq!(requests.len(), 1);
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["input"]["text"], text);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_let_the_provider_pick_the_voice_when_unset(ctx: &mut TestContext) {
    ctx.config.voice_name = None;
    ctx.write_text("Hello.");
    mount_start(&ctx.server, 200, finished_operation(), 1).await;

    ctx.submitter()
        .submit(&ctx.job(), CancellationToken::new())
        .await
        .unwrap();

    let requests = ctx.received().await;
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["voice"], json!({ "languageCode": "en-US", "ssmlGender": "NEUTRAL" }));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_call_google_when_text_file_is_missing(ctx: &mut TestContext) {
    let mut job = ctx.job();
    job.text_file_path = ctx.missing_path();

    let err = ctx
        .submitter()
        .submit(&job, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SynthesisError::FileNotFound { .. }), "{:?}", err);
    assert!(ctx.received().await.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_fast_when_submission_is_rejected(ctx: &mut TestContext) {
    ctx.write_text("Hello.");
    mount_start(
        &ctx.server,
        400,
        api_error(400, "INVALID_ARGUMENT", "Voice 'en-US-Nope' does not exist."),
        1,
    )
    .await;
    mount_poll(&ctx.server, finished_operation(), 0).await;

    let err = ctx
        .submitter()
        .submit(&ctx.job(), CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        SynthesisError::RemoteSubmission(message) => {
            assert!(message.contains("INVALID_ARGUMENT"), "{}", message);
            assert!(message.contains("does not exist"), "{}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_operation_failure_once(ctx: &mut TestContext) {
    ctx.write_text("Hello.");
    mount_start(&ctx.server, 200, running_operation(), 1).await;
    mount_poll(
        &ctx.server,
        failed_operation(7, "Permission denied on gs://test-bucket"),
        1,
    )
    .await;

    let err = ctx
        .submitter()
        .submit(&ctx.job(), CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        SynthesisError::RemoteOperation { operation, message } => {
            assert_eq!(operation, TEST_OPERATION);
            assert!(message.contains("Permission denied"), "{}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_give_up_waiting_after_the_timeout(ctx: &mut TestContext) {
    ctx.set_timeout(Duration::from_millis(200));
    ctx.write_text("Hello.");
    mount_start(&ctx.server, 200, running_operation(), 1).await;
    mount_poll_forever_running(&ctx.server).await;

    let err = ctx
        .submitter()
        .submit(&ctx.job(), CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SynthesisError::Timeout { .. }), "{:?}", err);

    let starts = ctx
        .received()
        .await
        .iter()
        .filter(|request| request.method.as_str() == "POST")
        .count();
    assert_eq!(starts, 1);
}
