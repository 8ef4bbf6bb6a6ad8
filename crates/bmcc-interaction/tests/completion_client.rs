mod common;

use bmcc_core::secret::StaticSecretService;
use bmcc_core::{ApplicantProfile, GuideError, KnowledgeBase};
use bmcc_interaction::{CompletionClient, RetryPolicy};
use common::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn success_after_three_overloads_waits_one_two_four() {
    let transport = ScriptedTransport::new(vec![
        status(503),
        status(503),
        status(503),
        ok_answer("Step 1: Apply on CUNY.", &["a?", "b?", "c?"]),
    ]);
    let sleeper = Arc::new(RecordingSleeper::default());
    let client = client_with(transport.clone(), sleeper.clone());

    let completion = client
        .try_generate("How do I apply?", &ApplicantProfile::default())
        .await
        .unwrap();

    assert_eq!(completion.answer, "Step 1: Apply on CUNY.");
    assert_eq!(completion.suggestions, vec!["a?", "b?", "c?"]);
    assert_eq!(sleeper.secs(), vec![1, 2, 4]);
    assert_eq!(transport.calls(), 4);
}

#[tokio::test]
async fn five_overloads_give_busy_after_four_waits() {
    let transport = ScriptedTransport::new(vec![status(503); 5]);
    let sleeper = Arc::new(RecordingSleeper::default());
    let client = client_with(transport.clone(), sleeper.clone());

    let err = client
        .try_generate("hi", &ApplicantProfile::default())
        .await
        .unwrap_err();
    assert_eq!(err, GuideError::ServiceBusy { attempts: 5 });
    assert_eq!(sleeper.secs(), vec![1, 2, 4, 8]);
    assert_eq!(transport.calls(), 5);

    let transport = ScriptedTransport::new(vec![status(503); 5]);
    let completion = client_with(transport, Arc::new(RecordingSleeper::default()))
        .generate("hi", &ApplicantProfile::default())
        .await;
    assert!(completion.answer.contains("busy"));
    assert!(completion.suggestions.is_empty());
}

#[tokio::test]
async fn missing_key_sends_nothing() {
    let transport = ScriptedTransport::new(vec![]);
    let sleeper = Arc::new(RecordingSleeper::default());
    let client = CompletionClient::new(
        transport.clone(),
        Arc::new(StaticSecretService::default()),
        KnowledgeBase::bmcc(),
        "gemini-2.5-flash",
    )
    .with_sleeper(sleeper.clone());

    let err = client
        .try_generate("hi", &ApplicantProfile::default())
        .await
        .unwrap_err();
    assert!(err.is_missing_credential());
    assert_eq!(transport.calls(), 0);
    assert!(sleeper.secs().is_empty());

    let completion = client.generate("hi", &ApplicantProfile::default()).await;
    assert!(completion.answer.contains("API key missing"));
    assert!(completion.suggestions.is_empty());
}

#[tokio::test]
async fn blank_key_counts_as_missing() {
    let transport = ScriptedTransport::new(vec![]);
    let client = CompletionClient::new(
        transport.clone(),
        Arc::new(StaticSecretService::with_api_key("   ")),
        KnowledgeBase::bmcc(),
        "gemini-2.5-flash",
    );

    let err = client
        .try_generate("hi", &ApplicantProfile::default())
        .await
        .unwrap_err();
    assert!(err.is_missing_credential());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn other_status_is_not_retried() {
    let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
    let transport = ScriptedTransport::new(vec![Ok(bmcc_interaction::TransportResponse::new(
        400, body,
    ))]);
    let sleeper = Arc::new(RecordingSleeper::default());
    let client = client_with(transport.clone(), sleeper.clone());

    let completion = client.generate("hi", &ApplicantProfile::default()).await;
    assert_eq!(
        completion.answer,
        "Error connecting to AI: 400 (INVALID_ARGUMENT: API key not valid.)"
    );
    assert!(completion.suggestions.is_empty());
    assert_eq!(transport.calls(), 1);
    assert!(sleeper.secs().is_empty());
}

#[tokio::test]
async fn http_error_during_backoff_ends_the_loop() {
    let transport = ScriptedTransport::new(vec![status(503), status(500)]);
    let sleeper = Arc::new(RecordingSleeper::default());
    let client = client_with(transport.clone(), sleeper.clone());

    let err = client
        .try_generate("hi", &ApplicantProfile::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GuideError::Http { status: 500, .. }));
    assert_eq!(sleeper.secs(), vec![1]);
}

#[tokio::test]
async fn first_network_failure_is_surfaced_immediately() {
    let transport = ScriptedTransport::new(vec![network_error()]);
    let sleeper = Arc::new(RecordingSleeper::default());
    let client = client_with(transport.clone(), sleeper.clone());

    let err = client
        .try_generate("hi", &ApplicantProfile::default())
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert_eq!(transport.calls(), 1);
    assert!(sleeper.secs().is_empty());
}

#[tokio::test]
async fn network_failure_while_retrying_keeps_backing_off() {
    let transport = ScriptedTransport::new(vec![
        status(503),
        Err(GuideError::Timeout),
        ok_answer("done", &[]),
    ]);
    let sleeper = Arc::new(RecordingSleeper::default());
    let client = client_with(transport.clone(), sleeper.clone());

    let completion = client
        .try_generate("hi", &ApplicantProfile::default())
        .await
        .unwrap();
    assert_eq!(completion.answer, "done");
    assert_eq!(sleeper.secs(), vec![1, 2]);
}

#[tokio::test]
async fn network_failure_on_final_attempt_is_error_shaped() {
    let transport = ScriptedTransport::new(vec![
        status(503),
        status(503),
        status(503),
        status(503),
        network_error(),
    ]);
    let sleeper = Arc::new(RecordingSleeper::default());
    let client = client_with(transport.clone(), sleeper.clone());

    let completion = client.generate("hi", &ApplicantProfile::default()).await;
    assert!(completion.answer.contains("connection refused"));
    assert!(completion.suggestions.is_empty());
    assert_eq!(sleeper.secs(), vec![1, 2, 4, 8]);
    assert_eq!(transport.calls(), 5);
}

#[tokio::test]
async fn answer_missing_suggestions_is_malformed() {
    let transport = ScriptedTransport::new(vec![ok_text(r#"{"answer":"Step 1"}"#)]);
    let client = client_with(transport, Arc::new(RecordingSleeper::default()));

    let err = client
        .try_generate("hi", &ApplicantProfile::default())
        .await
        .unwrap_err();
    assert!(err.is_malformed());
}

#[tokio::test]
async fn plain_text_answer_is_malformed() {
    let transport = ScriptedTransport::new(vec![ok_text("Step 1: apply online.")]);
    let client = client_with(transport, Arc::new(RecordingSleeper::default()));

    let completion = client.generate("hi", &ApplicantProfile::default()).await;
    assert!(completion.answer.starts_with("Error: the AI service returned an answer"));
    assert!(completion.suggestions.is_empty());
}

#[tokio::test]
async fn request_is_single_turn_and_grounded() {
    let transport = ScriptedTransport::new(vec![ok_answer("ok", &[])]);
    let client = client_with(transport.clone(), Arc::new(RecordingSleeper::default()));

    client
        .try_generate("When is the deadline?", &ApplicantProfile::default())
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.user_message, "When is the deadline?");
    assert_eq!(request.api_key, "test-key");
    assert_eq!(request.model, "gemini-2.5-flash");
    assert!(request.system_instruction.contains("Fall: Feb 1 (Priority)."));
    assert!(request.system_instruction.contains("USER PROFILE: User is Not provided."));
    assert!(!format!("{request:?}").contains("test-key"));
}

#[tokio::test]
async fn custom_policy_controls_attempts_and_delays() {
    let transport = ScriptedTransport::new(vec![status(503); 3]);
    let sleeper = Arc::new(RecordingSleeper::default());
    let client = client_with(transport.clone(), sleeper.clone()).with_policy(RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_secs(2),
    });

    let err = client
        .try_generate("hi", &ApplicantProfile::default())
        .await
        .unwrap_err();
    assert_eq!(err, GuideError::ServiceBusy { attempts: 3 });
    assert_eq!(sleeper.secs(), vec![2, 4]);
}
