//! FCM sender tests against a mock FCM and OAuth server

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use callkeep_push::application::ports::{PushError, PushSender};
use callkeep_push::domain::{NotificationPayload, Provider};
use callkeep_push::infrastructure::fcm::ServiceAccountKey;
use callkeep_push::infrastructure::FcmSender;

use common::{write_service_account, PROJECT_ID};

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.test-token",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn sends_data_message_and_returns_name() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let credentials = write_service_account(dir.path(), &format!("{}/token", server.uri()));

    mount_token_endpoint(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/projects/{}/messages:send", PROJECT_ID)))
        .and(header("authorization", "Bearer ya29.test-token"))
        .and(body_json(json!({
            "message": {
                "token": "TOKEN123",
                "data": {
                    "caller_id": "5551234",
                    "caller_name": "push test",
                    "caller_id_type": "number",
                    "has_video": "false"
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/callkeep-demo/messages/0:1500415314455276%31bd1c9631bd1c96"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sender = FcmSender::new(credentials).with_endpoint(server.uri());
    let receipt = sender
        .send("TOKEN123", &NotificationPayload::incoming_call("5551234"))
        .await
        .unwrap();

    assert_eq!(receipt.provider, Provider::Fcm);
    assert_eq!(receipt.status, 200);
    assert!(receipt
        .message_id
        .starts_with("projects/callkeep-demo/messages/0:"));
}

#[tokio::test]
async fn unregistered_token_is_rejected() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let credentials = write_service_account(dir.path(), &format!("{}/token", server.uri()));

    mount_token_endpoint(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/projects/{}/messages:send", PROJECT_ID)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": 404,
                "message": "Requested entity was not found.",
                "status": "NOT_FOUND",
                "details": [{
                    "@type": "type.googleapis.com/google.firebase.fcm.v1.FcmError",
                    "errorCode": "UNREGISTERED"
                }]
            }
        })))
        .mount(&server)
        .await;

    let sender = FcmSender::new(credentials).with_endpoint(server.uri());
    let err = sender
        .send("stale-token", &NotificationPayload::incoming_call("1"))
        .await
        .unwrap_err();

    match err {
        PushError::Rejected { status, reason } => {
            assert_eq!(status, 404);
            assert!(reason.contains("UNREGISTERED"), "got: {}", reason);
        }
        other => panic!("Expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn failed_token_exchange_is_an_auth_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let credentials = write_service_account(dir.path(), &format!("{}/token", server.uri()));

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid JWT Signature."
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/projects/{}/messages:send", PROJECT_ID)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sender = FcmSender::new(credentials).with_endpoint(server.uri());
    let err = sender
        .send("TOKEN", &NotificationPayload::incoming_call("1"))
        .await
        .unwrap_err();

    match err {
        PushError::Auth(msg) => assert!(msg.contains("invalid_grant"), "got: {}", msg),
        other => panic!("Expected auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn assertion_is_signed_with_service_account_key() {
    let dir = tempfile::tempdir().unwrap();
    let credentials = write_service_account(dir.path(), "https://oauth2.googleapis.com/token");

    let account = ServiceAccountKey::from_file(&credentials).await.unwrap();
    let jwt = account.signed_assertion(1_700_000_000).unwrap();

    // header.claims.signature
    assert_eq!(jwt.split('.').count(), 3);
}
