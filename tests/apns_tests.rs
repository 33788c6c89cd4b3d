//! APNs sender and dispatch tests against a mock gateway

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use callkeep_push::application::ports::{PushError, PushSender};
use callkeep_push::application::{DispatchError, PushDispatcher};
use callkeep_push::domain::{NotificationPayload, Provider};
use callkeep_push::infrastructure::{ApnsSender, FcmSender};

fn mock_sender(server: &MockServer) -> ApnsSender {
    ApnsSender::with_client(reqwest::Client::new(), server.uri())
}

#[tokio::test]
async fn sends_voip_push_and_returns_apns_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/3/device/TOKEN123"))
        .and(header("apns-push-type", "voip"))
        .and(header("apns-priority", "10"))
        .and(header("apns-topic", "com.example.callkeep.voip"))
        .and(body_json(json!({
            "caller_id": "5551234",
            "caller_name": "push test",
            "caller_id_type": "number",
            "has_video": "false"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("apns-id", "EC1BF194-B3B2-424A-89A9-5A918A6E6B5B"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sender =
        mock_sender(&server).with_topic(Some("com.example.callkeep.voip".to_string()));
    let receipt = sender
        .send("TOKEN123", &NotificationPayload::incoming_call("5551234"))
        .await
        .unwrap();

    assert_eq!(receipt.provider, Provider::Apns);
    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.message_id, "EC1BF194-B3B2-424A-89A9-5A918A6E6B5B");
}

#[tokio::test]
async fn bad_device_token_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/3/device/not-a-token"))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header("apns-id", "6E5D0F0B-0000-0000-0000-000000000000")
                .set_body_json(json!({ "reason": "BadDeviceToken" })),
        )
        .mount(&server)
        .await;

    let err = mock_sender(&server)
        .send("not-a-token", &NotificationPayload::incoming_call("1"))
        .await
        .unwrap_err();

    match err {
        PushError::Rejected { status, reason } => {
            assert_eq!(status, 400);
            assert_eq!(reason, "BadDeviceToken");
        }
        other => panic!("Expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_gateway_is_a_request_error() {
    // Nothing listens on the discard port
    let sender = ApnsSender::with_client(reqwest::Client::new(), "http://127.0.0.1:9");
    let err = sender
        .send("TOKEN", &NotificationPayload::incoming_call("1"))
        .await
        .unwrap_err();
    assert!(matches!(err, PushError::RequestFailed(_)));
}

#[tokio::test]
async fn dispatch_routes_apns_to_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/3/device/TOKEN"))
        .and(header("apns-push-type", "voip"))
        .respond_with(ResponseTemplate::new(200).insert_header("apns-id", "abc"))
        .expect(1)
        .mount(&server)
        .await;

    // FCM credentials do not exist, so any FCM call would fail loudly
    let fcm = FcmSender::new("/nonexistent/callkeep-fcm.json").with_endpoint(server.uri());
    let dispatcher = PushDispatcher::new(mock_sender(&server), fcm);

    let receipt = dispatcher
        .dispatch("apns", "TOKEN", &NotificationPayload::incoming_call("42"))
        .await
        .unwrap();
    assert_eq!(receipt.message_id, "abc");
}

#[tokio::test]
async fn dispatch_unknown_provider_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let fcm = FcmSender::new("/nonexistent/callkeep-fcm.json").with_endpoint(server.uri());
    let dispatcher = PushDispatcher::new(mock_sender(&server), fcm);

    let err = dispatcher
        .dispatch("xyz", "TOKEN", &NotificationPayload::incoming_call("1"))
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::ProviderNotFound(_)));
    assert_eq!(err.to_string(), "xyz provider not found");
}
