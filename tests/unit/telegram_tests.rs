use task_relay::telegram::client::{ApiResponse, WireMessage};

#[test]
fn parses_a_send_message_response() {
    let body = r#"{
        "ok": true,
        "result": {
            "message_id": 4242,
            "date": 1700000000,
            "chat": { "id": -1001, "type": "supergroup" },
            "text": "ignored"
        }
    }"#;

    let response: ApiResponse<WireMessage> = serde_json::from_str(body).expect("parse response");
    assert!(response.ok);
    assert_eq!(response.result.map(|m| m.message_id), Some(4242));
}

#[test]
fn parses_an_error_response() {
    let body = r#"{
        "ok": false,
        "error_code": 400,
        "description": "Bad Request: chat not found"
    }"#;

    let response: ApiResponse<WireMessage> = serde_json::from_str(body).expect("parse response");
    assert!(!response.ok);
    assert!(response.result.is_none());
    assert_eq!(
        response.description.as_deref(),
        Some("Bad Request: chat not found")
    );
}
