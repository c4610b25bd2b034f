//! Tests for the AnkiConnect actions used by the batch driver.

mod common;

use std::collections::HashMap;

use clozenest_connect::{AnkiClient, Error};
use common::{
    client_for_mock, mock_action, mock_action_with_params, mock_anki_error, mock_anki_response,
    setup_mock_server,
};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_find_notes() {
    let server = setup_mock_server().await;
    mock_action_with_params(
        &server,
        "findNotes",
        serde_json::json!({"query": "deck:Biology"}),
        mock_anki_response(vec![1_i64, 2, 3]),
    )
    .await;

    let client = client_for_mock(&server);
    let ids = client.notes().find("deck:Biology").await.unwrap();

    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_notes_info() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "notesInfo",
        mock_anki_response(vec![serde_json::json!({
            "noteId": 1_i64,
            "modelName": "Cloze",
            "tags": [],
            "fields": {
                "Text": {"value": "{{c1::Paris}}", "order": 0},
                "Back Extra": {"value": "", "order": 1}
            },
            "cards": [10_i64]
        })]),
    )
    .await;

    let client = client_for_mock(&server);
    let notes = client.notes().info(&[1]).await.unwrap();

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].model_name, "Cloze");
    assert_eq!(
        notes[0].ordered_fields(),
        vec![("Text", "{{c1::Paris}}"), ("Back Extra", "")]
    );
}

#[tokio::test]
async fn test_notes_info_unknown_id_fails_to_decode() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "notesInfo",
        mock_anki_response(vec![serde_json::json!({})]),
    )
    .await;

    let client = client_for_mock(&server);
    let result = client.notes().info(&[404]).await;

    assert!(matches!(result, Err(Error::Json(_))));
}

#[tokio::test]
async fn test_update_fields() {
    let server = setup_mock_server().await;
    mock_action_with_params(
        &server,
        "updateNoteFields",
        serde_json::json!({"note": {"id": 42, "fields": {"Text": "{{c1::new}}"}}}),
        mock_anki_response(serde_json::Value::Null),
    )
    .await;

    let client = client_for_mock(&server);
    let mut fields = HashMap::new();
    fields.insert("Text".to_string(), "{{c1::new}}".to_string());

    client.notes().update_fields(42, &fields).await.unwrap();
}

#[tokio::test]
async fn test_update_fields_error() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "updateNoteFields",
        mock_anki_error("note was not found: 42"),
    )
    .await;

    let client = client_for_mock(&server);
    let err = client
        .notes()
        .update_fields(42, &HashMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::AnkiConnect(msg) if msg.contains("not found")));
}

#[tokio::test]
async fn test_model_names_and_ids() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "modelNamesAndIds",
        mock_anki_response(serde_json::json!({"Cloze": 1_i64, "Basic": 2_i64})),
    )
    .await;

    let client = client_for_mock(&server);
    let models = client.models().names_and_ids().await.unwrap();

    assert_eq!(models.get("Cloze"), Some(&1));
    assert_eq!(models.len(), 2);
}

#[tokio::test]
async fn test_version() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;

    let client = client_for_mock(&server);
    assert_eq!(client.misc().version().await.unwrap(), 6);
}

#[tokio::test]
async fn test_api_key_is_sent() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "version",
            "key": "secret"
        })))
        .respond_with(mock_anki_response(6))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnkiClient::builder()
        .url(server.uri())
        .api_key("secret")
        .build()
        .unwrap();
    assert_eq!(client.misc().version().await.unwrap(), 6);
}

#[tokio::test]
async fn test_permission_denied() {
    let server = setup_mock_server().await;
    mock_action(&server, "findNotes", mock_anki_error("permission denied")).await;

    let client = client_for_mock(&server);
    let err = client.notes().find("deck:*").await.unwrap_err();

    assert!(matches!(err, Error::PermissionDenied));
}

#[tokio::test]
async fn test_empty_response() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "findNotes",
        mock_anki_response(serde_json::Value::Null),
    )
    .await;

    let client = client_for_mock(&server);
    let err = client.notes().find("deck:*").await.unwrap_err();

    assert!(matches!(err, Error::EmptyResponse));
}

#[tokio::test]
async fn test_malformed_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    let err = client.misc().version().await.unwrap_err();

    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    // Use a port that's almost certainly not in use
    let client = AnkiClient::builder()
        .url("http://127.0.0.1:59999")
        .build()
        .unwrap();

    let err = client.misc().version().await.unwrap_err();
    assert!(
        err.to_string().contains("Could not connect to Anki"),
        "Expected connection refused error, got: {}",
        err
    );
}
