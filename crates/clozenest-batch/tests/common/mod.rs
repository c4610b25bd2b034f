//! Common test utilities for batch driver tests.

use clozenest_batch::{MemoryStore, StoredNote};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A small collection covering every path through the driver.
///
/// | id | model | outcome under `Consistent` |
/// |----|-------|----------------------------|
/// | 1 | Cloze | modified |
/// | 2 | Cloze | fails (already wrapped) |
/// | 3 | Cloze | unchanged |
/// | 4 | Image Occlusion | skipped (exempt field) |
/// | 5 | Basic | modified, or skipped by note type |
#[allow(dead_code)]
pub fn sample_store() -> MemoryStore {
    MemoryStore::with_notes([
        StoredNote::new(1, "Cloze", [("Text", "{{c1::a}} {{c2::b}}"), ("Back Extra", "")]),
        StoredNote::new(
            2,
            "Cloze",
            [("Text", "{{c3::{{c1::a}}}} {{c3::{{c2::b}}}}"), ("Back Extra", "")],
        ),
        StoredNote::new(3, "Cloze", [("Text", "{{c1::only one}}"), ("Back Extra", "")]),
        StoredNote::new(
            4,
            "Image Occlusion",
            [("Occlusion", "{{c1::image-occlusion:rect}}"), ("Header", "{{c1::x}} {{c2::y}}")],
        ),
        StoredNote::new(5, "Basic", [("Front", "{{c1::H}} {{c2::He}}"), ("Back", "gases")]),
    ])
    .with_note_type("Cloze", 100)
    .with_note_type("Basic", 200)
}

/// Create a successful AnkiConnect response.
#[allow(dead_code)]
pub fn mock_anki_response(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": result,
        "error": null
    }))
}

/// Create an error AnkiConnect response.
#[allow(dead_code)]
pub fn mock_anki_error(error: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": null,
        "error": error
    }))
}

/// Mount a mock for an action, expected `times` times.
///
/// A `Null` `params` matches any request for the action.
#[allow(dead_code)]
pub async fn mock_action(
    server: &MockServer,
    action: &str,
    params: serde_json::Value,
    response: ResponseTemplate,
    times: u64,
) {
    let mut body = serde_json::json!({
        "action": action,
        "version": 6
    });
    if !params.is_null() {
        body["params"] = params;
    }

    Mock::given(method("POST"))
        .and(body_partial_json(body))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// A `notesInfo` entry for a Cloze note with `Text` and `Back Extra` fields.
#[allow(dead_code)]
pub fn cloze_note_info(id: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "noteId": id,
        "modelName": "Cloze",
        "tags": [],
        "fields": {
            "Text": {"value": text, "order": 0},
            "Back Extra": {"value": "", "order": 1}
        },
        "cards": []
    })
}
