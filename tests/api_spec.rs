use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use notes_keeper::api::create_router;
use notes_keeper::client::paginate;
use notes_keeper::db::{Database, Document, DocumentStore, Fields, StoreError};
use notes_keeper::models::*;
use notes_keeper::store::NoteStore;
use serde_json::json;

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let app = create_router(NoteStore::new(db));
    TestServer::new(app).expect("Failed to create test server")
}

/// A store whose backend is down.
struct UnavailableStore;

impl DocumentStore for UnavailableStore {
    fn insert(&self, _: &str, _: Fields) -> Result<String, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn get_all(&self, _: &str) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn update(&self, _: &str, _: &str, _: Fields) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn delete(&self, _: &str, _: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

fn setup_outage() -> TestServer {
    TestServer::new(create_router(NoteStore::new(UnavailableStore)))
        .expect("Failed to create test server")
}

fn note_input(title: &str, tagline: &str, body: &str) -> NoteInput {
    NoteInput {
        title: title.to_string(),
        tagline: tagline.to_string(),
        body: body.to_string(),
    }
}

async fn create_test_note(server: &TestServer, title: &str) -> Note {
    server
        .post("/notes")
        .json(&note_input(title, "tagline", "body"))
        .await
        .assert_status(StatusCode::CREATED);

    list_notes(server)
        .await
        .into_iter()
        .find(|n| n.title == title)
        .expect("Created note not listed")
}

async fn list_notes(server: &TestServer) -> Vec<Note> {
    let response = server.get("/notes").await;
    response.assert_status_ok();
    response.json::<Vec<Note>>()
}

mod create_note {
    use super::*;

    #[tokio::test]
    async fn returns_created_with_message() {
        let server = setup();

        let response = server
            .post("/notes")
            .json(&note_input("A", "B", "C"))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Note created successfully");
    }

    #[tokio::test]
    async fn created_note_is_listed_with_generated_id() {
        let server = setup();

        server
            .post("/notes")
            .json(&note_input("A", "B", "C"))
            .await
            .assert_status(StatusCode::CREATED);

        let notes = list_notes(&server).await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "A");
        assert_eq!(notes[0].tagline, "B");
        assert_eq!(notes[0].body, "C");
        assert!(!notes[0].id.is_empty());
        assert_eq!(notes[0].pinned, None);
    }

    #[tokio::test]
    async fn rejects_body_with_missing_fields() {
        let server = setup();

        let response = server.post("/notes").json(&json!({ "title": "A" })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.error.is_empty());
        assert!(list_notes(&server).await.is_empty());
    }

    #[tokio::test]
    async fn accepts_form_encoded_body() {
        let server = setup();

        let response = server
            .post("/notes")
            .form(&note_input("Form", "Tag", "Text"))
            .await;

        response.assert_status(StatusCode::CREATED);
        let notes = list_notes(&server).await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Form");
        assert_eq!(notes[0].tagline, "Tag");
        assert_eq!(notes[0].body, "Text");
    }

    #[tokio::test]
    async fn rejects_form_with_missing_fields() {
        let server = setup();

        let response = server
            .post("/notes")
            .form(&[("title", "A")])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(list_notes(&server).await.is_empty());
    }
}

mod list_notes {
    use super::*;

    #[tokio::test]
    async fn returns_empty_array_when_no_notes_exist() {
        let server = setup();
        assert!(list_notes(&server).await.is_empty());
    }

    #[tokio::test]
    async fn omits_pinned_until_it_is_set() {
        let server = setup();
        create_test_note(&server, "A").await;

        let response = server.get("/notes").await;
        let raw: serde_json::Value = response.json();
        assert!(raw[0].get("pinned").is_none());
        assert!(raw[0].get("id").is_some());
    }

    #[tokio::test]
    async fn allows_any_origin() {
        let server = setup();

        let response = server
            .get("/notes")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://example.com"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .expect("Missing CORS header"),
            "*"
        );
    }
}

mod update_note {
    use super::*;

    #[tokio::test]
    async fn replaces_text_fields() {
        let server = setup();
        let note = create_test_note(&server, "Old").await;

        let response = server
            .put(&format!("/notes/{}", note.id))
            .json(&note_input("New", "Tag", "Text"))
            .await;

        response.assert_status_ok();
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Note updated successfully");

        let notes = list_notes(&server).await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, note.id);
        assert_eq!(notes[0].title, "New");
        assert_eq!(notes[0].tagline, "Tag");
        assert_eq!(notes[0].body, "Text");
    }

    #[tokio::test]
    async fn accepts_form_encoded_body() {
        let server = setup();
        let note = create_test_note(&server, "Old").await;

        server
            .put(&format!("/notes/{}", note.id))
            .form(&note_input("New", "Tag", "Text"))
            .await
            .assert_status_ok();

        let notes = list_notes(&server).await;
        assert_eq!(notes[0].title, "New");
    }

    #[tokio::test]
    async fn returns_bad_request_for_blank_id() {
        let server = setup();

        let response = server
            .put("/notes/%20")
            .json(&note_input("New", "Tag", "Text"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "ID is missing in the request");
    }

    #[tokio::test]
    async fn returns_not_found_for_unknown_id() {
        let server = setup();

        let response = server
            .put("/notes/does-not-exist")
            .json(&note_input("New", "Tag", "Text"))
            .await;

        response.assert_status_not_found();
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Note not found");
        assert!(list_notes(&server).await.is_empty());
    }
}

mod delete_note {
    use super::*;

    #[tokio::test]
    async fn removes_note() {
        let server = setup();
        let note = create_test_note(&server, "Doomed").await;
        let kept = create_test_note(&server, "Kept").await;

        server
            .delete(&format!("/notes/{}", note.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let notes = list_notes(&server).await;
        assert!(notes.iter().all(|n| n.id != note.id));
        assert!(notes.iter().any(|n| n.id == kept.id));
    }

    #[tokio::test]
    async fn deleting_twice_is_not_an_error() {
        let server = setup();
        let note = create_test_note(&server, "Doomed").await;

        for _ in 0..2 {
            server
                .delete(&format!("/notes/{}", note.id))
                .await
                .assert_status(StatusCode::NO_CONTENT);
        }
    }
}

mod pin_note {
    use super::*;

    #[tokio::test]
    async fn pinned_note_moves_to_pinned_partition() {
        let server = setup();
        let note = create_test_note(&server, "Important").await;
        create_test_note(&server, "Other").await;

        let response = server
            .put(&format!("/notes/{}/pin", note.id))
            .json(&PinInput { pinned: true })
            .await;

        response.assert_status_ok();
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Note pinned/unpinned successfully");

        let notes = list_notes(&server).await;
        let pinned = notes.iter().find(|n| n.id == note.id).expect("Note missing");
        assert_eq!(pinned.pinned, Some(true));
        assert_eq!(pinned.title, "Important");

        let view = paginate(&notes, 1, 6);
        assert_eq!(view.pinned.len(), 1);
        assert_eq!(view.pinned[0].id, note.id);
        assert_eq!(view.current.len(), 1);
        assert_eq!(view.current[0].title, "Other");
    }

    #[tokio::test]
    async fn unpin_clears_flag() {
        let server = setup();
        let note = create_test_note(&server, "A").await;

        for pinned in [true, false] {
            server
                .put(&format!("/notes/{}/pin", note.id))
                .json(&PinInput { pinned })
                .await
                .assert_status_ok();
        }

        let notes = list_notes(&server).await;
        assert_eq!(notes[0].pinned, Some(false));
        assert!(!notes[0].is_pinned());
    }

    #[tokio::test]
    async fn accepts_form_encoded_flag() {
        let server = setup();
        let note = create_test_note(&server, "A").await;

        server
            .put(&format!("/notes/{}/pin", note.id))
            .form(&[("pinned", "true")])
            .await
            .assert_status_ok();

        assert_eq!(list_notes(&server).await[0].pinned, Some(true));
    }

    #[tokio::test]
    async fn returns_not_found_for_unknown_id() {
        let server = setup();

        server
            .put("/notes/does-not-exist/pin")
            .json(&PinInput { pinned: true })
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn rejects_missing_flag() {
        let server = setup();
        let note = create_test_note(&server, "A").await;

        server
            .put(&format!("/notes/{}/pin", note.id))
            .json(&json!({}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

mod store_outage {
    use super::*;

    fn assert_internal_error(response: axum_test::TestResponse) {
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Internal server error");
    }

    #[tokio::test]
    async fn every_endpoint_returns_internal_error() {
        let server = setup_outage();

        assert_internal_error(server.post("/notes").json(&note_input("A", "B", "C")).await);
        assert_internal_error(server.get("/notes").await);
        assert_internal_error(
            server
                .put("/notes/abc")
                .json(&note_input("A", "B", "C"))
                .await,
        );
        assert_internal_error(server.delete("/notes/abc").await);
        assert_internal_error(
            server
                .put("/notes/abc/pin")
                .json(&PinInput { pinned: true })
                .await,
        );
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();
        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }
}
