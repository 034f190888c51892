//! Integration tests for the full chat flow: file storage, HTTP backend and
//! session lifecycle together.

use aura::backend::HttpBackend;
use aura::config::BackendConfig;
use aura::core::{APOLOGY, GREETING, Message, Sender, SessionManager};
use aura::storage::{FileBackend, SessionStore};
use mockito::Matcher;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn open(temp: &TempDir) -> SessionManager<FileBackend> {
    let store = FileBackend::new(temp.path().to_path_buf()).unwrap();
    SessionManager::load(store).unwrap()
}

fn backend(url: String) -> HttpBackend {
    HttpBackend::new(&BackendConfig {
        url,
        timeout_seconds: 5,
    })
    .unwrap()
}

#[test]
fn greeting_hi_hello_scenario() {
    let temp = TempDir::new().unwrap();
    let mut manager = open(&temp);
    let session_id = manager.sessions()[0].id.clone();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({
            "message": "Hi",
            "session_id": session_id
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response": "Hello"}"#)
        .create();

    manager
        .send("Hi", &backend(format!("{}/chat", server.url())))
        .unwrap();
    mock.assert();

    let messages = &manager.sessions()[0].messages;
    assert_eq!(messages.len(), 3);
    assert_eq!(
        (messages[0].sender, messages[0].text.as_str()),
        (Sender::Bot, GREETING)
    );
    assert_eq!(
        (messages[1].sender, messages[1].text.as_str()),
        (Sender::User, "Hi")
    );
    assert_eq!(
        (messages[2].sender, messages[2].text.as_str()),
        (Sender::Bot, "Hello")
    );
    assert!(!manager.is_waiting());
}

#[test]
fn network_error_scenario() {
    let temp = TempDir::new().unwrap();
    let mut manager = open(&temp);

    // Nothing listens on port 1
    manager
        .send("Hi", &backend("http://127.0.0.1:1/chat".to_string()))
        .unwrap();

    let third = &manager.sessions()[0].messages[2];
    assert!(third.is_error);
    assert_eq!(third.text, APOLOGY);
    assert_eq!(third.sender, Sender::Bot);
}

#[test]
fn error_status_scenario() {
    let temp = TempDir::new().unwrap();
    let mut manager = open(&temp);

    let mut server = mockito::Server::new();
    let _mock = server.mock("POST", "/chat").with_status(500).create();

    let reply = manager
        .send("Hi", &backend(format!("{}/chat", server.url())))
        .unwrap()
        .unwrap();

    assert_eq!(reply, Message::apology());
}

#[test]
fn collection_survives_restart() {
    let temp = TempDir::new().unwrap();

    let before = {
        let mut manager = open(&temp);
        manager.create_session().unwrap();
        manager.rename_session(0, "Sleep").unwrap();
        manager.append_user_message("I can't sleep").unwrap();
        manager.receive_bot_error().unwrap();
        manager.select_session(1).unwrap();
        manager.append_user_message("Hi").unwrap();
        manager
            .receive_bot_response(serde_json::from_value(json!({
                "response": "Hello",
                "context_sources": ["sleep-hygiene.pdf"]
            }))
            .unwrap())
            .unwrap();
        manager.sessions().to_vec()
    };

    let after = open(&temp);
    assert_eq!(after.sessions(), before.as_slice());
    assert_eq!(after.active_index(), 0);
    assert_eq!(after.sessions()[0].name, "Sleep");
    assert!(after.sessions()[0].messages[2].is_error);
    assert_eq!(
        after.sessions()[1].messages[2].source_labels(),
        vec!["sleep-hygiene.pdf"]
    );
}

fn quarantined(temp: &TempDir) -> Vec<Vec<u8>> {
    fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "corrupt"))
        .map(|p| fs::read(p).unwrap())
        .collect()
}

#[test]
fn malformed_storage_falls_back_and_is_kept_aside() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("chat_sessions.json");
    fs::write(&path, "[{ not json").unwrap();

    let manager = open(&temp);

    assert_eq!(manager.sessions().len(), 1);
    assert_eq!(manager.sessions()[0].name, "New Chat");
    assert_eq!(quarantined(&temp), vec![b"[{ not json".to_vec()]);
    // The fresh default session replaced the bad snapshot
    let store = FileBackend::new(temp.path().to_path_buf()).unwrap();
    assert_eq!(store.load().unwrap().unwrap(), manager.sessions());
}

#[test]
fn non_utf8_storage_falls_back_to_default() {
    let temp = TempDir::new().unwrap();
    let bytes = [0xff, 0xfe, 0x00, 0x9f];
    fs::write(temp.path().join("chat_sessions.json"), bytes).unwrap();

    let manager = open(&temp);

    assert_eq!(manager.sessions().len(), 1);
    assert_eq!(manager.sessions()[0].name, "New Chat");
    assert_eq!(quarantined(&temp), vec![bytes.to_vec()]);
}

#[test]
fn repeated_corruption_keeps_every_copy() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("chat_sessions.json");

    fs::write(&path, "first").unwrap();
    open(&temp);
    fs::write(&path, "second").unwrap();
    open(&temp);

    let mut copies = quarantined(&temp);
    copies.sort();
    assert_eq!(copies, vec![b"first".to_vec(), b"second".to_vec()]);
}

#[test]
fn stored_snapshot_uses_browser_field_names() {
    let temp = TempDir::new().unwrap();
    let mut manager = open(&temp);
    manager.append_user_message("Hi").unwrap();
    manager.receive_bot_error().unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("chat_sessions.json")).unwrap())
            .unwrap();

    let messages = &raw[0]["messages"];
    assert_eq!(messages[1], json!({"text": "Hi", "sender": "user"}));
    assert_eq!(messages[2]["isError"], json!(true));
    assert!(raw[0]["id"].as_str().unwrap().starts_with("session_"));
    assert_eq!(raw[0]["name"], json!("New Chat"));
}

#[test]
fn deleting_everything_always_leaves_one_session() {
    let temp = TempDir::new().unwrap();
    let mut manager = open(&temp);
    manager.create_session().unwrap();
    manager.create_session().unwrap();

    for _ in 0..3 {
        manager.delete_session(0).unwrap();
    }

    assert_eq!(manager.sessions().len(), 1);
    assert_eq!(manager.active_index(), 0);
    assert_eq!(open(&temp).sessions(), manager.sessions());
}
