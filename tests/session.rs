use caption_curator::session::SessionStore;
use serde_json::json;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> SessionStore {
    SessionStore::new(dir.path().join("session.json"))
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let raw = json!({
        "decision": "approved",
        "confidence": 0.9,
        "platform": "instagram",
        "captions": ["Caption"],
        "hashtags": [["#tag"]],
    });
    store
        .save(&raw, "my post", "data:image/png;base64,AAAA")
        .await
        .unwrap();

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded["decision"], "approved");
    assert_eq!(loaded["originalText"], "my post");
    assert_eq!(loaded["originalImage"], "data:image/png;base64,AAAA");
}

#[tokio::test]
async fn load_without_session_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn clear_removes_the_session() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let raw = json!({ "decision": "approved", "confidence": 0.9, "captions": [] });
    store.save(&raw, "text", "").await.unwrap();
    assert!(store.load().await.unwrap().is_some());

    store.clear().await.unwrap();
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn clear_without_session_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.clear().await.unwrap();
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn clear_drops_legacy_input_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let scope = json!({
        "analysisResults": { "decision": "approved" },
        "inputData": { "text": "stale" },
    });
    std::fs::write(&path, serde_json::to_string(&scope).unwrap()).unwrap();

    let store = SessionStore::new(path.clone());
    store.clear().await.unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(value.get("analysisResults").is_none());
    assert!(value.get("inputData").is_none());
}

#[tokio::test]
async fn save_rejects_non_object_payloads() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let err = store.save(&json!("not an object"), "", "").await.unwrap_err();
    assert!(err.contains("not a JSON object"));
}
