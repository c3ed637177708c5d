use super::*;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Draft {
    title: String,
}

#[test]
fn memory_storage_set_get_remove() {
    let store = MemoryStorage::new();
    assert_eq!(store.get("k"), None);
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").as_deref(), Some("v"));
    store.remove("k");
    assert_eq!(store.get("k"), None);
}

#[test]
fn memory_storage_remove_missing_is_noop() {
    let store = MemoryStorage::new();
    store.remove("absent");
    assert_eq!(store.get("absent"), None);
}

#[test]
fn json_helpers_preserve_value() {
    let store = MemoryStorage::new();
    let draft = Draft { title: "notes".to_owned() };
    save_json(&store, "draft", &draft).unwrap();
    assert_eq!(load_json::<Draft>(&store, "draft"), Some(draft));
}

#[test]
fn load_json_discards_corrupt_value() {
    let store = MemoryStorage::new();
    store.set("draft", "{not json").unwrap();
    assert_eq!(load_json::<Draft>(&store, "draft"), None);
}

#[test]
fn load_json_reads_null_marker_as_inner_none() {
    let store = MemoryStorage::new();
    store.set("draft", "null").unwrap();
    assert_eq!(load_json::<Option<Draft>>(&store, "draft"), Some(None));
}
