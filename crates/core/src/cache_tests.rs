// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::Utc;

fn response(body: &str) -> CachedResponse {
    CachedResponse {
        status: 200,
        headers: vec![("content-type".into(), "text/html".into())],
        body: body.as_bytes().to_vec(),
        stored_at: Utc::now(),
    }
}

#[test]
fn lookup_missing_entry() {
    let cache = CacheStorage::open_in_memory().unwrap();
    cache.open_generation("app-shell-v1").unwrap();
    let hit = cache
        .lookup("app-shell-v1", &RequestKey::get("/index.html"))
        .unwrap();
    assert!(hit.is_none());
}

#[test]
fn put_then_lookup() {
    let cache = CacheStorage::open_in_memory().unwrap();
    let key = RequestKey::get("/index.html");
    let stored = response("<html>cached</html>");

    cache.put("app-shell-v1", &key, &stored).unwrap();
    let hit = cache.lookup("app-shell-v1", &key).unwrap().unwrap();

    assert_eq!(hit.status, 200);
    assert_eq!(hit.body, stored.body);
    assert_eq!(hit.headers, stored.headers);
}

#[test]
fn put_creates_generation_lazily() {
    let cache = CacheStorage::open_in_memory().unwrap();
    assert!(cache.generation_names().unwrap().is_empty());

    cache
        .put("dynamic-v1", &RequestKey::get("/api/tasks"), &response("[]"))
        .unwrap();
    assert_eq!(cache.generation_names().unwrap(), vec!["dynamic-v1".to_string()]);
    assert_eq!(cache.entry_count("dynamic-v1").unwrap(), 1);
}

#[test]
fn put_replaces_existing_entry() {
    let cache = CacheStorage::open_in_memory().unwrap();
    let key = RequestKey::get("/api/tasks");
    cache.put("dynamic-v1", &key, &response("old")).unwrap();
    cache.put("dynamic-v1", &key, &response("new")).unwrap();

    let hit = cache.lookup("dynamic-v1", &key).unwrap().unwrap();
    assert_eq!(hit.body, b"new".to_vec());
    assert_eq!(cache.entry_count("dynamic-v1").unwrap(), 1);
}

#[test]
fn generations_are_isolated() {
    let cache = CacheStorage::open_in_memory().unwrap();
    let key = RequestKey::get("/index.html");
    cache.put("app-shell-v1", &key, &response("v1")).unwrap();

    assert!(cache.lookup("app-shell-v2", &key).unwrap().is_none());
}

#[test]
fn keys_include_method() {
    let cache = CacheStorage::open_in_memory().unwrap();
    cache
        .put("dynamic-v1", &RequestKey::get("/x"), &response("get"))
        .unwrap();
    let other = RequestKey::new(Method::Post, "/x");
    assert!(cache.lookup("dynamic-v1", &other).unwrap().is_none());
}

#[test]
fn delete_generation_drops_entries() {
    let cache = CacheStorage::open_in_memory().unwrap();
    let key = RequestKey::get("/index.html");
    cache.put("app-shell-v0", &key, &response("old")).unwrap();
    cache.put("app-shell-v1", &key, &response("new")).unwrap();

    assert!(cache.delete_generation("app-shell-v0").unwrap());
    assert!(!cache.delete_generation("app-shell-v0").unwrap());
    assert_eq!(cache.generation_names().unwrap(), vec!["app-shell-v1"]);
    assert_eq!(cache.entry_count("app-shell-v0").unwrap(), 0);
    assert!(cache.lookup("app-shell-v1", &key).unwrap().is_some());
}

#[test]
fn generation_names_sorted() {
    let cache = CacheStorage::open_in_memory().unwrap();
    for name in ["dynamic-v2", "app-shell-v2", "app-shell-v1"] {
        cache.open_generation(name).unwrap();
    }
    // Opening twice is harmless.
    cache.open_generation("app-shell-v1").unwrap();

    assert_eq!(
        cache.generation_names().unwrap(),
        vec!["app-shell-v1", "app-shell-v2", "dynamic-v2"]
    );
}

#[test]
fn empty_generation_name_rejected() {
    let cache = CacheStorage::open_in_memory().unwrap();
    let err = cache.open_generation("  ").unwrap_err();
    assert!(matches!(err, Error::InvalidGeneration(_)));
}

#[test]
fn entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.db");
    let key = RequestKey::get("/manifest.json");

    {
        let cache = CacheStorage::open(&path).unwrap();
        cache.put("app-shell-v1", &key, &response("{}")).unwrap();
    }

    let cache = CacheStorage::open(&path).unwrap();
    assert!(cache.lookup("app-shell-v1", &key).unwrap().is_some());
}
