//! Integration tests for the write path: path computation on create,
//! cascading rewrites on reparent, and both deletion policies. All tests
//! run against the in-memory reference backend with the `.` separator, so
//! paths read like the geography examples they model.

use std::sync::Arc;

use pathtree_core::db::{DocumentStore, MemoryStore};
use pathtree_core::models::{Node, NodeUpdate};
use pathtree_core::services::{DeleteBehavior, TreeConfig, TreeError, TreeService};
use serde_json::json;

fn create_test_services(config: TreeConfig) -> (TreeService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(config.separator.clone()));
    let service = TreeService::new(store.clone(), config).unwrap();
    (service, store)
}

fn dotted() -> (TreeService, Arc<MemoryStore>) {
    create_test_services(TreeConfig::new().with_separator("."))
}

async fn create(service: &TreeService, id: &str, content: &str, parent: Option<&str>) -> Node {
    service
        .create_node(Node::new_with_id(
            id.to_string(),
            content.to_string(),
            parent.map(String::from),
            json!({}),
        ))
        .await
        .unwrap()
}

/// Seed {europe -> {sweden -> {stockholm}}} and return the service pair.
async fn geography() -> (TreeService, Arc<MemoryStore>) {
    let (service, store) = dotted();
    create(&service, "eu", "Europe", None).await;
    create(&service, "se", "Sweden", Some("eu")).await;
    create(&service, "sthlm", "Stockholm", Some("se")).await;
    (service, store)
}

#[tokio::test]
async fn create_composes_paths_level_by_level() {
    let (service, _store) = geography().await;

    let eu = service.get_node("eu").await.unwrap().unwrap();
    let se = service.get_node("se").await.unwrap().unwrap();
    let sthlm = service.get_node("sthlm").await.unwrap().unwrap();

    assert_eq!(eu.path, "eu");
    assert_eq!(se.path, "eu.se");
    assert_eq!(sthlm.path, "eu.se.sthlm");

    let codec = service.codec();
    assert_eq!(codec.level(&eu.path), 1);
    assert_eq!(codec.level(&se.path), 2);
    assert_eq!(codec.level(&sthlm.path), 3);
}

#[tokio::test]
async fn save_without_parent_change_touches_no_path() {
    let (service, store) = geography().await;

    // Remove the parent record behind the service's back: a content-only
    // update must succeed anyway, proving no parent lookup happens.
    store.delete_node("eu").await.unwrap();

    let updated = service
        .update_node("se", NodeUpdate::new().with_content("Sverige".to_string()))
        .await
        .unwrap();
    assert_eq!(updated.content, "Sverige");
    assert_eq!(updated.path, "eu.se");

    // Re-asserting the same parent value is equally a no-op.
    let updated = service
        .update_node(
            "se",
            NodeUpdate::new().with_parent(Some("eu".to_string())),
        )
        .await
        .unwrap();
    assert_eq!(updated.path, "eu.se");
}

#[tokio::test]
async fn reparent_rewrites_whole_subtree() {
    let (service, _store) = geography().await;
    create(&service, "af", "Africa", None).await;

    let moved = service.move_node("se", Some("af")).await.unwrap();
    assert_eq!(moved.parent_id.as_deref(), Some("af"));
    assert_eq!(moved.path, "af.se");

    let sthlm = service.get_node("sthlm").await.unwrap().unwrap();
    assert_eq!(sthlm.path, "af.se.sthlm");
    // the cascade rewrites paths, never parent references
    assert_eq!(sthlm.parent_id.as_deref(), Some("se"));
    assert_eq!(service.codec().level(&sthlm.path), 3);
}

#[tokio::test]
async fn reparent_to_root_promotes_subtree() {
    let (service, _store) = geography().await;

    let moved = service.move_node("se", None).await.unwrap();
    assert!(moved.parent_id.is_none());
    assert_eq!(moved.path, "se");

    let sthlm = service.get_node("sthlm").await.unwrap().unwrap();
    assert_eq!(sthlm.path, "se.sthlm");
}

#[tokio::test]
async fn reparent_to_missing_parent_aborts_write() {
    let (service, _store) = geography().await;

    let err = service.move_node("se", Some("ghost")).await.unwrap_err();
    assert!(matches!(err, TreeError::ParentNotFound { .. }));

    // nothing moved
    let se = service.get_node("se").await.unwrap().unwrap();
    assert_eq!(se.path, "eu.se");
    assert_eq!(se.parent_id.as_deref(), Some("eu"));
    let sthlm = service.get_node("sthlm").await.unwrap().unwrap();
    assert_eq!(sthlm.path, "eu.se.sthlm");
}

#[tokio::test]
async fn reparent_under_own_descendant_is_rejected() {
    let (service, _store) = geography().await;

    let err = service.move_node("eu", Some("sthlm")).await.unwrap_err();
    assert!(matches!(err, TreeError::CycleDetected { .. }));
    let err = service.move_node("eu", Some("eu")).await.unwrap_err();
    assert!(matches!(err, TreeError::CycleDetected { .. }));

    // rejected before any mutation
    let eu = service.get_node("eu").await.unwrap().unwrap();
    assert_eq!(eu.path, "eu");
    let sthlm = service.get_node("sthlm").await.unwrap().unwrap();
    assert_eq!(sthlm.path, "eu.se.sthlm");
}

#[tokio::test]
async fn delete_mode_removes_anchored_subtree_only() {
    let (service, store) =
        create_test_services(TreeConfig::new().with_separator(".").with_on_delete(DeleteBehavior::Delete));
    create(&service, "eu", "Europe", None).await;
    create(&service, "se", "Sweden", Some("eu")).await;
    create(&service, "sthlm", "Stockholm", Some("se")).await;
    create(&service, "no", "Norway", Some("eu")).await;
    // shares the "se" string prefix without the separator boundary
    create(&service, "sev", "Sevilla", Some("eu")).await;

    let result = service.delete_node("se").await.unwrap();
    assert!(result.existed);
    assert_eq!(result.removed, 2);

    assert!(service.get_node("se").await.unwrap().is_none());
    assert!(service.get_node("sthlm").await.unwrap().is_none());
    assert!(service.get_node("eu").await.unwrap().is_some());
    assert!(service.get_node("no").await.unwrap().is_some());
    assert!(service.get_node("sev").await.unwrap().is_some());
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn reparent_mode_promotes_children_to_grandparent() {
    let (service, _store) = geography().await;
    create(&service, "globe", "Globe Arena", Some("sthlm")).await;

    let result = service.delete_node("se").await.unwrap();
    assert!(result.existed);
    assert_eq!(result.removed, 1);
    assert!(service.get_node("se").await.unwrap().is_none());

    // stockholm is now a child of europe, its subtree rewritten with it
    let sthlm = service.get_node("sthlm").await.unwrap().unwrap();
    assert_eq!(sthlm.parent_id.as_deref(), Some("eu"));
    assert_eq!(sthlm.path, "eu.sthlm");
    let globe = service.get_node("globe").await.unwrap().unwrap();
    assert_eq!(globe.parent_id.as_deref(), Some("sthlm"));
    assert_eq!(globe.path, "eu.sthlm.globe");
}

#[tokio::test]
async fn reparent_mode_deleting_root_makes_children_roots() {
    let (service, _store) = geography().await;

    let result = service.delete_node("eu").await.unwrap();
    assert!(result.existed);

    let se = service.get_node("se").await.unwrap().unwrap();
    assert!(se.parent_id.is_none());
    assert_eq!(se.path, "se");
    let sthlm = service.get_node("sthlm").await.unwrap().unwrap();
    assert_eq!(sthlm.path, "se.sthlm");
}

#[tokio::test]
async fn delete_missing_node_is_idempotent() {
    let (service, _store) = dotted();
    let result = service.delete_node("nope").await.unwrap();
    assert!(!result.existed);
    assert_eq!(result.removed, 0);
}

#[tokio::test]
async fn cleared_path_opts_out_of_delete_side_effects() {
    let (service, store) = geography().await;

    // clear sweden's path behind the service's back
    store
        .update_node("se", NodeUpdate::new().with_path(String::new()))
        .await
        .unwrap();

    let result = service.delete_node("se").await.unwrap();
    assert!(result.existed);
    assert_eq!(result.removed, 1);

    // stockholm was neither reparented nor rewritten
    let sthlm = service.get_node("sthlm").await.unwrap().unwrap();
    assert_eq!(sthlm.parent_id.as_deref(), Some("se"));
    assert_eq!(sthlm.path, "eu.se.sthlm");
}

#[tokio::test]
async fn repeating_a_move_is_a_noop() {
    let (service, _store) = geography().await;
    create(&service, "af", "Africa", None).await;

    service.move_node("se", Some("af")).await.unwrap();
    let first = service.get_node("sthlm").await.unwrap().unwrap();

    // same reparent again: parent already matches, nothing recomputes
    service.move_node("se", Some("af")).await.unwrap();
    let second = service.get_node("sthlm").await.unwrap().unwrap();
    assert_eq!(first.path, second.path);
    assert_eq!(first.modified_at, second.modified_at);
}

#[tokio::test]
async fn duplicate_id_insert_surfaces_store_error() {
    let (service, _store) = dotted();
    create(&service, "eu", "Europe", None).await;
    let err = service
        .create_node(Node::new_with_id(
            "eu".to_string(),
            "Europa".to_string(),
            None,
            json!({}),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, TreeError::QueryFailed(_)));
}

#[tokio::test]
async fn wide_reparent_cascades_every_descendant() {
    // more descendants than cascade workers, so the pool has to recycle
    let (service, _store) = create_test_services(
        TreeConfig::new().with_separator(".").with_num_workers(3),
    );
    create(&service, "src", "Source", None).await;
    create(&service, "dst", "Destination", None).await;
    for i in 0..20 {
        create(&service, &format!("c{}", i), "child", Some("src")).await;
    }

    service.move_node("src", Some("dst")).await.unwrap();
    for i in 0..20 {
        let child = service.get_node(&format!("c{}", i)).await.unwrap().unwrap();
        assert_eq!(child.path, format!("dst.src.c{}", i));
    }
}
