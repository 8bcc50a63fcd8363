#![allow(clippy::float_cmp)]

use studio::engine::PlacementEngine;
use studio::geom::{Point, Size};

use super::*;
use crate::error::ErrorCode;
use crate::state::test_helpers::test_app_state;

fn input(name: &str) -> NewSavedDesign {
    NewSavedDesign { name: name.to_owned(), design_url: format!("{name}.png"), ..Default::default() }
}

#[tokio::test]
async fn create_starts_at_version_one_with_timestamps() {
    let state = test_app_state();
    let d = create_saved_design(&state, input("first")).await;
    assert_eq!(d.id, 1);
    assert_eq!(d.version, 1);
    assert!(d.created_at > 0);
    assert_eq!(d.created_at, d.saved_at);
    assert!(d.updated_at.is_none());
}

#[tokio::test]
async fn update_bumps_version_and_stamps() {
    let state = test_app_state();
    let d = create_saved_design(&state, input("first")).await;
    let u1 = update_saved_design(&state, d.id, SavedDesignUpdate { name: Some("renamed".into()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(u1.version, 2);
    assert_eq!(u1.name, "renamed");
    assert!(u1.updated_at.is_some());
    let u2 = update_saved_design(&state, d.id, SavedDesignUpdate::default()).await.unwrap();
    assert_eq!(u2.version, 3);
    assert_eq!(u2.created_at, d.created_at);
}

#[tokio::test]
async fn get_missing_is_none_but_zero_is_invalid() {
    let state = test_app_state();
    assert!(get_saved_design(&state, 9).await.unwrap().is_none());
    let err = get_saved_design(&state, 0).await.unwrap_err();
    assert!(matches!(err, SavedDesignError::Store(StoreError::InvalidId(0))));
    assert_eq!(err.error_code(), "E_INVALID_ID");
}

#[tokio::test]
async fn update_and_delete_unknown_fail() {
    let state = test_app_state();
    assert!(update_saved_design(&state, 3, SavedDesignUpdate::default()).await.is_err());
    assert!(matches!(
        delete_saved_design(&state, 3).await,
        Err(SavedDesignError::Store(StoreError::NotFound { kind: "saved design", id: 3 }))
    ));
    assert!(delete_saved_design(&state, 0).await.is_err());
}

#[tokio::test]
async fn delete_removes_from_list() {
    let state = test_app_state();
    create_saved_design(&state, input("a")).await;
    create_saved_design(&state, input("b")).await;
    delete_saved_design(&state, 1).await.unwrap();
    let names: Vec<String> = list_saved_designs(&state).await.into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["b"]);
}

#[tokio::test]
async fn save_studio_design_requires_a_design() {
    let state = test_app_state();
    let err = save_studio_design(&state, None, "empty", None).await.unwrap_err();
    assert!(matches!(err, SavedDesignError::NoDesign));
    assert_eq!(err.error_code(), "E_NO_DESIGN");
    assert!(list_saved_designs(&state).await.is_empty());
}

#[tokio::test]
async fn saved_placement_reopens_in_studio() {
    let state = test_app_state();
    let mut engine = PlacementEngine::new();
    engine.load_design(DesignDescriptor::upload("cat.png"));
    engine.set_size(200.0);
    engine.set_rotation(30.0);
    engine.set_position(Point::new(20.0, 40.0));

    let saved = save_studio_design(&state, engine.design(), "cat", Some(1)).await.unwrap();
    assert_eq!(saved.design_url, "cat.png");
    assert_eq!(saved.product_id, Some(1));

    let mut reopened = PlacementEngine::new();
    let placement = reopened.load_design(saved.descriptor());
    assert_eq!(placement.position, Point::new(20.0, 40.0));
    assert_eq!(placement.size, Size::square(200.0));
    assert_eq!(placement.rotation, 30.0);
}

#[test]
fn descriptor_without_placement_uses_defaults() {
    let d = SavedDesign {
        id: 1,
        name: "x".into(),
        design_url: "x.png".into(),
        thumbnail_url: String::new(),
        product_id: None,
        placement: None,
        created_at: 0,
        saved_at: 0,
        updated_at: None,
        version: 1,
    };
    let desc = d.descriptor();
    assert!(desc.initial_position.is_none());
    assert_eq!(desc.initial_size, 150.0);
}
