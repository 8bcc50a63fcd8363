#![allow(clippy::float_cmp)]

use super::*;
use crate::error::ErrorCode;
use crate::state::test_helpers::{custom_priced_product, product, seed_product, test_app_state};

async fn seeded_catalog() -> AppState {
    let state = test_app_state();
    let mut tee = product("T-Shirt Classic", "apparel", 20.0);
    tee.colors = vec!["#FFFFFF".into(), "#FF0000".into()];
    tee.sizes = vec!["S".into(), "M".into()];
    let mut hoodie = product("Hoodie Zip", "apparel", 40.0);
    hoodie.colors = vec!["#000000".into()];
    hoodie.sizes = vec!["L".into(), "XL".into()];
    let mut mug = product("Mug Ceramic", "home", 12.0);
    mug.colors = vec!["#FFFFFF".into()];
    mug.sizes = Vec::new();
    let tee2 = product("T-Shirt Vintage", "apparel", 22.0);
    for p in [tee, hoodie, mug, tee2] {
        seed_product(&state, p).await;
    }
    state
}

// =============================================================
// CRUD
// =============================================================

#[tokio::test]
async fn create_assigns_ids_in_sequence() {
    let state = test_app_state();
    let a = create_product(&state, product("Tote Bag", "bags", 15.0)).await.unwrap();
    let b = create_product(&state, product("Cap", "hats", 18.0)).await.unwrap();
    assert_eq!((a.id, b.id), (1, 2));
    assert_eq!(list_products(&state).await.len(), 2);
}

#[tokio::test]
async fn create_rejects_negative_price() {
    let state = test_app_state();
    let err = create_product(&state, product("Bad", "x", -1.0)).await.unwrap_err();
    assert!(matches!(err, ProductError::InvalidPrice(_)));
    assert_eq!(err.error_code(), "E_INVALID_PRICE");
    assert!(list_products(&state).await.is_empty());
}

#[tokio::test]
async fn create_rejects_malformed_schedule() {
    let state = test_app_state();
    let mut p = product("Broken", "x", 10.0);
    p.pricing = PricingSchedule::Custom(vec![PricingTier { min: 1, max: Some(9), discount: 0.0, price: 10.0 }]);
    let err = create_product(&state, p).await.unwrap_err();
    assert!(matches!(err, ProductError::Schedule(ScheduleError::BoundedEnd)));
    assert_eq!(err.error_code(), "E_PRICING_SCHEDULE");
}

#[tokio::test]
async fn get_unknown_product_is_not_found() {
    let state = test_app_state();
    let err = get_product(&state, 77).await.unwrap_err();
    assert!(matches!(err, ProductError::Store(StoreError::NotFound { kind: "product", id: 77 })));
    assert_eq!(err.error_code(), "E_NOT_FOUND");
    assert_eq!(err.to_string(), "product not found: 77");
}

#[tokio::test]
async fn update_applies_only_present_fields() {
    let state = test_app_state();
    let id = seed_product(&state, product("Mug", "home", 12.0)).await;
    let updated = update_product(&state, id, ProductUpdate { base_price: Some(14.0), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(updated.base_price, 14.0);
    assert_eq!(updated.name, "Mug");
    assert_eq!(get_product(&state, id).await.unwrap().base_price, 14.0);
}

#[tokio::test]
async fn update_with_bad_schedule_leaves_product_unchanged() {
    let state = test_app_state();
    let id = seed_product(&state, product("Mug", "home", 12.0)).await;
    let update = ProductUpdate { pricing: Some(PricingSchedule::Custom(Vec::new())), ..Default::default() };
    assert!(update_product(&state, id, update).await.is_err());
    assert_eq!(get_product(&state, id).await.unwrap().pricing, PricingSchedule::Default);
}

#[tokio::test]
async fn delete_removes_product() {
    let state = test_app_state();
    let id = seed_product(&state, product("Mug", "home", 12.0)).await;
    assert_eq!(delete_product(&state, id).await.unwrap().id, id);
    assert!(get_product(&state, id).await.is_err());
    assert!(delete_product(&state, id).await.is_err());
}

// =============================================================
// Browsing
// =============================================================

#[tokio::test]
async fn filter_by_search_is_case_insensitive() {
    let state = seeded_catalog().await;
    let filter = ProductFilter { search: "t-SHIRT".into(), ..Default::default() };
    let names: Vec<String> = filter_products(&state, &filter).await.into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["T-Shirt Classic", "T-Shirt Vintage"]);
}

#[tokio::test]
async fn filter_by_category_all_matches_everything() {
    let state = seeded_catalog().await;
    let filter = ProductFilter { category: Some("all".into()), ..Default::default() };
    assert_eq!(filter_products(&state, &filter).await.len(), 4);
    let filter = ProductFilter { category: Some("home".into()), ..Default::default() };
    assert_eq!(filter_products(&state, &filter).await.len(), 1);
}

#[tokio::test]
async fn filter_facets_or_within_and_across() {
    let state = seeded_catalog().await;
    let filter = ProductFilter { colors: vec!["#FFFFFF".into(), "#000000".into()], ..Default::default() };
    assert_eq!(filter_products(&state, &filter).await.len(), 4);

    let filter = ProductFilter {
        colors: vec!["#FFFFFF".into(), "#000000".into()],
        sizes: vec!["XL".into()],
        ..Default::default()
    };
    let names: Vec<String> = filter_products(&state, &filter).await.into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Hoodie Zip"]);
    assert_eq!(filter.active_facets(), 3);
}

#[tokio::test]
async fn filter_by_type_uses_first_word() {
    let state = seeded_catalog().await;
    let filter = ProductFilter { types: vec!["Mug".into()], ..Default::default() };
    let found = filter_products(&state, &filter).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].product_type(), "Mug");
}

#[tokio::test]
async fn categories_start_with_all_and_dedupe() {
    let state = seeded_catalog().await;
    assert_eq!(categories(&state).await, vec!["all", "apparel", "home"]);
}

#[tokio::test]
async fn facets_collect_distinct_values() {
    let state = seeded_catalog().await;
    let f = facets(&state).await;
    assert_eq!(f.categories, vec!["apparel", "home"]);
    assert_eq!(f.colors, vec!["#FFFFFF", "#FF0000", "#000000"]);
    assert_eq!(f.sizes, vec!["S", "M", "L", "XL"]);
    assert_eq!(f.types, vec!["T-Shirt", "Hoodie", "Mug"]);
}

// =============================================================
// Bulk pricing
// =============================================================

#[tokio::test]
async fn bulk_pricing_default_schedule() {
    let state = test_app_state();
    let id = seed_product(&state, product("Tee", "apparel", 20.0)).await;
    let quote = bulk_pricing(&state, id, 25).await.unwrap();
    assert_eq!(quote.tiers.len(), 5);
    let d = quote.summary.display();
    assert_eq!((d.unit_price, d.total_price, d.savings), (17.0, 425.0, 75.0));
}

#[tokio::test]
async fn bulk_pricing_zero_quantity_quotes_one() {
    let state = test_app_state();
    let id = seed_product(&state, product("Tee", "apparel", 20.0)).await;
    let quote = bulk_pricing(&state, id, 0).await.unwrap();
    assert_eq!(quote.summary.quantity, 1);
    assert_eq!(quote.summary.total_price, 20.0);
}

#[tokio::test]
async fn bulk_pricing_custom_schedule() {
    let state = test_app_state();
    let id = seed_product(&state, custom_priced_product("Poster", 8.0)).await;
    let small = bulk_pricing(&state, id, 4).await.unwrap();
    let big = bulk_pricing(&state, id, 5).await.unwrap();
    assert_eq!(small.summary.unit_price, 8.0);
    assert_eq!(big.summary.unit_price, 4.0);
    assert_eq!(big.summary.savings, 20.0);
}

#[tokio::test]
async fn bulk_pricing_unknown_product() {
    let state = test_app_state();
    assert!(matches!(bulk_pricing(&state, 5, 1).await, Err(ProductError::Store(_))));
}

#[test]
fn product_deserializes_fixture_shape() {
    let raw = serde_json::json!({
        "Id": 3,
        "name": "Canvas Tote",
        "category": "bags",
        "basePrice": 16.5,
        "mockupUrl": "https://cdn.test/tote.png",
        "pricing": {"kind": "default"}
    });
    let p: Product = serde_json::from_value(raw).unwrap();
    assert_eq!(p.id, 3);
    assert_eq!(p.base_price, 16.5);
    assert!(p.colors.is_empty());
    assert_eq!(p.product_type(), "Canvas");
}
