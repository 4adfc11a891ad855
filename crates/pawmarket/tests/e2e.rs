// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete PawMarket flow.
//!
//! Each test creates an isolated TestHarness with a temp SQLite store and the
//! full gateway router. Tests are independent and order-insensitive.

use axum::http::StatusCode;
use serde_json::{Value, json};

use pawmarket_catalog::default_inquiry_message;
use pawmarket_core::{Availability, ListingStore};
use pawmarket_test_utils::TestHarness;

fn listing(breed: &str, age: u32, price: f64, location: &str) -> Value {
    json!({
        "breed": breed,
        "age": age,
        "gender": "Female",
        "price": price,
        "availability": "Available",
        "description": format!("A friendly {breed}"),
        "location": location,
    })
}

async fn create(harness: &TestHarness, token: &str, body: Value) -> String {
    let (status, created) = harness
        .request_json("POST", "/v1/admin/dogs", Some(token), Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    created["id"].as_str().unwrap().to_string()
}

fn breeds(list: &Value) -> Vec<String> {
    list["dogs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["breed"].as_str().unwrap().to_string())
        .collect()
}

// ---- Listing lifecycle ----

#[tokio::test]
async fn admin_created_listing_is_browsable() {
    let harness = TestHarness::builder().build().await.unwrap();
    let token = harness.login().await;

    let id = create(&harness, &token, listing("Beagle", 3, 450.0, "Austin")).await;

    let (status, list) = harness.request_json("GET", "/v1/dogs", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["count"], 1);
    assert_eq!(list["dogs"][0]["id"], id);
    assert_eq!(list["dogs"][0]["breed"], "Beagle");
    assert_eq!(list["dogs"][0]["has_image"], false);

    let (status, dog) = harness
        .request_json("GET", &format!("/v1/dogs/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dog["location"], "Austin");
    assert_eq!(dog["created_at"], dog["updated_at"]);
}

#[tokio::test]
async fn breed_and_price_filters_narrow_results() {
    let harness = TestHarness::builder().build().await.unwrap();
    let token = harness.login().await;

    create(&harness, &token, listing("Beagle", 3, 450.0, "Austin")).await;
    create(&harness, &token, listing("Poodle", 5, 900.0, "Denver")).await;
    create(&harness, &token, listing("Beagle", 8, 300.0, "Denver")).await;

    let (_, list) = harness
        .request_json("GET", "/v1/dogs?breed=Beagle", None, None)
        .await;
    assert_eq!(list["count"], 2);
    assert!(breeds(&list).iter().all(|b| b == "Beagle"));

    let (_, list) = harness
        .request_json("GET", "/v1/dogs?breed=All&min_price=400&max_price=1000", None, None)
        .await;
    let mut found = breeds(&list);
    found.sort();
    assert_eq!(found, vec!["Beagle", "Poodle"]);

    let (_, list) = harness
        .request_json("GET", "/v1/dogs?location=Denver&max_age=6", None, None)
        .await;
    assert_eq!(breeds(&list), vec!["Poodle"]);

    let (_, options) = harness
        .request_json("GET", "/v1/dogs/filters", None, None)
        .await;
    assert_eq!(options["empty"], false);
    assert_eq!(options["bounds"]["breeds"], json!(["Beagle", "Poodle"]));
    assert_eq!(options["bounds"]["locations"], json!(["Austin", "Denver"]));
    assert_eq!(options["bounds"]["min_price"], 300.0);
    assert_eq!(options["bounds"]["max_price"], 900.0);
    assert_eq!(options["bounds"]["min_age"], 0);
    assert_eq!(options["bounds"]["max_age"], 8);
}

#[tokio::test]
async fn marking_sold_hides_listing_and_blocks_inquiries() {
    let harness = TestHarness::builder().build().await.unwrap();
    let token = harness.login().await;
    let id = create(&harness, &token, listing("Poodle", 5, 900.0, "Denver")).await;

    let mut sold = listing("Poodle", 5, 900.0, "Denver");
    sold["availability"] = json!("Sold");
    let (status, _) = harness
        .request("PUT", &format!("/v1/admin/dogs/{id}"), Some(token.as_str()), Some(sold))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = harness
        .request_json("GET", "/v1/dogs?availability=Available", None, None)
        .await;
    assert_eq!(list["count"], 0);

    let (_, list) = harness
        .request_json("GET", "/v1/dogs?availability=Sold", None, None)
        .await;
    assert_eq!(list["count"], 1);

    let stored = harness.storage.get_dog(&id).await.unwrap().unwrap();
    assert_eq!(stored.availability, Availability::Sold);
    assert!(stored.updated_at >= stored.created_at);

    let (status, _) = harness
        .request(
            "POST",
            &format!("/v1/dogs/{id}/inquiries"),
            None,
            Some(json!({"name": "Sam", "email": "sam@example.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// ---- Inquiries ----

#[tokio::test]
async fn inquiry_survives_listing_deletion() {
    let harness = TestHarness::builder().build().await.unwrap();
    let token = harness.login().await;
    let id = create(&harness, &token, listing("Beagle", 3, 450.0, "Austin")).await;

    let (status, _) = harness
        .request_json(
            "POST",
            &format!("/v1/dogs/{id}/inquiries"),
            None,
            Some(json!({
                "name": "Alex",
                "email": "alex@example.com",
                "phone": "555-0100",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, inquiries) = harness
        .request_json("GET", "/v1/admin/inquiries", Some(token.as_str()), None)
        .await;
    assert_eq!(inquiries[0]["breed"], "Beagle");
    assert_eq!(inquiries[0]["message"], default_inquiry_message("Beagle"));

    let (status, _) = harness
        .request("DELETE", &format!("/v1/admin/dogs/{id}"), Some(token.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(harness.storage.get_dog(&id).await.unwrap().is_none());

    let (_, inquiries) = harness
        .request_json("GET", "/v1/admin/inquiries", Some(token.as_str()), None)
        .await;
    let inquiries = inquiries.as_array().unwrap();
    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0]["dog_id"], id);
    assert_eq!(inquiries[0]["breed"], "Unknown");
    assert_eq!(inquiries[0]["name"], "Alex");
}

#[tokio::test]
async fn admin_overview_counts_listings_and_inquiries() {
    let harness = TestHarness::builder().build().await.unwrap();
    let token = harness.login().await;

    let beagle = create(&harness, &token, listing("Beagle", 3, 450.0, "Austin")).await;
    create(&harness, &token, listing("Beagle", 8, 300.0, "Denver")).await;
    let poodle = create(&harness, &token, listing("Poodle", 5, 900.0, "Denver")).await;

    let mut sold = listing("Poodle", 5, 900.0, "Denver");
    sold["availability"] = json!("Sold");
    harness
        .request("PUT", &format!("/v1/admin/dogs/{poodle}"), Some(token.as_str()), Some(sold))
        .await;
    harness
        .request(
            "POST",
            &format!("/v1/dogs/{beagle}/inquiries"),
            None,
            Some(json!({"name": "Kim", "email": "kim@example.com", "message": "Still free?"})),
        )
        .await;

    let (status, overview) = harness
        .request_json("GET", "/v1/admin/overview", Some(token.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["total_dogs"], 3);
    assert_eq!(overview["available"], 2);
    assert_eq!(overview["sold"], 1);
    assert_eq!(overview["total_inquiries"], 1);
    assert_eq!(overview["by_breed"][0], json!({"breed": "Beagle", "count": 2}));
    assert_eq!(overview["by_breed"][1], json!({"breed": "Poodle", "count": 1}));
}

// ---- Admin access ----

#[tokio::test]
async fn admin_routes_require_login() {
    let harness = TestHarness::builder().build().await.unwrap();

    let (status, _) = harness
        .request(
            "POST",
            "/v1/admin/dogs",
            None,
            Some(listing("Beagle", 3, 450.0, "Austin")),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = harness
        .request("GET", "/v1/admin/overview", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(harness.storage.list_dogs().await.unwrap().is_empty());
}

#[tokio::test]
async fn custom_admin_password_is_honoured() {
    let harness = TestHarness::builder()
        .with_admin_password("s3cret-kennel")
        .build()
        .await
        .unwrap();

    let (status, _) = harness
        .request(
            "POST",
            "/v1/admin/login",
            None,
            Some(json!({"username": "admin", "password": "test-admin-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = harness.login().await;
    let (status, _) = harness
        .request("GET", "/v1/admin/dogs", Some(token.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}
