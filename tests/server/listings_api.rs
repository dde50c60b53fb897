use uy_ijara::application::routes::RootMessage;
use uy_ijara::domain::listings::{Listing, TelegramListing};

use crate::helpers::{
    ListingFixture, create_default_listing, insert_listing, insert_user, spawn_app,
};

#[tokio::test]
async fn root_reports_liveness() {
    let app = spawn_app().await;

    let response = reqwest::get(app.page_url("/"))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: RootMessage = response.json().await.expect("Failed to parse response");
    assert_eq!(body.message, "Uy Ijara API ishlamoqda");
}

#[tokio::test]
async fn listing_active_returns_empty_array_for_empty_store() {
    let app = spawn_app().await;

    let response = reqwest::get(app.api_url("/listings"))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let listings: Vec<Listing> = response.json().await.expect("Failed to parse response");
    assert!(listings.is_empty());
}

#[tokio::test]
async fn listing_active_orders_newest_first_and_skips_inactive() {
    let app = spawn_app().await;
    let owner = insert_user(&app, "Dilnoza").await;

    let oldest = insert_listing(
        &app,
        owner,
        ListingFixture::titled("Oldest", "2025-01-01T08:00:00Z"),
    )
    .await;
    let newest = insert_listing(
        &app,
        owner,
        ListingFixture::titled("Newest", "2025-03-01T08:00:00Z"),
    )
    .await;
    insert_listing(
        &app,
        owner,
        ListingFixture::titled("Hidden", "2025-04-01T08:00:00Z").inactive(),
    )
    .await;
    let middle = insert_listing(
        &app,
        owner,
        ListingFixture::titled("Middle", "2025-02-01T08:00:00Z"),
    )
    .await;

    let listings: Vec<Listing> = reqwest::get(app.api_url("/listings"))
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    let ids: Vec<i64> = listings.iter().map(|l| l.id.into_inner()).collect();
    assert_eq!(ids, vec![newest, middle, oldest]);
    assert!(listings.iter().all(|l| l.is_active));
    assert!(listings.iter().all(|l| l.owner_name == "Dilnoza"));
}

#[tokio::test]
async fn listing_active_orders_mixed_timestamp_formats_chronologically() {
    let app = spawn_app().await;
    let owner = insert_user(&app, "Owner").await;

    let earlier = insert_listing(
        &app,
        owner,
        ListingFixture::titled("Earlier", "2025-01-01T07:00:00Z"),
    )
    .await;
    let later = insert_listing(
        &app,
        owner,
        ListingFixture::titled("Later", "2025-01-01 08:00:00"),
    )
    .await;

    let listings: Vec<Listing> = reqwest::get(app.api_url("/listings"))
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    let ids: Vec<i64> = listings.iter().map(|l| l.id.into_inner()).collect();
    assert_eq!(ids, vec![later, earlier]);
}

#[tokio::test]
async fn listing_photos_are_normalized() {
    let app = spawn_app().await;
    let owner = insert_user(&app, "Owner").await;

    let scalar = insert_listing(
        &app,
        owner,
        ListingFixture::titled("Scalar", "2025-01-03T00:00:00Z").with_photos("AgACAgIAAxkBAAI"),
    )
    .await;
    let sequence = insert_listing(
        &app,
        owner,
        ListingFixture::titled("Sequence", "2025-01-02T00:00:00Z")
            .with_photos(r#"["third","first","second"]"#),
    )
    .await;
    let none = insert_listing(
        &app,
        owner,
        ListingFixture::titled("None", "2025-01-01T00:00:00Z"),
    )
    .await;

    let listings: Vec<Listing> = reqwest::get(app.api_url("/listings"))
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    let photos_of = |id: i64| {
        listings
            .iter()
            .find(|l| l.id.into_inner() == id)
            .map(|l| l.photos.clone())
            .expect("listing should be present")
    };

    assert_eq!(photos_of(scalar), vec!["AgACAgIAAxkBAAI"]);
    assert_eq!(photos_of(sequence), vec!["third", "first", "second"]);
    assert!(photos_of(none).is_empty());
}

#[tokio::test]
async fn getting_a_listing_returns_a_200_for_valid_id() {
    let app = spawn_app().await;
    let id = create_default_listing(&app).await;

    let response = reqwest::get(app.api_url(&format!("/listings/{id}")))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let listing: Listing = response.json().await.expect("Failed to parse response");
    assert_eq!(listing.id.into_inner(), id);
    assert_eq!(listing.title, "2 xonali kvartira");
    assert_eq!(listing.owner_name, "Aziz Karimov");
    assert_eq!(listing.total_floors, 9);
    assert_eq!(listing.floor_number, 3);
}

#[tokio::test]
async fn getting_an_inactive_listing_by_id_still_works() {
    let app = spawn_app().await;
    let owner = insert_user(&app, "Owner").await;
    let id = insert_listing(
        &app,
        owner,
        ListingFixture::titled("Rented out", "2025-01-01T00:00:00Z").inactive(),
    )
    .await;

    let response = reqwest::get(app.api_url(&format!("/listings/{id}")))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let listing: Listing = response.json().await.expect("Failed to parse response");
    assert!(!listing.is_active);
}

#[tokio::test]
async fn getting_a_listing_returns_a_404_for_unknown_id() {
    let app = spawn_app().await;

    for path in ["/listings/999", "/listings/999/telegram", "/listings/0", "/listings/-3"] {
        let response = reqwest::get(app.api_url(path))
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 404, "{path} should be 404");

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["detail"], "E'lon topilmadi");
    }
}

#[tokio::test]
async fn getting_a_listing_rejects_non_numeric_id() {
    let app = spawn_app().await;

    let response = reqwest::get(app.api_url("/listings/abc"))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn telegram_variant_adds_deep_link() {
    let app = spawn_app().await;
    let owner = insert_user(&app, "Owner").await;
    insert_listing(
        &app,
        owner,
        ListingFixture::titled("Deep link", "2025-01-01T00:00:00Z")
            .with_id(42)
            .with_photos(r#"["abc"]"#),
    )
    .await;

    let response = reqwest::get(app.api_url("/listings/42/telegram"))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: TelegramListing = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body.telegram_url,
        "https://t.me/testuchun878_bot?start=listing_42"
    );
    assert_eq!(body.listing.id.into_inner(), 42);
    assert_eq!(body.listing.title, "Deep link");
    assert_eq!(body.listing.photos, vec!["abc"]);
}

#[tokio::test]
async fn mapping_fault_returns_500_with_detail() {
    let app = spawn_app().await;
    let owner = insert_user(&app, "Owner").await;
    let id = insert_listing(
        &app,
        owner,
        ListingFixture {
            title: None,
            ..ListingFixture::titled("", "2025-01-01T00:00:00Z")
        },
    )
    .await;

    for path in [format!("/listings/{id}"), "/listings".to_string()] {
        let response = reqwest::get(app.api_url(&path))
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 500, "{path} should be 500");

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let detail = body["detail"].as_str().unwrap_or_default();
        assert!(detail.starts_with("Server error:"), "unexpected detail: {detail}");
        assert!(detail.contains("title"), "unexpected detail: {detail}");
    }
}

#[tokio::test]
async fn malformed_photos_column_returns_500() {
    let app = spawn_app().await;
    let owner = insert_user(&app, "Owner").await;
    let id = insert_listing(
        &app,
        owner,
        ListingFixture::titled("Broken photos", "2025-01-01T00:00:00Z").with_photos("[1, 2]"),
    )
    .await;

    let response = reqwest::get(app.api_url(&format!("/listings/{id}")))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn out_of_range_coordinates_return_500() {
    let app = spawn_app().await;
    let owner = insert_user(&app, "Owner").await;
    let id = insert_listing(
        &app,
        owner,
        ListingFixture {
            longitude: 200.0,
            ..ListingFixture::titled("Off the map", "2025-01-01T00:00:00Z")
        },
    )
    .await;

    let response = reqwest::get(app.api_url(&format!("/listings/{id}")))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(
        body["detail"]
            .as_str()
            .is_some_and(|d| d.contains("longitude"))
    );
}

#[tokio::test]
async fn database_fault_returns_500_with_detail() {
    let app = spawn_app().await;
    create_default_listing(&app).await;

    sqlx::query("DROP TABLE listings")
        .execute(&app.writer)
        .await
        .expect("Failed to drop table");

    let response = reqwest::get(app.api_url("/listings"))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(
        body["detail"]
            .as_str()
            .is_some_and(|d| d.contains("no such table"))
    );
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(app.api_url("/listings"))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}

#[tokio::test]
async fn cors_ignores_unknown_origin() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(app.api_url("/listings"))
        .header("Origin", "https://evil.example")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}
