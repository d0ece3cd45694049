mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{in_memory_app, names, send, vehicle, with};

const PATH: &str = "/api/v1/vehicle-listings";

#[tokio::test]
async fn brand_filter_is_exact_but_case_insensitive() {
    let app = in_memory_app();
    send(&app, "POST", PATH, Some(vehicle("Corolla", "Toyota", 40_000.0))).await;
    send(&app, "POST", PATH, Some(vehicle("Hilux", "Toyota Motors", 90_000.0))).await;

    let (status, body) = send(&app, "GET", &format!("{PATH}?brand=toyota"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Corolla"]);
}

#[tokio::test]
async fn kilometer_range_uses_km_params() {
    let app = in_memory_app();
    send(&app, "POST", PATH, Some(vehicle("Low", "Honda", 10_000.0))).await;
    send(&app, "POST", PATH, Some(vehicle("Mid", "Honda", 60_000.0))).await;
    send(&app, "POST", PATH, Some(vehicle("High", "Honda", 200_000.0))).await;

    let (_, body) = send(&app, "GET", &format!("{PATH}?km_min=50000&km_max=100000"), None).await;
    assert_eq!(names(&body), vec!["Mid"]);

    let (_, body) = send(
        &app,
        "GET",
        &format!("{PATH}?sortBy=kilometers&sortDir=asc"),
        None,
    )
    .await;
    assert_eq!(names(&body), vec!["Low", "Mid", "High"]);
}

#[tokio::test]
async fn accessories_skip_the_vehicle_sheet() {
    let app = in_memory_app();
    let accessory = json!({
        "listing_type": "accessory",
        "name": "Roof rack",
        "price": "120",
        "description": "Fits most sedans",
        "category": uuid::Uuid::new_v4().to_string(),
        "coords": [33.9, 35.5],
        "accessory_type": "rack",
        "payment_option": "installment",
        "is_featured": false,
        "is_sponsored": false,
        "is_listed": true,
        "on_sale": false,
        "user_id": uuid::Uuid::new_v4().to_string(),
    });
    let (status, created) = send(&app, "POST", PATH, Some(accessory)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["condition"], "new");
    assert_eq!(created["kilometers"], 0.0);

    let (_, body) = send(&app, "GET", &format!("{PATH}?listing_type=accessory"), None).await;
    assert_eq!(names(&body), vec!["Roof rack"]);

    let incomplete = with(vehicle("Civic", "Honda", 1.0), json!({ "year": null }));
    let (status, body) = send(&app, "POST", PATH, Some(incomplete)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "year is required for vehicle listings");
}

#[tokio::test]
async fn unknown_vehicle_is_not_found() {
    let app = in_memory_app();
    let uri = format!("{PATH}/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Vehicle listing not found");
}
