#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use classifieds::{app, utilities::app_state::AppState};

pub fn in_memory_app() -> Router {
    app(AppState::in_memory())
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}

pub fn property(name: &str) -> Value {
    json!({
        "name": name,
        "price": "250000",
        "description": "Bright flat close to the sea",
        "category": Uuid::new_v4().to_string(),
        "coords": [33.89, 35.50],
        "bedrooms": 2,
        "bathrooms": 1,
        "space": 120.0,
        "is_featured": false,
        "is_sponsored": false,
        "is_listed": true,
        "on_sale": true,
        "is_rent": false,
        "user_id": Uuid::new_v4().to_string(),
    })
}

pub fn vehicle(name: &str, brand: &str, kilometers: f64) -> Value {
    json!({
        "name": name,
        "price": "18000",
        "description": "Single owner, full service history",
        "category": Uuid::new_v4().to_string(),
        "coords": [33.89, 35.50],
        "brand": brand,
        "model": "Corolla",
        "kilometers": kilometers,
        "year": 2018,
        "fuel_type": "petrol",
        "transmission_type": "automatic",
        "body_type": "sedan",
        "air_conditioning": "automatic",
        "color": "white",
        "number_of_seats": 5,
        "number_of_doors": 4,
        "interior": "fabric",
        "payment_option": "cash",
        "is_featured": false,
        "is_sponsored": false,
        "is_listed": true,
        "on_sale": true,
        "user_id": Uuid::new_v4().to_string(),
    })
}

/// Merges `overrides` into `base`.
pub fn with(mut base: Value, overrides: Value) -> Value {
    if let (Some(base), Value::Object(overrides)) = (base.as_object_mut(), overrides) {
        base.extend(overrides);
    }
    base
}

pub fn names(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}
