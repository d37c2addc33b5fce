use crate::domain::units::SQFT_PER_M2;
use crate::router::handle;
use crate::tests::utils::{body_json, generic_app, json_body, FixedRate, TimedOutRate};
use astra::Body;
use http::{Method, Request};
use serde_json::{json, Value};

fn house() -> Value {
    json!({
        "bedrooms": 3,
        "bathrooms": 2,
        "sqft_living": 120,
        "sqft_lot": 200,
        "floors": 2,
        "waterfront": 0,
        "condition": 3,
        "grade": 7,
        "sqft_above": 100,
        "sqft_basement": 20,
        "yr_built": 1995,
        "yr_renovated": 0
    })
}

fn post_predict(body: Body) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header("Content-Type", "application/json")
        .body(body)
        .unwrap()
}

fn expected_usd() -> f64 {
    50_000.0 + 100.0 * 120.0 * SQFT_PER_M2
}

#[test]
fn rate_timeout_uses_fallback_rate() {
    let app = generic_app(Box::new(TimedOutRate));

    let resp = handle(post_predict(json_body(house())), &app).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["exchange_rate"], json!(15500.0));
    assert_eq!(body["rate_source"], "fallback");
    assert_eq!(body["price_usd"], json!((expected_usd() * 100.0).round() / 100.0));
    assert_eq!(body["price_idr"], json!((expected_usd() * 15500.0).round()));
}

#[test]
fn live_rate_is_reported() {
    let app = generic_app(Box::new(FixedRate(16_250.0)));

    let resp = handle(post_predict(json_body(house())), &app).unwrap();
    let body = body_json(resp);

    assert_eq!(body["exchange_rate"], json!(16_250.0));
    assert_eq!(body["rate_source"], "live");
    assert_eq!(body["price_idr"], json!((expected_usd() * 16_250.0).round()));
}

#[test]
fn basement_and_renovation_default_to_zero() {
    let app = generic_app(Box::new(TimedOutRate));

    let mut payload = house();
    let fields = payload.as_object_mut().unwrap();
    fields.remove("sqft_basement");
    fields.remove("yr_renovated");

    let resp = handle(post_predict(json_body(payload)), &app).unwrap();
    assert_eq!(resp.status(), 200);
}

#[test]
fn missing_required_field_is_unprocessable() {
    let app = generic_app(Box::new(TimedOutRate));

    let mut payload = house();
    payload.as_object_mut().unwrap().remove("grade");

    let err = handle(post_predict(json_body(payload)), &app).err().expect("request should fail");
    assert_eq!(err.status(), 422);
    assert!(err.to_string().contains("grade"));
}

#[test]
fn non_numeric_area_is_unprocessable() {
    let app = generic_app(Box::new(TimedOutRate));

    let mut payload = house();
    payload["sqft_living"] = json!("big");

    let err = handle(post_predict(json_body(payload)), &app).err().expect("request should fail");
    assert_eq!(err.status(), 422);
}

#[test]
fn whole_number_floats_are_accepted_for_integer_fields() {
    let app = generic_app(Box::new(FixedRate(16_250.0)));

    let mut payload = house();
    payload["grade"] = json!(7.0);
    payload["yr_built"] = json!(1995.0);

    let resp = handle(post_predict(json_body(payload)), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["price_usd"], json!((expected_usd() * 100.0).round() / 100.0));
}

#[test]
fn fractional_grade_is_unprocessable() {
    let app = generic_app(Box::new(TimedOutRate));

    let mut payload = house();
    payload["grade"] = json!(7.5);

    let err = handle(post_predict(json_body(payload)), &app).err().expect("request should fail");
    assert_eq!(err.status(), 422);
}
