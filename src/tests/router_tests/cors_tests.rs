use crate::router::serve;
use crate::tests::utils::{json_body, regional_app};
use astra::Body;
use http::{Method, Request};
use serde_json::json;

fn header<'a>(resp: &'a astra::Response, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

#[test]
fn preflight_allows_everything() {
    let app = regional_app();

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/predict")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let resp = serve(req, &app);
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "Access-Control-Allow-Origin"), Some("http://localhost:5173"));
    assert_eq!(header(&resp, "Access-Control-Allow-Credentials"), Some("true"));
    assert_eq!(header(&resp, "Access-Control-Allow-Headers"), Some("content-type"));
    assert!(header(&resp, "Access-Control-Allow-Methods")
        .unwrap()
        .contains("POST"));
}

#[test]
fn responses_without_origin_allow_any() {
    let app = regional_app();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .body(json_body(json!({})))
        .unwrap();

    let resp = serve(req, &app);
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(header(&resp, "Content-Type"), Some("application/json"));
}

#[test]
fn error_responses_carry_cors_headers() {
    let app = regional_app();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/missing")
        .header("Origin", "https://example.org")
        .body(Body::empty())
        .unwrap();

    let resp = serve(req, &app);
    assert_eq!(resp.status(), 404);
    assert_eq!(header(&resp, "Access-Control-Allow-Origin"), Some("https://example.org"));
}
