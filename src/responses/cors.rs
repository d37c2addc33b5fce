// responses/cors.rs
//
// Every origin, method and header is allowed. Credentials are allowed too,
// which browsers only accept alongside an explicit origin, so a request's
// Origin is echoed back instead of `*` whenever one is sent.
use crate::errors::{ResultResp, ServerError};
use astra::{Body, Request, Response, ResponseBuilder};
use http::HeaderValue;

const ALLOW_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";
const PREFLIGHT_MAX_AGE: &str = "600";

/// The CORS-relevant parts of a request, captured before the request is consumed.
#[derive(Debug, Clone, Default)]
pub struct CorsRequest {
    pub origin: Option<String>,
    pub request_headers: Option<String>,
}

impl CorsRequest {
    pub fn from_request(req: &Request) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            origin: header("Origin"),
            request_headers: header("Access-Control-Request-Headers"),
        }
    }
}

/// Add the allow-origin headers to any outgoing response.
pub fn with_cors(mut resp: Response, cors: &CorsRequest) -> Response {
    let headers = resp.headers_mut();

    match cors.origin.as_deref().and_then(|o| o.parse::<HeaderValue>().ok()) {
        Some(origin) => {
            headers.insert("Access-Control-Allow-Origin", origin);
            headers.insert(
                "Access-Control-Allow-Credentials",
                HeaderValue::from_static("true"),
            );
            headers.append("Vary", HeaderValue::from_static("Origin"));
        }
        None => {
            headers.insert(
                "Access-Control-Allow-Origin",
                HeaderValue::from_static("*"),
            );
        }
    }

    resp
}

/// Answer an `OPTIONS` preflight.
pub fn preflight_response(cors: &CorsRequest) -> ResultResp {
    let allow_headers = cors.request_headers.as_deref().unwrap_or("*");

    ResponseBuilder::new()
        .status(200)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", allow_headers)
        .header("Access-Control-Max-Age", PREFLIGHT_MAX_AGE)
        .header("Content-Length", "0")
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
