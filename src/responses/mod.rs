pub mod cors;
pub mod errors;
pub mod json;

pub use cors::{preflight_response, with_cors, CorsRequest};
pub use errors::error_to_response;
pub use json::json_response;
