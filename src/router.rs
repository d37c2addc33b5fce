use crate::domain::house::{GenericHouseInput, RegionalHouseInput};
use crate::errors::{ResultResp, ServerError};
use crate::predict::App;
use crate::responses::{error_to_response, json_response, preflight_response, with_cors, CorsRequest};
use astra::{Request, Response};
use serde_json::json;
use std::io::Read;

const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Entry point for the server: routes the request, renders errors and
/// attaches CORS headers to every response.
pub fn serve(req: Request, app: &App) -> Response {
    let cors = CorsRequest::from_request(&req);
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    let resp = match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    };

    tracing::debug!(%method, %path, status = resp.status().as_u16(), "handled request");
    with_cors(resp, &cors)
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("OPTIONS", _) => preflight_response(&CorsRequest::from_request(&req)),

        ("GET", "/") | ("GET", "/health") => json_response(
            200,
            &json!({ "status": "ok", "variant": app.variant().as_str() }),
        ),

        ("POST", "/predict") => predict(req, app),
        (_, "/predict") => Err(ServerError::MethodNotAllowed),

        _ => Err(ServerError::NotFound),
    }
}

fn predict(req: Request, app: &App) -> ResultResp {
    match app {
        App::Regional(service) => {
            let bytes = read_body(req)?;
            let input = RegionalHouseInput::from_json_slice(&bytes).map_err(invalid_body)?;
            json_response(200, &service.predict(&input)?)
        }
        App::Generic(service) => {
            let bytes = read_body(req)?;
            let input: GenericHouseInput = serde_json::from_slice(&bytes).map_err(invalid_body)?;
            json_response(200, &service.predict(&input)?)
        }
    }
}

fn read_body(req: Request) -> Result<Vec<u8>, ServerError> {
    let mut body = req.into_body();
    let mut bytes = Vec::new();

    body.reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read request body: {e}")))?;

    if bytes.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::PayloadTooLarge);
    }

    Ok(bytes)
}

fn invalid_body(e: serde_json::Error) -> ServerError {
    ServerError::Unprocessable(format!("Invalid request body: {e}"))
}
