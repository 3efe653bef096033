use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn json_response(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        vec![Header::from_bytes(b"Content-Type", b"application/json").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn ok_json<T: serde::Serialize>(value: &T) -> Response<Cursor<Vec<u8>>> {
    match serde_json::to_string(value) {
        Ok(body) => json_response(200, body),
        Err(e) => error_response(500, &e.to_string()),
    }
}

pub fn error_response(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    json_response(status, serde_json::json!({ "error": message }).to_string())
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    error_response(404, "not found")
}

/// Reads and parses a JSON request body.
pub fn read_json<T: serde::de::DeserializeOwned>(request: &mut Request) -> Result<T, String> {
    serde_json::from_reader(request.as_reader()).map_err(|e| format!("bad request body: {e}"))
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    let response = match (method, path.as_str()) {
        // ── Read surface ─────────────────────────────────────────────────
        (Method::Get,  "/network") => handlers::network::handle_get(state),
        (Method::Get,  "/spec")    => handlers::network::handle_get_spec(state),

        // ── Build trigger ────────────────────────────────────────────────
        (Method::Post, "/build")   => handlers::network::handle_build(&mut request, state),
        (Method::Post, "/config")  => handlers::train::handle_config(&mut request, state),

        // ── Training step ────────────────────────────────────────────────
        (Method::Post, "/forward") => handlers::train::handle_forward(&mut request, state),
        (Method::Post, "/step")    => handlers::train::handle_step(&mut request, state),

        // ── 404 ──────────────────────────────────────────────────────────
        _ => not_found(),
    };

    log::debug!("{} {} -> {}", request.method(), path, response.status_code().0);
    if let Err(e) = request.respond(response) {
        log::warn!("failed to send response: {e}");
    }
}
