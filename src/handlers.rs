/*
 * Copyright (C) 2025 Jakub Žitník
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 */

use crate::{state::AppState, utils};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use url::Url;

/// The main proxy handler that intercepts all traffic.
///
/// Forwards the request to the configured backend origin, preserving
/// method, path, query, headers and body, and relays the backend's
/// response with permissive CORS headers forced on.
pub async fn proxy_handler(State(state): State<AppState>, req: Request) -> Response {
    let Some(backend_url) = state.config.backend_url.as_deref() else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "BACKEND_URL not configured")
            .into_response();
    };

    // Exact byte match, per the upgrade contract. `Upgrade: WebSocket`
    // and friends fall through to plain forwarding.
    let is_upgrade = req
        .headers()
        .get(header::UPGRADE)
        .is_some_and(|v| v.as_bytes() == b"websocket");
    if is_upgrade {
        return websocket_stub(&req, backend_url);
    }

    let path_query = req
        .uri()
        .path_and_query()
        .map(|v| v.as_str())
        .unwrap_or("/");

    // Joining an absolute path keeps only the backend's scheme and
    // authority; a base path on BACKEND_URL is dropped.
    let target = match Url::parse(backend_url).and_then(|base| base.join(path_query)) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Invalid backend URL {}: {}", backend_url, e);
            return backend_unavailable(e);
        }
    };

    tracing::info!("Proxying: {} -> {}", req.uri(), target);

    let method = req.method().clone();
    let headers = req.headers().clone();
    let body = reqwest::Body::wrap_stream(req.into_body().into_data_stream());

    let request_builder = state
        .client
        .request(method, target)
        .headers(headers)
        .body(body);

    match request_builder.send().await {
        Ok(resp) => {
            let status = resp.status();
            let mut headers = resp.headers().clone();
            utils::apply_cors_headers(&mut headers);

            let mut response = Response::new(Body::from_stream(resp.bytes_stream()));
            *response.status_mut() = status;
            *response.headers_mut() = headers;
            response
        }
        Err(e) => {
            tracing::error!("Backend request failed: {}", e);
            backend_unavailable(e)
        }
    }
}

/// Stub for WebSocket upgrade requests.
///
/// The translated backend WebSocket URL is computed and logged so the
/// client knows where to connect, but no tunneling is attempted; the
/// response is always 426.
fn websocket_stub(req: &Request, backend_url: &str) -> Response {
    if let Some(ws_url) = utils::backend_ws_url(backend_url, req.uri().path()) {
        tracing::debug!("Refusing WebSocket upgrade; direct endpoint is {}", ws_url);
    }

    let mut response = Response::new(Body::from(
        "WebSocket proxying is not supported. Please connect directly to the backend.",
    ));
    *response.status_mut() = StatusCode::UPGRADE_REQUIRED;
    response
        .headers_mut()
        .insert(header::UPGRADE, HeaderValue::from_static("websocket"));
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("Upgrade"));
    response
}

/// Builds the 502 response returned when the backend cannot be reached.
fn backend_unavailable(err: impl std::fmt::Display) -> Response {
    let body = serde_json::json!({
        "error": "Backend unavailable",
        "message": err.to_string(),
    });

    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response()
}
