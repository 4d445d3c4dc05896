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

use axum::http::{HeaderMap, HeaderValue, header};
use std::fmt::Write;
use url::Url;

/// Sets the permissive CORS headers on a response header map, replacing
/// any same-named headers the backend returned.
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
}

/// Translates an inbound request path into the WebSocket URL of the
/// backend: a trailing `/ws` segment is normalized, the path is resolved
/// against the backend origin, and the scheme is mapped `https` -> `wss`,
/// `http` -> `ws`.
pub fn backend_ws_url(backend_url: &str, path: &str) -> Option<String> {
    let trimmed = path.strip_suffix("/ws").unwrap_or(path);
    let url = Url::parse(backend_url)
        .ok()?
        .join(&format!("{trimmed}/ws"))
        .ok()?;

    let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
    let mut ws_url = format!("{}://{}", scheme, url.host_str()?);
    if let Some(port) = url.port() {
        let _ = write!(ws_url, ":{port}");
    }
    ws_url.push_str(url.path());
    if let Some(query) = url.query() {
        ws_url.push('?');
        ws_url.push_str(query);
    }

    Some(ws_url)
}
