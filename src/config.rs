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

use std::env;

/// Configuration for the proxy.
#[derive(Debug, Clone)]
pub struct Config {
    /// The port to listen on.
    pub port: u16,
    /// The backend origin all requests are forwarded to.
    /// If `None`, every request is answered with a 500.
    pub backend_url: Option<String>,
    /// Optional API key. Kept in the configuration shape for
    /// forward-compatibility; requests are forwarded unauthenticated.
    pub api_key: Option<String>,
}

impl Config {
    /// # Environment Variables
    /// * `PORT` - Port to listen on (default: 3000).
    /// * `BACKEND_URL` - Backend origin to forward to. An empty value
    ///   counts as unset.
    /// * `API_KEY` - Optional API key (currently inert).
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let backend_url = env::var("BACKEND_URL").ok().filter(|v| !v.is_empty());
        let api_key = env::var("API_KEY").ok().filter(|v| !v.is_empty());

        Self {
            port,
            backend_url,
            api_key,
        }
    }
}
