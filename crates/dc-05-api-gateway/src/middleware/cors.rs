//! Cross-origin policy for browser clients of the donation site.

use crate::domain::config::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use std::str::FromStr;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

/// Parses each entry, dropping (and logging) the ones that do not parse.
fn parse_entries<T: FromStr>(field: &'static str, values: &[String]) -> Vec<T> {
    values
        .iter()
        .filter_map(|raw| {
            let parsed = raw.parse().ok();
            if parsed.is_none() {
                warn!(field, value = %raw, "ignoring unparsable CORS entry");
            }
            parsed
        })
        .collect()
}

/// Builds the CORS layer. A disabled policy adds no CORS headers at all.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::new();
    }

    let any_origin = is_wildcard(&config.allowed_origins);
    let layer = CorsLayer::new()
        .allow_methods(parse_entries::<Method>("allowed_methods", &config.allowed_methods))
        .max_age(Duration::from_secs(config.max_age));

    let layer = if any_origin {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parse_entries::<HeaderValue>(
            "allowed_origins",
            &config.allowed_origins,
        ))
    };

    let layer = if is_wildcard(&config.allowed_headers) {
        layer.allow_headers(Any)
    } else {
        layer.allow_headers(parse_entries::<HeaderName>(
            "allowed_headers",
            &config.allowed_headers,
        ))
    };

    // tower-http panics on credentials combined with a wildcard origin.
    if config.allow_credentials && !any_origin {
        layer.allow_credentials(true)
    } else {
        layer
    }
}
