use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Credentialed CORS restricted to an explicit origin allow-list.
///
/// Origins that are not valid header values are logged and skipped; a
/// wildcard is never substituted because tower-http rejects `*` together
/// with credentials.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
