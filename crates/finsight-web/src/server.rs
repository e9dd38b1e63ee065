use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

use finsight_core::{AllowedOrigins, CorsSettings};

/// Build the CORS layer.
///
/// Browsers refuse a literal `*` together with credentials, so "any origin
/// with credentials" echoes the request's origin, methods and headers.
pub fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origin = match &settings.origins {
        AllowedOrigins::Any if settings.allow_credentials => AllowOrigin::mirror_request(),
        AllowedOrigins::Any => AllowOrigin::any(),
        AllowedOrigins::List(origins) => AllowOrigin::list(origins.iter().filter_map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| tracing::warn!(origin = %o, error = %e, "skipping invalid CORS origin"))
                .ok()
        })),
    };

    let layer = CorsLayer::new().allow_origin(origin);
    if settings.allow_credentials {
        layer
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    } else {
        layer.allow_methods(Any).allow_headers(Any)
    }
}

/// Bind `host:port`, falling back to an OS-assigned port when that fails.
pub async fn bind_with_fallback(host: &str, port: u16) -> std::io::Result<TcpListener> {
    match TcpListener::bind((host, port)).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            let listener = TcpListener::bind((host, 0)).await?;
            let fallback = listener.local_addr()?.port();
            tracing::warn!(
                port,
                fallback,
                error = %e,
                "configured port unavailable, using OS-assigned port"
            );
            Ok(listener)
        }
    }
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
