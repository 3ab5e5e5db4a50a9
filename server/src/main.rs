use std::sync::Arc;

use app::{
    client::{ApiError, ClientConfig, LibraryClient},
    component, shell,
    types::AppState,
};
use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};
use dotenvy::dotenv;
use leptos::logging;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes as _, generate_route_list};
use leptos_config::get_configuration;
use serde_json::json;

use tower_http::compression::CompressionLayer;
use tower_http::compression::predicate::SizeAbove;
use tower_http::trace::TraceLayer;

// Health check handler
async fn health_handler(
    State(client): State<Arc<LibraryClient>>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "library-dashboard",
        "version": env!("CARGO_PKG_VERSION"),
        "upstream": client.base_url(),
    })))
}

/// Builds the shared state; fails when the library API base URL is unusable.
fn build_state(leptos_options: LeptosOptions, config: ClientConfig) -> Result<AppState, ApiError> {
    let client = LibraryClient::new(config)?;
    Ok(AppState {
        client: Arc::new(client),
        leptos_options: Arc::new(leptos_options),
    })
}

#[tokio::main]
async fn main() {
    let tracing_level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_max_level(tracing_level)
        .init();

    let env_result = dotenv();
    if env_result.is_err() {
        logging::warn!("There is no corresponding .env file");
    }

    let Ok(conf) = get_configuration(Some("Cargo.toml")) else {
        logging::error!("Failed to get configuration");
        return;
    };

    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(component);

    let app_state = match build_state(leptos_options.clone(), ClientConfig::from_env()) {
        Ok(state) => state,
        Err(err) => {
            logging::error!("Failed to configure the library API client: {}", err);
            return;
        }
    };
    tracing::info!(upstream = app_state.client.base_url(), "library API client ready");

    let app = Router::new()
        .leptos_routes_with_context(
            &app_state,
            routes,
            {
                let app_state = app_state.clone();
                move || provide_context(app_state.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .route("/health", get(health_handler))
        .layer(tower::ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .layer(CompressionLayer::new().compress_when(SizeAbove::new(1024)))
        .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
        .with_state(app_state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(list) => list,
        Err(err) => {
            logging::error!("Failed to bind tcp listener to {}: {}", &addr, err);
            return;
        }
    };
    logging::log!("Listening on http://{}", &addr);

    if let Err(err) = axum::serve(listener, app.into_make_service()).await {
        logging::error!("Failed to serve app: {}", err);
        logging::error!("Error details: {:?}", err);
    } else {
        logging::log!("Server shutdown gracefully");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn options() -> LeptosOptions {
        LeptosOptions::builder().output_name("library").build()
    }

    #[test]
    fn test_workspace_manifest_configures_site() {
        let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/../Cargo.toml");
        let conf = get_configuration(Some(manifest)).expect("leptos metadata in workspace manifest");

        assert_eq!(&*conf.leptos_options.output_name, "library");
        assert_eq!(&*conf.leptos_options.site_pkg_dir, "pkg");
    }

    #[test]
    fn test_build_state_rejects_relative_base_url() {
        let config = ClientConfig {
            base_url: "library.local/api".to_owned(),
            ..ClientConfig::default()
        };
        assert_matches!(build_state(options(), config), Err(ApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_health_handler_reports_upstream() {
        let config = ClientConfig {
            base_url: "http://library.local/api/".to_owned(),
            ..ClientConfig::default()
        };
        let state = build_state(options(), config).expect("valid config");

        tokio_test::block_on(async {
            let Json(body) = health_handler(State(state.client.clone()))
                .await
                .expect("health handler never fails");

            assert_eq!(body["status"], "healthy");
            assert_eq!(body["service"], "library-dashboard");
            assert_eq!(body["upstream"], "http://library.local/api");
            assert!(body.get("timestamp").is_some());
            assert!(body.get("version").is_some());
        });
    }
}
