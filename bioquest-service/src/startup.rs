//! Application startup and lifecycle management.

use crate::config::BioquestConfig;
use crate::handlers::{
    app::root,
    chat::{student_chat, teacher_chat},
    health::health_check,
    media::{image, video},
    metrics::metrics,
    quiz::generate_quiz,
};
use crate::services::providers::{
    build_http_client, openai::OpenAiChatProvider, unsplash::UnsplashImageProvider,
    youtube::YoutubeVideoProvider, ChatProvider, ImageSearchProvider, VideoSearchProvider,
};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::cors_layer, metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::{http_trace_layer, request_id_middleware},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;

/// Shared application state. Built once at startup; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BioquestConfig>,
    pub chat_provider: Arc<dyn ChatProvider>,
    pub image_provider: Arc<dyn ImageSearchProvider>,
    pub video_provider: Arc<dyn VideoSearchProvider>,
}

impl AppState {
    /// Wire the real third-party providers around one shared HTTP client.
    pub fn from_config(config: BioquestConfig) -> Result<Self, AppError> {
        let client = build_http_client(Duration::from_secs(config.upstream.timeout_secs))
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let chat_provider: Arc<dyn ChatProvider> =
            Arc::new(OpenAiChatProvider::new(client.clone(), &config.openai));
        let image_provider: Arc<dyn ImageSearchProvider> =
            Arc::new(UnsplashImageProvider::new(client.clone(), &config.unsplash));
        let video_provider: Arc<dyn VideoSearchProvider> =
            Arc::new(YoutubeVideoProvider::new(client, &config.youtube));

        tracing::info!(
            model = %config.openai.chat_model,
            timeout_secs = config.upstream.timeout_secs,
            history_limit = config.chat.history_limit,
            "Initialized upstream providers"
        );

        Ok(Self {
            config: Arc::new(config),
            chat_provider,
            image_provider,
            video_provider,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/image", get(image))
        .route("/video", get(video))
        .route("/chat", post(student_chat))
        .route("/teacher-chat", post(teacher_chat))
        .route("/quiz", post(generate_quiz))
        .layer(from_fn(metrics_middleware))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the real providers.
    pub async fn build(config: BioquestConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config)?;
        Self::build_with_state(state).await
    }

    /// Build around an existing state (port 0 = random port for testing).
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        let address = state.config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("BioQuest service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
