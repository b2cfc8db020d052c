use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::catalog::{ContentMutationService, ContentQueryExecutor, ListingDefaults, UploadCoordinator};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgContentStore, PgUserStore};
use crate::handlers::{self, protected, public};
use crate::middleware::identity_middleware;
use crate::services::UserService;
use crate::storage::R2ObjectStore;

/// Liveness of the backing database, as reported by `/health`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), String>;
}

#[async_trait]
impl HealthProbe for DatabaseManager {
    async fn ping(&self) -> Result<(), String> {
        self.health_check().await.map_err(|e| e.to_string())
    }
}

/// Everything a handler can reach. Cheap to clone; all members are shared.
#[derive(Clone)]
pub struct AppState {
    pub contents: ContentQueryExecutor,
    pub mutations: ContentMutationService,
    pub uploads: UploadCoordinator,
    pub users: UserService,
    pub listing_defaults: ListingDefaults,
    pub jwt_secret: Arc<str>,
    pub health: Arc<dyn HealthProbe>,
}

impl AppState {
    /// Wires the Postgres stores and the R2 bucket from configuration.
    pub async fn from_config(config: &AppConfig, database: DatabaseManager) -> Self {
        let contents = Arc::new(PgContentStore::new(database.pool().clone()));
        let users = Arc::new(PgUserStore::new(database.pool().clone()));
        let objects = Arc::new(R2ObjectStore::from_config(&config.storage).await);

        Self {
            contents: ContentQueryExecutor::new(contents.clone()),
            mutations: ContentMutationService::new(contents),
            uploads: UploadCoordinator::new(
                objects,
                config.storage.public_url.clone(),
                config.api.upload_temp_dir.clone(),
                config.storage.presign_expiry(),
            ),
            users: UserService::new(
                users,
                config.security.jwt_secret.clone(),
                config.security.jwt_expiry_hours,
            ),
            listing_defaults: config.listing.defaults(),
            jwt_secret: Arc::from(config.security.jwt_secret.as_str()),
            health: Arc::new(database),
        }
    }
}

/// Router-level settings that are not handler state.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub cors_origins: Vec<String>,
    pub max_request_size_bytes: usize,
}

impl ServerOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cors_origins: config.security.cors_origins.clone(),
            max_request_size_bytes: config.api.max_request_size_bytes,
        }
    }
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            cors_origins: vec![],
            max_request_size_bytes: 10 * 1024 * 1024,
        }
    }
}

pub fn app(state: AppState, options: &ServerOptions) -> Router {
    Router::new()
        // Public
        .route("/health", get(handlers::health))
        .merge(public_routes())
        // Protected
        .merge(content_routes())
        .merge(user_routes())
        // Global middleware
        .layer(from_fn_with_state(state.clone(), identity_middleware))
        .layer(DefaultBodyLimit::max(options.max_request_size_bytes))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(public::auth::login_post))
        .route("/api/fe/contents", get(public::content::list))
        .route("/api/fe/contents/:contentID", get(public::content::get))
}

fn content_routes() -> Router<AppState> {
    use protected::{content, upload};

    Router::new()
        .route("/api/admin/contents", get(content::list).post(content::create))
        .route("/api/admin/contents/upload-image", post(upload::upload_image))
        .route("/api/admin/contents/presign", post(upload::presign))
        .route(
            "/api/admin/contents/:contentID",
            get(content::get).put(content::update).delete(content::delete),
        )
        .route("/api/admin/contents/:contentID/image", post(upload::attach_image))
}

fn user_routes() -> Router<AppState> {
    use protected::user;

    Router::new()
        .route("/api/admin/users/profile", get(user::profile))
        .route("/api/admin/users/update-password", put(user::update_password))
}

/// Exact origins from configuration; a `*` entry allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(parsed)
}

/// Builds the full application from configuration and serves it until
/// Ctrl-C.
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let database = DatabaseManager::connect_lazy(&config.database)?;
    let state = AppState::from_config(config, database.clone()).await;
    let app = app(state, &ServerOptions::from_config(config));

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("newsdesk API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    database.close().await;
    Ok(())
}
