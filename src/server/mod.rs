//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::middleware::metrics::ObservabilityLayer;
use crate::repository::{
    CategoryRepositoryImpl, OrderRepositoryImpl, ProductRepositoryImpl, UserRepositoryImpl,
};
use crate::service::{CategoryService, OrderService, ProductService, UserService};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub product_service: Arc<ProductService<ProductRepositoryImpl>>,
    pub category_service: Arc<CategoryService<CategoryRepositoryImpl>>,
    pub order_service: Arc<OrderService<OrderRepositoryImpl, ProductRepositoryImpl>>,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
    pub jwt_manager: JwtManager,
    pub metrics_handle: Option<PrometheusHandle>,
}

/// Wire repositories and services into the shared state
pub fn build_state(
    config: Config,
    db_pool: MySqlPool,
    metrics_handle: Option<PrometheusHandle>,
) -> AppState {
    let product_repo = Arc::new(ProductRepositoryImpl::new(db_pool.clone()));
    let category_repo = Arc::new(CategoryRepositoryImpl::new(db_pool.clone()));
    let order_repo = Arc::new(OrderRepositoryImpl::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));

    let jwt_manager = JwtManager::new(config.jwt.clone());

    AppState {
        product_service: Arc::new(ProductService::new(product_repo.clone())),
        category_service: Arc::new(CategoryService::new(category_repo)),
        order_service: Arc::new(OrderService::new(order_repo, product_repo)),
        user_service: Arc::new(UserService::new(user_repo)),
        config: Arc::new(config),
        db_pool,
        jwt_manager,
        metrics_handle,
    }
}

/// Assemble the HTTP router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url(
            "/api-docs/openapi.json",
            crate::openapi::ApiDoc::openapi(),
        ))
        // System
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready))
        .route("/metrics", get(api::metrics::metrics_handler))
        // Catalog
        .route(
            "/products",
            get(api::product::list).post(api::product::create),
        )
        .route(
            "/products/{id}",
            get(api::product::get)
                .put(api::product::update)
                .delete(api::product::delete),
        )
        .route("/categories", get(api::category::list))
        // Orders
        .route("/orders", post(api::order::create))
        .route("/orders/{id}", get(api::order::get))
        // Users
        .route("/users/me", get(api::user::me))
        .layer(ObservabilityLayer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run(config: Config, metrics_handle: Option<PrometheusHandle>) -> Result<()> {
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let http_addr = config.http_addr();
    let state = build_state(config, db_pool, metrics_handle);
    let app = build_router(state);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
