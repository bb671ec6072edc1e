//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::middleware::{require_auth, AuthMiddlewareState};
use crate::repository::{
    order::OrderRepositoryImpl, order_product::OrderProductRepositoryImpl,
    product::ProductRepositoryImpl, user::UserRepositoryImpl,
};
use crate::service::{AuthService, OrderService, ProductService, UserService};
use crate::state::HasServices;
use crate::token::TokenManager;
use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
    pub product_service: Arc<ProductService<ProductRepositoryImpl>>,
    pub auth_service: Arc<AuthService<UserRepositoryImpl>>,
    pub order_service:
        Arc<OrderService<OrderRepositoryImpl, OrderProductRepositoryImpl, ProductRepositoryImpl>>,
    pub token_manager: TokenManager,
}

impl AppState {
    pub fn new(config: Config, db_pool: MySqlPool) -> Self {
        let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));
        let product_repo = Arc::new(ProductRepositoryImpl::new(db_pool.clone()));
        let order_repo = Arc::new(OrderRepositoryImpl::new(db_pool.clone()));
        let order_product_repo = Arc::new(OrderProductRepositoryImpl::new(db_pool.clone()));

        let token_manager = TokenManager::new(config.jwt.clone());

        let user_service = Arc::new(UserService::new(user_repo.clone()));
        let product_service = Arc::new(ProductService::new(product_repo.clone()));
        let auth_service = Arc::new(AuthService::new(user_repo, token_manager.clone()));
        let order_service = Arc::new(OrderService::new(
            order_repo,
            order_product_repo,
            product_repo,
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            user_service,
            product_service,
            auth_service,
            order_service,
            token_manager,
        }
    }
}

impl HasServices for AppState {
    type UserRepo = UserRepositoryImpl;
    type ProductRepo = ProductRepositoryImpl;
    type OrderRepo = OrderRepositoryImpl;
    type OrderProductRepo = OrderProductRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn token_manager(&self) -> &TokenManager {
        &self.token_manager
    }

    fn user_service(&self) -> &UserService<Self::UserRepo> {
        &self.user_service
    }

    fn product_service(&self) -> &ProductService<Self::ProductRepo> {
        &self.product_service
    }

    fn auth_service(&self) -> &AuthService<Self::UserRepo> {
        &self.auth_service
    }

    fn order_service(
        &self,
    ) -> &OrderService<Self::OrderRepo, Self::OrderProductRepo, Self::ProductRepo> {
        &self.order_service
    }

    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send {
        let pool = self.db_pool.clone();
        async move { sqlx::query("SELECT 1").execute(&pool).await.is_ok() }
    }
}

/// Build the application router.
///
/// Everything except registration, login and the health probes sits behind
/// the bearer-token guard, applied once to the protected group.
pub fn build_router<S: HasServices>(state: S) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_state = AuthMiddlewareState::new(state.token_manager().clone());

    let protected = Router::new()
        // User endpoints
        .route("/users", get(api::user::list::<S>))
        .route(
            "/users/{id}",
            get(api::user::get::<S>)
                .put(api::user::update::<S>)
                .delete(api::user::delete::<S>),
        )
        // Product endpoints
        .route(
            "/products",
            get(api::product::list::<S>).post(api::product::create::<S>),
        )
        .route(
            "/products/{id}",
            get(api::product::get::<S>)
                .put(api::product::update::<S>)
                .delete(api::product::delete::<S>),
        )
        // Order endpoints
        .route("/orders", post(api::order::create::<S>))
        .route(
            "/orders/{order_id}/add_product/{product_id}",
            put(api::order::add_product::<S>),
        )
        .route(
            "/orders/{order_id}/remove_product/{product_id}",
            delete(api::order::remove_product::<S>),
        )
        .route("/orders/user/{user_id}", get(api::order::by_user::<S>))
        .route(
            "/orders/user/{user_id}/latest",
            get(api::order::latest::<S>),
        )
        .route(
            "/orders/{order_id}/products",
            get(api::order::products::<S>),
        )
        .route("/orders/{order_id}/total", get(api::order::total::<S>))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            require_auth,
        ));

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Public endpoints
        .route("/users", post(api::user::register::<S>))
        .route("/login", post(api::auth::login::<S>))
        .merge(protected)
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Create database connection pool
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let addr = config.http_addr();
    let state = AppState::new(config, db_pool);
    let app = build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
