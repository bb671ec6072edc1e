//! Shared test harness
//!
//! In-memory repository implementations and a mock application state, so
//! API handlers run end-to-end through the real router without a database.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use shop_core::config::{Config, DatabaseConfig, JwtConfig};
use shop_core::domain::{NewUser, Order, Product, ProductInput, UpdateUserInput, User};
use shop_core::error::{AppError, Result};
use shop_core::repository::{
    OrderProductRepository, OrderRepository, ProductRepository, UserRepository,
};
use shop_core::server::build_router;
use shop_core::service::{AuthService, OrderService, ProductService, UserService};
use shop_core::state::HasServices;
use shop_core::token::TokenManager;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

// ============================================================================
// Test configuration
// ============================================================================

pub fn test_config() -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 0,
        database: DatabaseConfig {
            url: "mysql://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test-secret-key-for-api-testing-purposes".to_string(),
            access_token_ttl_secs: 3600,
        },
    }
}

// ============================================================================
// In-memory repositories
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: RwLock<BTreeMap<i64, User>>,
    next_id: AtomicI64,
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn create(&self, input: &NewUser) -> Result<User> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            name: input.name.clone(),
            address: input.address.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
        };
        self.users.write().await.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.users.read().await.len() as i64)
    }

    async fn update(&self, id: i64, input: &UpdateUserInput) -> Result<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
        user.name = input.name.clone();
        user.address = input.address.clone();
        user.email = input.email.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}

#[derive(Default)]
pub struct InMemoryProductRepo {
    products: RwLock<BTreeMap<i64, Product>>,
    next_id: AtomicI64,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepo {
    async fn create(&self, input: &ProductInput) -> Result<Product> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product {
            id,
            product_name: input.product_name.clone(),
            price: input.price,
        };
        self.products.write().await.insert(id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>> {
        let wanted: BTreeSet<i64> = ids.iter().copied().collect();
        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|p| wanted.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.products.read().await.len() as i64)
    }

    async fn update(&self, id: i64, input: &ProductInput) -> Result<Product> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;
        product.product_name = input.product_name.clone();
        product.price = input.price;
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.products
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepo {
    orders: RwLock<BTreeMap<i64, Order>>,
    next_id: AtomicI64,
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepo {
    async fn create(&self, user_id: i64, order_date: DateTime<Utc>) -> Result<Order> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let order = Order {
            id,
            order_date,
            user_id,
        };
        self.orders.write().await.insert(id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn latest_for_user(&self, user_id: i64) -> Result<Option<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.user_id == user_id)
            .max_by_key(|o| (o.order_date, o.id))
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryOrderProductRepo {
    pairs: RwLock<BTreeSet<(i64, i64)>>,
}

#[async_trait]
impl OrderProductRepository for InMemoryOrderProductRepo {
    async fn add(&self, order_id: i64, product_id: i64) -> Result<()> {
        self.pairs.write().await.insert((order_id, product_id));
        Ok(())
    }

    async fn remove(&self, order_id: i64, product_id: i64) -> Result<()> {
        if !self.pairs.write().await.remove(&(order_id, product_id)) {
            return Err(AppError::NotFound(format!(
                "Product {} is not in order {}",
                product_id, order_id
            )));
        }
        Ok(())
    }

    async fn list_product_ids(&self, order_id: i64) -> Result<Vec<i64>> {
        Ok(self
            .pairs
            .read()
            .await
            .iter()
            .filter(|(o, _)| *o == order_id)
            .map(|(_, p)| *p)
            .collect())
    }
}

// ============================================================================
// Mock application state
// ============================================================================

#[derive(Clone)]
pub struct TestState {
    config: Arc<Config>,
    token_manager: TokenManager,
    user_service: Arc<UserService<InMemoryUserRepo>>,
    product_service: Arc<ProductService<InMemoryProductRepo>>,
    auth_service: Arc<AuthService<InMemoryUserRepo>>,
    order_service:
        Arc<OrderService<InMemoryOrderRepo, InMemoryOrderProductRepo, InMemoryProductRepo>>,
}

impl TestState {
    pub fn new() -> Self {
        let config = test_config();
        let token_manager = TokenManager::new(config.jwt.clone());

        let user_repo = Arc::new(InMemoryUserRepo::default());
        let product_repo = Arc::new(InMemoryProductRepo::default());
        let order_repo = Arc::new(InMemoryOrderRepo::default());
        let ledger = Arc::new(InMemoryOrderProductRepo::default());

        Self {
            config: Arc::new(config),
            token_manager: token_manager.clone(),
            user_service: Arc::new(UserService::new(user_repo.clone())),
            product_service: Arc::new(ProductService::new(product_repo.clone())),
            auth_service: Arc::new(AuthService::new(user_repo, token_manager)),
            order_service: Arc::new(OrderService::new(order_repo, ledger, product_repo)),
        }
    }
}

impl HasServices for TestState {
    type UserRepo = InMemoryUserRepo;
    type ProductRepo = InMemoryProductRepo;
    type OrderRepo = InMemoryOrderRepo;
    type OrderProductRepo = InMemoryOrderProductRepo;

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
        async { true }
    }
}

// ============================================================================
// Request helpers
// ============================================================================

/// Build the application router over a fresh in-memory state
pub fn test_app() -> (Router, TestState) {
    let state = TestState::new();
    (build_router(state.clone()), state)
}

/// Bearer token accepted by the auth guard (the subject need not exist;
/// token verification is stateless)
pub fn auth_token(state: &TestState) -> String {
    state.token_manager().issue(1).unwrap()
}

/// Send a request and return (status, parsed JSON body).
/// Empty bodies come back as `Value::Null`.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}
