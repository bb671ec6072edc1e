//! Application state trait for dependency injection
//!
//! Handlers are generic over this trait so the same code serves both the
//! production `AppState` (MySQL-backed repositories) and test states built
//! on in-memory repositories.

use crate::config::Config;
use crate::repository::{
    OrderProductRepository, OrderRepository, ProductRepository, UserRepository,
};
use crate::service::{AuthService, OrderService, ProductService, UserService};
use crate::token::TokenManager;

pub trait HasServices: Clone + Send + Sync + 'static {
    /// The user repository type
    type UserRepo: UserRepository;
    /// The product repository type
    type ProductRepo: ProductRepository;
    /// The order repository type
    type OrderRepo: OrderRepository;
    /// The order-product association repository type
    type OrderProductRepo: OrderProductRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the token manager
    fn token_manager(&self) -> &TokenManager;

    /// Get the user service
    fn user_service(&self) -> &UserService<Self::UserRepo>;

    /// Get the product service
    fn product_service(&self) -> &ProductService<Self::ProductRepo>;

    /// Get the auth service
    fn auth_service(&self) -> &AuthService<Self::UserRepo>;

    /// Get the order service
    fn order_service(
        &self,
    ) -> &OrderService<Self::OrderRepo, Self::OrderProductRepo, Self::ProductRepo>;

    /// Check if the backing store is reachable
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
