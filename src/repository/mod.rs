//! Data access layer (Repository pattern)

pub mod order;
pub mod order_product;
pub mod product;
pub mod user;

pub use order::OrderRepository;
pub use order_product::OrderProductRepository;
pub use product::ProductRepository;
pub use user::UserRepository;
