//! Persistence gateway: per-aggregate repository traits and MySQL implementations

pub mod category;
pub mod order;
pub mod product;
pub mod user;

pub use category::{CategoryRepository, CategoryRepositoryImpl};
pub use order::{NewOrderItem, OrderRepository, OrderRepositoryImpl};
pub use product::{ProductRepository, ProductRepositoryImpl};
pub use user::{UserRepository, UserRepositoryImpl};
