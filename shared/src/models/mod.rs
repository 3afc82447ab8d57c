//! Entity models
//!
//! Each entity comes as a triple: the persisted entity, a `*Create` payload,
//! and a `*Update` payload of optional fields (a field is applied iff the
//! caller sent it). sqlx `FromRow` derives are gated behind the `db` feature.

pub mod category;
pub mod client;
pub mod order;
pub mod price;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use client::{Client, ClientCreate, ClientUpdate};
pub use order::{
    IntegratedOrderCreate, IntegratedOrderResponse, Order, OrderCreate, OrderStatus, OrderUpdate,
    OrderWithDetails,
};
pub use price::{Price, PriceCreate, PriceUpdate, PriceWithCategory};
