//! Price resolution
//!
//! Given a category, a service type and a weight, find the applicable price
//! rule — or accept a custom override amount for the "custom" service type.

mod resolver;

pub use resolver::{ResolvedPrice, ServiceType, resolve};
