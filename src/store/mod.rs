// Store module entry point
// In-memory id-keyed record stores, one per entity type

mod order;
mod product;

pub use order::{Order, OrderStore};
pub use product::{Product, ProductStore};
