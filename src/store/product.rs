//! Product store
//!
//! Id-keyed in-memory map of product records. Freed ids are reused: creation
//! always assigns the lowest non-negative integer not currently taken.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A catalog product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned by the store on creation; callers may omit it
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub r#type: String,
    pub inventory: i64,
    pub cost: f64,
}

/// In-memory product store keyed by id
#[derive(Debug, Default)]
pub struct ProductStore {
    records: BTreeMap<i64, Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i64) -> Option<&Product> {
        self.records.get(&id)
    }

    /// Insert a product under the lowest unused non-negative id.
    ///
    /// Scans upward from 0, so ids freed by deletes are handed out again.
    /// Callers must hold the store's write lock across the whole call so the
    /// scan and the insert are atomic.
    pub fn create(&mut self, mut product: Product) -> i64 {
        let mut id = 0;
        while self.records.contains_key(&id) {
            id += 1;
        }
        product.id = Some(id);
        self.records.insert(id, product);
        id
    }

    /// Insert or overwrite the record at `id`, stamping the id into it.
    ///
    /// There is no existence check: updating an id that was never created
    /// simply creates it.
    pub fn upsert(&mut self, id: i64, mut product: Product) {
        product.id = Some(id);
        self.records.insert(id, product);
    }

    pub fn remove(&mut self, id: i64) -> Option<Product> {
        self.records.remove(&id)
    }

    /// Filter products by name substring (case-sensitive) and exact type.
    ///
    /// Both filters AND together; a `None` filter matches everything.
    pub fn search(&self, name: Option<&str>, r#type: Option<&str>) -> Vec<Product> {
        self.records
            .values()
            .filter(|product| {
                if let Some(name) = name {
                    if !product.name.contains(name) {
                        return false;
                    }
                }
                if let Some(r#type) = r#type {
                    if product.r#type != r#type {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
