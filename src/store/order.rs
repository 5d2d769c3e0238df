//! Order store
//!
//! Id-keyed in-memory map of order records. Unlike the product store, ids
//! are handed out by a monotonic counter starting at 1 and are never reused,
//! even after deletes. The two allocation policies are deliberately
//! different and both are part of the service contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An order record
///
/// `productid` is not checked against the product store; an order may
/// reference a product that does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Assigned by the store on creation; callers may omit it
    #[serde(default)]
    pub id: Option<i64>,
    pub productid: i64,
    pub count: i64,
    pub status: String,
}

/// In-memory order store keyed by id
#[derive(Debug)]
pub struct OrderStore {
    records: BTreeMap<i64, Order>,
    next_id: i64,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn get(&self, id: i64) -> Option<&Order> {
        self.records.get(&id)
    }

    /// Insert an order under the next id in sequence.
    pub fn create(&mut self, mut order: Order) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        order.id = Some(id);
        self.records.insert(id, order);
        id
    }

    /// Overwrite the record at `id`, stamping the id into it.
    ///
    /// Returns false when the id is absent; orders, unlike products, must
    /// exist before they can be updated.
    pub fn update(&mut self, id: i64, mut order: Order) -> bool {
        if !self.records.contains_key(&id) {
            return false;
        }
        order.id = Some(id);
        self.records.insert(id, order);
        true
    }

    pub fn remove(&mut self, id: i64) -> bool {
        self.records.remove(&id).is_some()
    }

    /// Filter orders by exact productid and exact status.
    ///
    /// Both filters AND together; a `None` filter matches everything.
    pub fn search(&self, productid: Option<i64>, status: Option<&str>) -> Vec<Order> {
        self.records
            .values()
            .filter(|order| {
                if let Some(productid) = productid {
                    if order.productid != productid {
                        return false;
                    }
                }
                if let Some(status) = status {
                    if order.status != status {
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

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}
