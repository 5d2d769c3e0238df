// Application state module
// Owns the configuration and the in-memory entity stores

use tokio::sync::RwLock;

use super::types::Config;
use crate::store::{OrderStore, ProductStore};

/// Application state shared by every connection
///
/// The stores are process-lifetime and hold no persistence. Each one sits
/// behind its own `RwLock` so that read-modify-write sequences (the product
/// id scan in particular) stay atomic on a multi-threaded runtime.
pub struct AppState {
    pub config: Config,
    pub products: RwLock<ProductStore>,
    pub orders: RwLock<OrderStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            products: RwLock::new(ProductStore::new()),
            orders: RwLock::new(OrderStore::new()),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// Fresh state with a fixed configuration for handler tests
    pub fn for_tests() -> Self {
        use super::types::{HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

        Self::new(Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            http: HttpConfig {
                max_body_size: 10_485_760,
            },
        })
    }
}
