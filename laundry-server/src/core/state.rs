use std::sync::Arc;

use crate::core::{Config, Result, StoreBackend};
use crate::customers::CustomerService;
use crate::db::DbService;
use crate::notifications::NotificationEmitter;
use crate::orders::OrderManager;
use crate::printing::ReceiptRenderer;
use crate::reports::ReportAggregator;
use crate::settings::SettingsService;
use crate::store::{EntityStore, MemoryStore, SqliteStore};

/// Server state - the services every handler works through
///
/// Cheap to clone: services share one `Arc<dyn EntityStore>`.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | immutable configuration |
/// | customers | CustomerService | customer records |
/// | orders | Arc<OrderManager> | order lifecycle |
/// | notifications | NotificationEmitter | event notifications |
/// | reports | ReportAggregator | daily / period reports |
/// | settings | SettingsService | shop settings |
/// | receipts | ReceiptRenderer | plain-text receipts |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub customers: CustomerService,
    pub orders: Arc<OrderManager>,
    pub notifications: NotificationEmitter,
    pub reports: ReportAggregator,
    pub settings: SettingsService,
    pub receipts: ReceiptRenderer,
}

impl ServerState {
    /// Wire every service onto an existing store
    pub fn with_store(config: Config, store: Arc<dyn EntityStore>) -> Self {
        let notifications = NotificationEmitter::new(store.clone());
        let orders = OrderManager::new(store.clone(), Arc::new(notifications.clone()));
        Self {
            customers: CustomerService::new(store.clone()),
            orders: Arc::new(orders),
            notifications,
            reports: ReportAggregator::new(store.clone()),
            settings: SettingsService::new(store),
            receipts: ReceiptRenderer::new(config.receipt_width),
            config,
        }
    }

    /// Open the configured store and seed default settings
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store: Arc<dyn EntityStore> = match config.store_backend {
            StoreBackend::Sqlite => {
                let db = DbService::new(&config.database_path).await?;
                Arc::new(SqliteStore::new(db.pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on exit");
                Arc::new(MemoryStore::new())
            }
        };

        let state = Self::with_store(config.clone(), store);
        state.settings.seed_defaults().await?;
        Ok(state)
    }
}
