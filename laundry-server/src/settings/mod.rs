//! Settings Service
//!
//! Key/value shop settings. `price_per_kg` is seeded once with its default.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DEFAULT_PRICE_PER_KG, PRICE_PER_KG, SettingUpdate, Settings};
use std::sync::Arc;

use crate::store::EntityStore;

#[derive(Debug, Clone)]
pub struct SettingsService {
    store: Arc<dyn EntityStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Insert default values that are not set yet
    pub async fn seed_defaults(&self) -> AppResult<()> {
        if self
            .store
            .insert_setting_if_absent(PRICE_PER_KG, DEFAULT_PRICE_PER_KG)
            .await?
        {
            tracing::info!(value = DEFAULT_PRICE_PER_KG, "Seeded default price_per_kg");
        }
        Ok(())
    }

    pub async fn all(&self) -> AppResult<Settings> {
        Ok(self.store.settings().await?)
    }

    /// Store a new default price; must be a non-negative number
    pub async fn set_price_per_kg(&self, update: SettingUpdate) -> AppResult<Settings> {
        let value = update
            .as_text()
            .ok_or_else(|| AppError::new(ErrorCode::SettingInvalidValue))?;

        let price: f64 = value.parse().map_err(|_| {
            AppError::with_message(ErrorCode::SettingInvalidValue, "value must be a number")
                .with_detail("value", value.clone())
        })?;
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::with_message(
                ErrorCode::SettingInvalidValue,
                "value must not be negative",
            )
            .with_detail("value", value));
        }

        self.store.put_setting(PRICE_PER_KG, &value).await?;
        tracing::info!(value = %value, "price_per_kg updated");
        self.all().await
    }
}
