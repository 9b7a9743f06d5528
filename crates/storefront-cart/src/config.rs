//! # Cart Configuration
//!
//! Where file-backed carts live and which slot key they use.
//!
//! ## Load Order (later overrides earlier)
//! 1. Defaults: key `"cart"`, `<platform data dir>/carts`
//! 2. Environment: `STOREFRONT_CART_KEY`, `STOREFRONT_CART_DIR`

use std::path::PathBuf;
use tracing::debug;

use storefront_core::CART_STORAGE_KEY;

use crate::error::{StorageError, StorageResult};
use crate::persistence::CartPersistence;
use crate::slot::FileSlots;
use crate::store::CartStore;

/// Cart storage settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Slot key the cart is stored under.
    pub storage_key: String,

    /// Directory for file-backed slots.
    pub data_dir: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            storage_key: CART_STORAGE_KEY.to_string(),
            data_dir: default_data_dir(),
        }
    }
}

impl CartConfig {
    /// Defaults plus environment overrides, validated.
    pub fn from_env() -> StorageResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StorageResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(StorageError::InvalidConfig(
                "storage_key must not be empty".into(),
            ));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(StorageError::InvalidConfig(
                "data_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("STOREFRONT_CART_KEY") {
            debug!(key = %key, "Overriding cart key from environment");
            self.storage_key = key;
        }

        if let Ok(dir) = std::env::var("STOREFRONT_CART_DIR") {
            debug!(dir = %dir, "Overriding cart directory from environment");
            self.data_dir = PathBuf::from(dir);
        }
    }

    /// File slots rooted at `data_dir`.
    pub fn file_slots(&self) -> FileSlots {
        FileSlots::new(&self.data_dir)
    }

    /// Opens the file-backed cart described by this config.
    pub fn open_file_store(&self) -> CartStore<CartPersistence<FileSlots>> {
        CartStore::open(CartPersistence::new(
            self.file_slots(),
            self.storage_key.clone(),
        ))
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.data_dir().join("carts"))
        .unwrap_or_else(|| PathBuf::from(".storefront").join("carts"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::LineItem;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "cart");
        assert!(config.data_dir.ends_with("carts"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let config = CartConfig {
            storage_key: "  ".to_string(),
            ..CartConfig::default()
        };
        assert!(matches!(config.validate(), Err(StorageError::InvalidConfig(_))));
    }

    #[test]
    fn test_open_file_store_persists() {
        let dir = std::env::temp_dir().join(format!("storefront-cart-config-{}", std::process::id()));
        let config = CartConfig {
            storage_key: "cart".to_string(),
            data_dir: dir.clone(),
        };
        let _ = std::fs::remove_dir_all(&dir);

        let mut cart = config.open_file_store();
        cart.add_item(LineItem::new(1, "Mug", "$10.00"));
        assert!(dir.join("cart.json").exists());

        let reopened = config.open_file_store();
        assert_eq!(reopened.total().cents(), 1000);

        let _ = std::fs::remove_dir_all(dir);
    }
}
