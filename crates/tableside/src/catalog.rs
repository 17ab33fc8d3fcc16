//! # Menu Catalog Gateway
//!
//! The menu lives outside this service. [`MenuCatalog`] is the seam through
//! which the order client resolves a catalog reference into a name, a base
//! price and any outlet-specific configuration at the moment an order is
//! placed. [`InMemoryCatalog`] backs the demo binary and the tests.

use crate::model::{CatalogRef, OutletId};
use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// A catalog item as seen from one outlet.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub name: String,
    pub base_price: Decimal,
    /// Outlet-specific price override, if configured.
    pub outlet_price: Option<Decimal>,
    pub available: bool,
}

impl CatalogItem {
    pub fn effective_price(&self) -> Decimal {
        self.outlet_price.unwrap_or(self.base_price)
    }
}

#[async_trait]
pub trait MenuCatalog: Send + Sync {
    /// `Ok(None)` if the reference is unknown.
    async fn lookup(
        &self,
        outlet_id: &OutletId,
        catalog_ref: &CatalogRef,
    ) -> Result<Option<CatalogItem>, CatalogError>;
}

#[derive(Debug, Clone)]
struct MenuEntry {
    name: String,
    base_price: Decimal,
}

#[derive(Debug, Clone)]
struct OutletItemConfig {
    custom_price: Option<Decimal>,
    available: bool,
}

impl Default for OutletItemConfig {
    fn default() -> Self {
        Self {
            custom_price: None,
            available: true,
        }
    }
}

/// Thread-safe in-memory catalog.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: DashMap<CatalogRef, MenuEntry>,
    outlet_configs: DashMap<(OutletId, CatalogRef), OutletItemConfig>,
    offline: AtomicBool,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&self, catalog_ref: impl Into<CatalogRef>, name: impl Into<String>, base_price: Decimal) {
        self.items.insert(
            catalog_ref.into(),
            MenuEntry {
                name: name.into(),
                base_price,
            },
        );
    }

    /// Changes the base price. Orders placed earlier keep their snapshot.
    pub fn set_base_price(&self, catalog_ref: &CatalogRef, base_price: Decimal) {
        if let Some(mut entry) = self.items.get_mut(catalog_ref) {
            entry.base_price = base_price;
        }
    }

    pub fn set_outlet_price(&self, outlet_id: &OutletId, catalog_ref: &CatalogRef, price: Option<Decimal>) {
        self.outlet_configs
            .entry((outlet_id.clone(), catalog_ref.clone()))
            .or_default()
            .custom_price = price;
    }

    pub fn set_available(&self, outlet_id: &OutletId, catalog_ref: &CatalogRef, available: bool) {
        self.outlet_configs
            .entry((outlet_id.clone(), catalog_ref.clone()))
            .or_default()
            .available = available;
    }

    /// Makes every lookup fail, to simulate the backing store going away.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl MenuCatalog for InMemoryCatalog {
    async fn lookup(
        &self,
        outlet_id: &OutletId,
        catalog_ref: &CatalogRef,
    ) -> Result<Option<CatalogItem>, CatalogError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("in-memory catalog is offline".into()));
        }
        let Some(entry) = self.items.get(catalog_ref).map(|e| e.value().clone()) else {
            return Ok(None);
        };
        let config = self
            .outlet_configs
            .get(&(outlet_id.clone(), catalog_ref.clone()))
            .map(|c| c.value().clone())
            .unwrap_or_default();

        Ok(Some(CatalogItem {
            name: entry.name,
            base_price: entry.base_price,
            outlet_price: config.custom_price,
            available: config.available,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outlet_override_and_fallback() {
        let catalog = InMemoryCatalog::new();
        let soup = CatalogRef::from("soup");
        catalog.add_item("soup", "Tom Yum", Decimal::new(800, 2));
        catalog.set_outlet_price(&OutletId::from("airport"), &soup, Some(Decimal::new(1100, 2)));

        let airport = catalog.lookup(&OutletId::from("airport"), &soup).await.unwrap().unwrap();
        let downtown = catalog.lookup(&OutletId::from("downtown"), &soup).await.unwrap().unwrap();

        assert_eq!(airport.effective_price(), Decimal::new(1100, 2));
        assert_eq!(downtown.effective_price(), Decimal::new(800, 2));
    }

    #[tokio::test]
    async fn test_unknown_and_offline() {
        let catalog = InMemoryCatalog::new();
        let outlet = OutletId::from("downtown");
        assert_eq!(catalog.lookup(&outlet, &CatalogRef::from("nope")).await, Ok(None));

        catalog.set_offline(true);
        assert!(catalog.lookup(&outlet, &CatalogRef::from("nope")).await.is_err());
    }

    #[tokio::test]
    async fn test_availability_is_per_outlet() {
        let catalog = InMemoryCatalog::new();
        let crab = CatalogRef::from("crab");
        catalog.add_item("crab", "Chilli Crab", Decimal::new(4800, 2));
        catalog.set_available(&OutletId::from("downtown"), &crab, false);

        let downtown = catalog.lookup(&OutletId::from("downtown"), &crab).await.unwrap().unwrap();
        let airport = catalog.lookup(&OutletId::from("airport"), &crab).await.unwrap().unwrap();
        assert!(!downtown.available);
        assert!(airport.available);
    }
}
