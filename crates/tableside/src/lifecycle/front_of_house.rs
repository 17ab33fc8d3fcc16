use crate::catalog::MenuCatalog;
use crate::config::ServiceConfig;
use crate::events::EventBus;
use crate::session::SessionCoordinator;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running service: both resource actors plus the coordinator that
/// fronts them.
///
/// ```ignore
/// let service = FrontOfHouse::new(ServiceConfig::from_env(), catalog);
/// let placed = service.coordinator.place_order(request).await?;
/// service.shutdown().await?;
/// ```
pub struct FrontOfHouse {
    pub coordinator: SessionCoordinator,
    handles: Vec<JoinHandle<()>>,
}

impl FrontOfHouse {
    /// Spawns the table and order actors on the current runtime.
    pub fn new(config: ServiceConfig, catalog: Arc<dyn MenuCatalog>) -> Self {
        info!(?config, "Starting front of house");

        let (table_actor, tables) = crate::table_actor::new(config.channel_capacity);
        let (order_actor, orders) = crate::order_actor::new(config.channel_capacity, catalog);

        let table_handle = tokio::spawn(table_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));

        let coordinator = SessionCoordinator::new(tables, orders, EventBus::new(config.event_capacity));

        Self {
            coordinator,
            handles: vec![table_handle, order_handle],
        }
    }

    /// Closes both actor channels and waits for the actors to finish.
    ///
    /// Clones of the coordinator keep the channels open; drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down front of house...");

        // Dropping the last client closes each actor's receiver.
        drop(self.coordinator);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Front of house shutdown complete.");
        Ok(())
    }
}
