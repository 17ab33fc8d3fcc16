//! # Table Client
//!
//! High-level API for the table lease registry. Wraps a
//! `ResourceClient<Table>` and unwraps action results into plain values.

use crate::model::{OrderId, OutletId, Reservation, SessionEpoch, Table, TableCreate, TableId, TableQuery, TableUpdate};
use crate::table_actor::{Claim, TableAction, TableActionResult, TableError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct TableClient {
    inner: ResourceClient<Table>,
}

#[async_trait]
impl ActorClient<Table> for TableClient {
    type Error = TableError;

    fn inner(&self) -> &ResourceClient<Table> {
        &self.inner
    }

    fn map_error(e: FrameworkError<TableError>) -> TableError {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => TableError::NotFound(id),
            FrameworkError::Conflict(key) => TableError::DuplicateLabel(key),
            other => TableError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(result: TableActionResult) -> TableError {
    TableError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

impl TableClient {
    pub fn new(inner: ResourceClient<Table>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_table(&self, params: TableCreate) -> Result<TableId, TableError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_table(&self, id: TableId, update: TableUpdate) -> Result<Table, TableError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_table(&self, id: TableId) -> Result<(), TableError> {
        self.inner.delete(id).await.map_err(Self::map_error)
    }

    pub async fn tables_for_outlet(&self, outlet_id: OutletId) -> Result<Vec<Table>, TableError> {
        let mut tables = self.list(TableQuery::Outlet(outlet_id)).await?;
        tables.sort_by_key(|t| t.id);
        Ok(tables)
    }

    /// Lease the table unless it already is; fails if it belongs to another outlet.
    #[instrument(skip(self))]
    pub async fn try_claim(&self, id: TableId, outlet_id: OutletId) -> Result<Claim, TableError> {
        match self
            .inner
            .perform_action(id, TableAction::TryClaim { outlet_id })
            .await
            .map_err(Self::map_error)?
        {
            TableActionResult::TryClaim(claim) => Ok(claim),
            other => Err(unexpected(other)),
        }
    }

    /// Returns the table as it is after the release, carrying the new epoch.
    #[instrument(skip(self))]
    pub async fn release(&self, id: TableId) -> Result<Table, TableError> {
        match self
            .inner
            .perform_action(id, TableAction::Release)
            .await
            .map_err(Self::map_error)?
        {
            TableActionResult::Release(table) => Ok(table),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn reserve(&self, id: TableId, reservation: Reservation) -> Result<Table, TableError> {
        match self
            .inner
            .perform_action(id, TableAction::Reserve(reservation))
            .await
            .map_err(Self::map_error)?
        {
            TableActionResult::Reserve(table) => Ok(table),
            other => Err(unexpected(other)),
        }
    }

    /// `Ok(false)` if the table's epoch is no longer `epoch`.
    #[instrument(skip(self))]
    pub async fn set_active_order(
        &self,
        id: TableId,
        order_id: OrderId,
        epoch: SessionEpoch,
    ) -> Result<bool, TableError> {
        match self
            .inner
            .perform_action(id, TableAction::SetActiveOrder { order_id, epoch })
            .await
            .map_err(Self::map_error)?
        {
            TableActionResult::SetActiveOrder(set) => Ok(set),
            other => Err(unexpected(other)),
        }
    }

    /// Undo a fresh claim. `Ok(false)` if the table moved on in the meantime.
    #[instrument(skip(self))]
    pub async fn unclaim(&self, id: TableId, epoch: SessionEpoch) -> Result<bool, TableError> {
        match self
            .inner
            .perform_action(id, TableAction::Unclaim { epoch })
            .await
            .map_err(Self::map_error)?
        {
            TableActionResult::Unclaim(undone) => Ok(undone),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action, expect_create, expect_list};

    #[tokio::test]
    async fn test_try_claim_sends_outlet_and_returns_claim() {
        let (client, mut receiver) = create_mock_client::<Table>(10);
        let table_client = TableClient::new(client);

        let claim_task = tokio::spawn(async move {
            table_client
                .try_claim(TableId(4), OutletId::from("outlet-1"))
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, TableId(4));
        match action {
            TableAction::TryClaim { outlet_id } => assert_eq!(outlet_id, OutletId::from("outlet-1")),
            _ => panic!("Expected TryClaim action"),
        }

        let epoch = SessionEpoch::mint();
        let claim = Claim {
            epoch,
            fresh: true,
            active_order_id: None,
        };
        responder
            .send(Ok(TableActionResult::TryClaim(claim)))
            .unwrap();

        assert_eq!(claim_task.await.unwrap().unwrap(), claim);
    }

    #[tokio::test]
    async fn test_release_unknown_table_maps_not_found() {
        let (client, mut receiver) = create_mock_client::<Table>(10);
        let table_client = TableClient::new(client);

        let release_task = tokio::spawn(async move { table_client.release(TableId(9)).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(action, TableAction::Release));
        responder
            .send(Err(FrameworkError::NotFound("table_9".into())))
            .unwrap();

        assert_eq!(
            release_task.await.unwrap(),
            Err(TableError::NotFound("table_9".into()))
        );
    }

    #[tokio::test]
    async fn test_mismatched_result_is_an_error_not_a_panic() {
        let (client, mut receiver) = create_mock_client::<Table>(10);
        let table_client = TableClient::new(client);

        let task = tokio::spawn(async move {
            table_client
                .set_active_order(TableId(1), OrderId(1), SessionEpoch::mint())
                .await
        });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Ok(TableActionResult::TryClaim(Claim {
                epoch: SessionEpoch::mint(),
                fresh: false,
                active_order_id: None,
            })))
            .unwrap();
        assert!(matches!(
            task.await.unwrap(),
            Err(TableError::ActorCommunicationError(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_label_maps_from_conflict() {
        let (client, mut receiver) = create_mock_client::<Table>(10);
        let table_client = TableClient::new(client);

        let create_task = tokio::spawn(async move {
            table_client
                .create_table(TableCreate {
                    outlet_id: OutletId::from("outlet-1"),
                    label: "T1".into(),
                    capacity: 2,
                    floor: None,
                    shape: None,
                })
                .await
        });

        let (params, responder) = expect_create(&mut receiver).await.unwrap();
        assert_eq!(params.label, "T1");
        responder
            .send(Err(FrameworkError::Conflict("outlet-1/t1".into())))
            .unwrap();

        assert_eq!(
            create_task.await.unwrap(),
            Err(TableError::DuplicateLabel("outlet-1/t1".into()))
        );
    }

    #[tokio::test]
    async fn test_tables_for_outlet_are_sorted() {
        let (client, mut receiver) = create_mock_client::<Table>(10);
        let table_client = TableClient::new(client);
        let outlet = OutletId::from("outlet-1");

        let list_task = {
            let outlet = outlet.clone();
            tokio::spawn(async move { table_client.tables_for_outlet(outlet).await })
        };

        let (query, responder) = expect_list(&mut receiver).await.unwrap();
        assert!(matches!(&query, TableQuery::Outlet(o) if *o == outlet));
        responder
            .send(Ok(vec![
                Table::new(TableId(2), outlet.clone(), "T2".into(), 2),
                Table::new(TableId(1), outlet.clone(), "T1".into(), 2),
            ]))
            .unwrap();

        let ids: Vec<TableId> = list_task
            .await
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![TableId(1), TableId(2)]);
    }
}
