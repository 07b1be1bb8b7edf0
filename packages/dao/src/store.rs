use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::entity::plugin::ColumnMap;
use crate::error::DaoError;

/// Row-level access to a wide-column store.
///
/// Rows are addressed by table, partition key and clustering key. A `put`
/// replaces the whole row.
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn put(
        &self,
        table: &str,
        partition: Uuid,
        clustering: Uuid,
        row: ColumnMap,
    ) -> Result<(), DaoError>;

    async fn get(
        &self,
        table: &str,
        partition: Uuid,
        clustering: Uuid,
    ) -> Result<Option<ColumnMap>, DaoError>;
}

/// Process-local [`RowStore`].
#[derive(Debug, Default)]
pub struct InMemoryRowStore {
    rows: DashMap<(String, Uuid, Uuid), ColumnMap>,
}

impl InMemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn put(
        &self,
        table: &str,
        partition: Uuid,
        clustering: Uuid,
        row: ColumnMap,
    ) -> Result<(), DaoError> {
        self.rows.insert((table.to_string(), partition, clustering), row);
        Ok(())
    }

    async fn get(
        &self,
        table: &str,
        partition: Uuid,
        clustering: Uuid,
    ) -> Result<Option<ColumnMap>, DaoError> {
        Ok(self
            .rows
            .get(&(table.to_string(), partition, clustering))
            .map(|row| row.value().clone()))
    }
}
