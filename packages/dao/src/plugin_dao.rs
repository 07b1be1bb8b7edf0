use std::sync::Arc;

use common::{PluginId, PluginMetaData, TenantId, time_uuid};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::entity::PluginMetaDataEntity;
use crate::error::DaoError;
use crate::store::RowStore;

/// Reads and writes plugins through a [`RowStore`].
#[derive(Clone)]
pub struct PluginMetaDataDao {
    store: Arc<dyn RowStore>,
    table: String,
}

impl PluginMetaDataDao {
    pub fn new(store: Arc<dyn RowStore>, config: &StoreConfig) -> Self {
        Self {
            store,
            table: config.plugin_table(),
        }
    }

    /// Writes the full row for `plugin`, minting an id if it has none, and
    /// returns the plugin as it reads back.
    pub async fn save(&self, plugin: &PluginMetaData) -> Result<PluginMetaData, DaoError> {
        let mut entity = PluginMetaDataEntity::from_domain(plugin)?;
        let id = match entity.id {
            Some(id) => id,
            None => {
                let id = time_uuid::now();
                entity.id = Some(id);
                info!(id = %id, tenant_id = %entity.tenant_id, "Assigned id to new plugin");
                id
            }
        };

        let columns = entity.to_columns()?;
        self.store
            .put(&self.table, id, entity.tenant_id, columns)
            .await?;
        debug!(table = %self.table, row = %entity, "Stored plugin row");

        entity.to_domain()
    }

    pub async fn find_by_id(
        &self,
        tenant_id: TenantId,
        plugin_id: PluginId,
    ) -> Result<Option<PluginMetaData>, DaoError> {
        let Some(columns) = self
            .store
            .get(&self.table, plugin_id.id(), tenant_id.id())
            .await?
        else {
            return Ok(None);
        };

        PluginMetaDataEntity::from_columns(&columns)?
            .to_domain()
            .map(Some)
    }
}
