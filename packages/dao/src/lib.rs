//! Mapping between [`common::PluginMetaData`] and its row in the plugin column family.

pub mod codec;
pub mod config;
pub mod entity;
pub mod error;
pub mod plugin_dao;
pub mod schema;
pub mod store;

pub use codec::{ColumnCodec, ColumnValue, EnumCodec, JsonCodec, NativeType, StoredEnum};
pub use config::{StoreAppConfig, StoreConfig};
pub use entity::plugin::ColumnMap;
pub use entity::{PluginMetaDataEntity, row_equals, row_hash, row_to_string};
pub use error::{CodecError, DaoError, RowRef};
pub use plugin_dao::PluginMetaDataDao;
pub use store::{InMemoryRowStore, RowStore};
