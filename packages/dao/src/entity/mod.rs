pub mod plugin;

pub use plugin::{PluginMetaDataEntity, row_equals, row_hash, row_to_string};
