use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Where plugin rows live in the store.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Keyspace holding the platform tables. Default: "thingsboard".
    #[serde(default = "default_keyspace")]
    pub keyspace: String,
    /// Column family for plugin rows. Default: "plugin".
    #[serde(default = "default_plugin_column_family")]
    pub plugin_column_family: String,
}

fn default_keyspace() -> String {
    "thingsboard".into()
}
fn default_plugin_column_family() -> String {
    "plugin".into()
}

impl StoreConfig {
    /// Fully qualified plugin table name, e.g. `thingsboard.plugin`.
    pub fn plugin_table(&self) -> String {
        format!("{}.{}", self.keyspace, self.plugin_column_family)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            keyspace: default_keyspace(),
            plugin_column_family: default_plugin_column_family(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreAppConfig {
    #[serde(default)]
    pub store: StoreConfig,
}

impl StoreAppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("PLUGIN_DAO_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("store.keyspace", default_keyspace())?
            .set_default("store.plugin_column_family", default_plugin_column_family())?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., PLUGIN_DAO__STORE__KEYSPACE)
            .add_source(
                Environment::with_prefix("PLUGIN_DAO")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn load_falls_back_to_defaults() {
        let config = StoreAppConfig::load().unwrap();
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.store.plugin_table(), "thingsboard.plugin");
    }

    #[test]
    #[serial]
    fn environment_overrides_column_family() {
        // SAFETY: tests touching the environment are serialized.
        unsafe { std::env::set_var("PLUGIN_DAO__STORE__PLUGIN_COLUMN_FAMILY", "plugin_v2") };
        let config = StoreAppConfig::load();
        unsafe { std::env::remove_var("PLUGIN_DAO__STORE__PLUGIN_COLUMN_FAMILY") };

        let config = config.unwrap();
        assert_eq!(config.store.plugin_column_family, "plugin_v2");
        assert_eq!(config.store.keyspace, "thingsboard");
    }

    #[test]
    fn missing_fields_use_serde_defaults() {
        let config: StoreAppConfig = serde_json::from_str(r#"{"store":{"keyspace":"ks"}}"#).unwrap();
        assert_eq!(config.store.plugin_table(), "ks.plugin");
    }
}
