use serde::{Deserialize, Serialize};

use crate::id::{PluginId, TenantId};
use crate::lifecycle::ComponentLifecycleState;

/// A tenant-scoped plugin registration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMetaData {
    /// `None` until the plugin is first persisted.
    pub id: Option<PluginId>,
    /// Milliseconds since the Unix epoch. Always the instant embedded in `id`
    /// for plugins that were read back from storage.
    pub created_time: i64,
    pub tenant_id: Option<TenantId>,
    /// External credential used to address the plugin's endpoints.
    pub api_token: String,
    pub name: String,
    /// Fully qualified name of the implementation to instantiate.
    pub clazz: String,
    pub public_access: bool,
    pub state: ComponentLifecycleState,
    /// Implementation-specific configuration. `Null` when unset.
    pub configuration: serde_json::Value,
    /// Free-form metadata. `Null` when unset.
    pub additional_info: serde_json::Value,
}

impl PluginMetaData {
    pub fn new(id: PluginId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn new_plugin_is_suspended_without_configuration() {
        let plugin = PluginMetaData::new(PluginId::new(Uuid::from_u128(7)));
        assert_eq!(plugin.state, ComponentLifecycleState::Suspended);
        assert!(plugin.configuration.is_null());
        assert!(plugin.tenant_id.is_none());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let plugin = PluginMetaData {
            api_token: "tok-1".into(),
            public_access: true,
            ..PluginMetaData::default()
        };
        let value = serde_json::to_value(&plugin).unwrap();
        assert_eq!(value["apiToken"], json!("tok-1"));
        assert_eq!(value["publicAccess"], json!(true));
        assert_eq!(value["state"], json!("SUSPENDED"));
    }
}
