pub mod id;
pub mod lifecycle;
pub mod plugin;
pub mod time_uuid;

pub use id::{PluginId, TenantId};
pub use lifecycle::ComponentLifecycleState;
pub use plugin::PluginMetaData;
