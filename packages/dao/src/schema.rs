//! Column layout of the plugin column family.
//!
//! Column names are shared with every store client and with the search index,
//! so they must not change.

use crate::codec::{ColumnCodec, NativeType};

pub const ID_PROPERTY: &str = "id";
pub const PLUGIN_API_TOKEN_PROPERTY: &str = "api_token";
pub const PLUGIN_TENANT_ID_PROPERTY: &str = "tenant_id";
pub const PLUGIN_NAME_PROPERTY: &str = "name";
pub const PLUGIN_CLASS_PROPERTY: &str = "class_ref";
pub const PLUGIN_ACCESS_PROPERTY: &str = "public_access";
pub const PLUGIN_STATE_PROPERTY: &str = "state";
pub const PLUGIN_CONFIGURATION_PROPERTY: &str = "configuration";
pub const SEARCH_TEXT_PROPERTY: &str = "search_text";
pub const ADDITIONAL_INFO_PROPERTY: &str = "additional_info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnRole {
    /// Determines which partition the row lives in.
    PartitionKey,
    /// Orders rows within a partition.
    ClusteringKey,
    Regular,
}

impl ColumnRole {
    pub fn is_key(&self) -> bool {
        !matches!(self, Self::Regular)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub role: ColumnRole,
    pub codec: ColumnCodec,
    /// Whether the store may hold no value for this column.
    pub nullable: bool,
}

impl ColumnDef {
    const fn new(name: &'static str, role: ColumnRole, codec: ColumnCodec) -> Self {
        Self {
            name,
            role,
            codec,
            nullable: false,
        }
    }

    const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Plugin columns, in rendering order.
pub const PLUGIN_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new(
        ID_PROPERTY,
        ColumnRole::PartitionKey,
        ColumnCodec::Identity(NativeType::Uuid),
    ),
    ColumnDef::new(
        PLUGIN_API_TOKEN_PROPERTY,
        ColumnRole::Regular,
        ColumnCodec::Identity(NativeType::Text),
    ),
    ColumnDef::new(
        PLUGIN_TENANT_ID_PROPERTY,
        ColumnRole::ClusteringKey,
        ColumnCodec::Identity(NativeType::Uuid),
    ),
    ColumnDef::new(
        PLUGIN_NAME_PROPERTY,
        ColumnRole::Regular,
        ColumnCodec::Identity(NativeType::Text),
    ),
    ColumnDef::new(
        PLUGIN_CLASS_PROPERTY,
        ColumnRole::Regular,
        ColumnCodec::Identity(NativeType::Text),
    ),
    ColumnDef::new(
        PLUGIN_ACCESS_PROPERTY,
        ColumnRole::Regular,
        ColumnCodec::Identity(NativeType::Boolean),
    ),
    ColumnDef::new(PLUGIN_STATE_PROPERTY, ColumnRole::Regular, ColumnCodec::Enum),
    ColumnDef::new(
        PLUGIN_CONFIGURATION_PROPERTY,
        ColumnRole::Regular,
        ColumnCodec::Json,
    )
    .nullable(),
    ColumnDef::new(
        SEARCH_TEXT_PROPERTY,
        ColumnRole::Regular,
        ColumnCodec::Identity(NativeType::Text),
    ),
    ColumnDef::new(
        ADDITIONAL_INFO_PROPERTY,
        ColumnRole::Regular,
        ColumnCodec::Json,
    )
    .nullable(),
];

/// Looks up a plugin column by name.
pub fn plugin_column(name: &str) -> Option<&'static ColumnDef> {
    PLUGIN_COLUMNS.iter().find(|def| def.name == name)
}

/// The `id` column.
pub fn partition_key() -> &'static ColumnDef {
    &PLUGIN_COLUMNS[0]
}

/// The `tenant_id` column.
pub fn clustering_key() -> &'static ColumnDef {
    &PLUGIN_COLUMNS[2]
}
