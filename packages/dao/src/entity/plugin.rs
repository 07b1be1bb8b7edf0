use std::collections::BTreeMap;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use common::time_uuid;
use common::{ComponentLifecycleState, PluginId, PluginMetaData, TenantId};
use uuid::Uuid;

use crate::codec::{ColumnValue, EnumCodec, JsonCodec};
use crate::error::{CodecError, DaoError};
use crate::schema::{
    self, ADDITIONAL_INFO_PROPERTY, ID_PROPERTY, PLUGIN_ACCESS_PROPERTY,
    PLUGIN_API_TOKEN_PROPERTY, PLUGIN_CLASS_PROPERTY, PLUGIN_COLUMNS,
    PLUGIN_CONFIGURATION_PROPERTY, PLUGIN_NAME_PROPERTY, PLUGIN_STATE_PROPERTY,
    PLUGIN_TENANT_ID_PROPERTY, SEARCH_TEXT_PROPERTY, plugin_column,
};

/// Column values keyed by column name.
pub type ColumnMap = BTreeMap<String, ColumnValue>;

type StateCodec = EnumCodec<ComponentLifecycleState>;

/// A plugin as stored in the plugin column family.
///
/// Non-primitive columns hold their encoded form: `state` is the variant name,
/// `configuration` and `additional_info` are compact JSON text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PluginMetaDataEntity {
    /// Time-based id; unset until a collaborator mints one.
    pub id: Option<Uuid>,
    pub api_token: String,
    pub tenant_id: Uuid,
    pub name: String,
    pub class_ref: String,
    pub public_access: bool,
    pub state: String,
    pub configuration: Option<String>,
    search_text: String,
    pub additional_info: Option<String>,
}

/// The search index expects the plugin name verbatim.
///
/// This is the only place `search_text` is derived from.
fn derive_search_text(name: &str) -> String {
    name.to_owned()
}

impl PluginMetaDataEntity {
    /// Builds the row for `plugin`.
    ///
    /// The id is copied when present and left unset otherwise; this layer never
    /// mints one. A plugin without a tenant cannot be stored.
    pub fn from_domain(plugin: &PluginMetaData) -> Result<Self, DaoError> {
        let id = plugin.id.map(|id| id.id());
        let tenant_id = plugin
            .tenant_id
            .ok_or_else(|| DaoError::missing(PLUGIN_TENANT_ID_PROPERTY, id))?;

        Ok(Self {
            id,
            api_token: plugin.api_token.clone(),
            tenant_id: tenant_id.id(),
            name: plugin.name.clone(),
            class_ref: plugin.clazz.clone(),
            public_access: plugin.public_access,
            state: StateCodec::encode(plugin.state),
            configuration: JsonCodec::encode(&plugin.configuration),
            search_text: derive_search_text(&plugin.name),
            additional_info: JsonCodec::encode(&plugin.additional_info),
        })
    }

    /// Rebuilds the domain object. `created_time` comes from the id.
    pub fn to_domain(&self) -> Result<PluginMetaData, DaoError> {
        let id = self
            .id
            .ok_or_else(|| DaoError::missing(ID_PROPERTY, None))?;
        let created_time = time_uuid::unix_timestamp(&id)
            .map_err(|source| DaoError::InvalidIdentifier { id, source })?;
        let decode_err = |source: CodecError| DaoError::codec(Some(id), source);

        let plugin = PluginMetaData {
            id: Some(PluginId::new(id)),
            created_time,
            tenant_id: Some(TenantId::new(self.tenant_id)),
            api_token: self.api_token.clone(),
            name: self.name.clone(),
            clazz: self.class_ref.clone(),
            public_access: self.public_access,
            state: StateCodec::decode(PLUGIN_STATE_PROPERTY, &self.state).map_err(decode_err)?,
            configuration: JsonCodec::decode(
                PLUGIN_CONFIGURATION_PROPERTY,
                self.configuration.as_deref(),
            )
            .map_err(decode_err)?,
            additional_info: JsonCodec::decode(
                ADDITIONAL_INFO_PROPERTY,
                self.additional_info.as_deref(),
            )
            .map_err(decode_err)?,
        };

        tracing::debug!(id = %id, tenant_id = %self.tenant_id, "Decoded plugin row");
        Ok(plugin)
    }

    /// Text the search index is fed for this row.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Overwrites the indexed text. Meant for index maintenance only; regular
    /// writes rebuild it through [`Self::from_domain`].
    pub fn set_search_text(&mut self, search_text: impl Into<String>) {
        self.search_text = search_text.into();
    }

    /// Value of a single column in its stored form, `None` for names outside the schema.
    pub fn column(&self, name: &str) -> Option<ColumnValue> {
        let value = match name {
            ID_PROPERTY => self.id.map_or(ColumnValue::Null, ColumnValue::Uuid),
            PLUGIN_API_TOKEN_PROPERTY => self.api_token.clone().into(),
            PLUGIN_TENANT_ID_PROPERTY => self.tenant_id.into(),
            PLUGIN_NAME_PROPERTY => self.name.clone().into(),
            PLUGIN_CLASS_PROPERTY => self.class_ref.clone().into(),
            PLUGIN_ACCESS_PROPERTY => self.public_access.into(),
            PLUGIN_STATE_PROPERTY => self.state.clone().into(),
            PLUGIN_CONFIGURATION_PROPERTY => self.configuration.clone().into(),
            SEARCH_TEXT_PROPERTY => self.search_text.clone().into(),
            ADDITIONAL_INFO_PROPERTY => self.additional_info.clone().into(),
            _ => return None,
        };
        Some(value)
    }

    /// Columns to write. Fails if a key column has not been assigned yet.
    pub fn to_columns(&self) -> Result<ColumnMap, DaoError> {
        let unset_key = [schema::partition_key(), schema::clustering_key()]
            .into_iter()
            .find(|key| self.column(key.name) == Some(ColumnValue::Null));
        if let Some(key) = unset_key {
            return Err(DaoError::missing(key.name, self.id));
        }

        PLUGIN_COLUMNS
            .iter()
            .map(|def| {
                self.column(def.name)
                    .map(|value| (def.name.to_string(), value))
                    .ok_or_else(|| DaoError::UnknownColumn(def.name.to_string()))
            })
            .collect()
    }

    /// Reads a row back from stored columns, checking each against its codec.
    pub fn from_columns(columns: &ColumnMap) -> Result<Self, DaoError> {
        let id = match columns.get(ID_PROPERTY) {
            Some(ColumnValue::Uuid(id)) => Some(*id),
            _ => None,
        };
        let reader = ColumnReader { columns, id };

        Ok(Self {
            id: Some(reader.uuid(ID_PROPERTY)?),
            api_token: reader.text(PLUGIN_API_TOKEN_PROPERTY)?,
            tenant_id: reader.uuid(PLUGIN_TENANT_ID_PROPERTY)?,
            name: reader.text(PLUGIN_NAME_PROPERTY)?,
            class_ref: reader.text(PLUGIN_CLASS_PROPERTY)?,
            public_access: reader.boolean(PLUGIN_ACCESS_PROPERTY)?,
            state: reader.text(PLUGIN_STATE_PROPERTY)?,
            configuration: reader.optional_text(PLUGIN_CONFIGURATION_PROPERTY)?,
            search_text: reader.text(SEARCH_TEXT_PROPERTY)?,
            additional_info: reader.optional_text(ADDITIONAL_INFO_PROPERTY)?,
        })
    }
}

struct ColumnReader<'a> {
    columns: &'a ColumnMap,
    id: Option<Uuid>,
}

impl<'a> ColumnReader<'a> {
    /// Raw value of a column after the codec shape check. `None` for null.
    fn read(&self, name: &'static str) -> Result<Option<&'a ColumnValue>, DaoError> {
        let def = plugin_column(name).ok_or_else(|| DaoError::UnknownColumn(name.to_string()))?;

        let value = match self.columns.get(name) {
            None | Some(ColumnValue::Null) => None,
            Some(value) => Some(value),
        };

        match value {
            Some(value) => {
                def.codec
                    .check(def.name, value)
                    .map_err(|source| DaoError::codec(self.id, source))?;
                Ok(Some(value))
            }
            None if def.nullable => Ok(None),
            None if def.role.is_key() => Err(DaoError::missing(def.name, self.id)),
            None => Err(DaoError::codec(
                self.id,
                CodecError::UnexpectedType {
                    column: def.name,
                    expected: def.codec.native_type().name(),
                    found: "null",
                },
            )),
        }
    }

    fn required(&self, name: &'static str) -> Result<&'a ColumnValue, DaoError> {
        self.read(name)?
            .ok_or_else(|| DaoError::missing(name, self.id))
    }

    fn uuid(&self, name: &'static str) -> Result<Uuid, DaoError> {
        match self.required(name)? {
            ColumnValue::Uuid(id) => Ok(*id),
            other => Err(self.mismatch(name, "uuid", other)),
        }
    }

    fn text(&self, name: &'static str) -> Result<String, DaoError> {
        match self.required(name)? {
            ColumnValue::Text(text) => Ok(text.clone()),
            other => Err(self.mismatch(name, "text", other)),
        }
    }

    fn optional_text(&self, name: &'static str) -> Result<Option<String>, DaoError> {
        match self.read(name)? {
            None => Ok(None),
            Some(ColumnValue::Text(text)) => Ok(Some(text.clone())),
            Some(other) => Err(self.mismatch(name, "text", other)),
        }
    }

    fn boolean(&self, name: &'static str) -> Result<bool, DaoError> {
        match self.required(name)? {
            ColumnValue::Boolean(b) => Ok(*b),
            other => Err(self.mismatch(name, "boolean", other)),
        }
    }

    fn mismatch(&self, column: &'static str, expected: &'static str, found: &ColumnValue) -> DaoError {
        DaoError::codec(
            self.id,
            CodecError::UnexpectedType {
                column,
                expected,
                found: found.type_name(),
            },
        )
    }
}

/// Renders every column in schema order, e.g.
/// `PluginMetaDataEntity{id=..., api_token='tok-1', ...}`.
impl fmt::Display for PluginMetaDataEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PluginMetaDataEntity{")?;
        for (i, def) in PLUGIN_COLUMNS.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let value = self.column(def.name).ok_or(fmt::Error)?;
            write!(f, "{}={}", def.name, value)?;
        }
        f.write_str("}")
    }
}

/// Field-exact equality, `search_text` included: a row whose indexed text is
/// stale compares unequal to a freshly converted one.
pub fn row_equals(a: &PluginMetaDataEntity, b: &PluginMetaDataEntity) -> bool {
    a == b
}

pub fn row_hash(row: &PluginMetaDataEntity) -> u64 {
    let mut hasher = DefaultHasher::new();
    row.hash(&mut hasher);
    hasher.finish()
}

pub fn row_to_string(row: &PluginMetaDataEntity) -> String {
    row.to_string()
}
