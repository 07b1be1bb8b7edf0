//! Encoding of column values that are not stored natively.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use common::ComponentLifecycleState;
use serde_json::Value;
use uuid::Uuid;

use crate::error::CodecError;

/// A single column value as the store reads and writes it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColumnValue {
    Uuid(Uuid),
    Text(String),
    Boolean(bool),
    Null,
}

impl ColumnValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Uuid(_) => "uuid",
            Self::Text(_) => "text",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
        }
    }
}

impl From<Uuid> for ColumnValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<String>> for ColumnValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Native type a column is stored as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeType {
    Uuid,
    Text,
    Boolean,
}

impl NativeType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Text => "text",
            Self::Boolean => "boolean",
        }
    }

    fn matches(&self, value: &ColumnValue) -> bool {
        matches!(
            (self, value),
            (Self::Uuid, ColumnValue::Uuid(_))
                | (Self::Text, ColumnValue::Text(_))
                | (Self::Boolean, ColumnValue::Boolean(_))
        )
    }
}

/// Codec assigned to a column by the row schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnCodec {
    /// Stored as-is.
    Identity(NativeType),
    /// JSON tree stored as its compact text.
    Json,
    /// Enumeration stored by variant name.
    Enum,
}

impl ColumnCodec {
    /// Native type the codec reads and writes.
    pub fn native_type(&self) -> NativeType {
        match self {
            Self::Identity(native) => *native,
            Self::Json | Self::Enum => NativeType::Text,
        }
    }

    /// Checks that a raw stored value has the shape this codec decodes.
    ///
    /// `Null` is left to the caller, which knows whether the column is nullable.
    pub fn check(&self, column: &'static str, value: &ColumnValue) -> Result<(), CodecError> {
        let native = self.native_type();
        if value == &ColumnValue::Null || native.matches(value) {
            Ok(())
        } else {
            Err(CodecError::UnexpectedType {
                column,
                expected: native.name(),
                found: value.type_name(),
            })
        }
    }
}

/// Stores a JSON tree as compact text. `Null` is stored as an absent column.
pub struct JsonCodec;

impl JsonCodec {
    pub fn encode(value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            // Maps are ordered by key, so the text is canonical.
            other => Some(other.to_string()),
        }
    }

    /// Absent or blank columns decode to `Null`.
    pub fn decode(column: &'static str, stored: Option<&str>) -> Result<Value, CodecError> {
        match stored {
            None => Ok(Value::Null),
            Some(text) if text.trim().is_empty() => Ok(Value::Null),
            Some(text) => serde_json::from_str(text)
                .map_err(|source| CodecError::MalformedJson { column, source }),
        }
    }
}

/// An enumeration with a closed set of stored names, parsed back through [`FromStr`].
pub trait StoredEnum: Copy + FromStr + 'static {
    const VARIANTS: &'static [Self];

    fn stored_name(&self) -> &'static str;
}

impl StoredEnum for ComponentLifecycleState {
    const VARIANTS: &'static [Self] = ComponentLifecycleState::ALL;

    fn stored_name(&self) -> &'static str {
        self.as_str()
    }
}

/// Stores an enumeration by variant name.
pub struct EnumCodec<T>(PhantomData<T>);

impl<T: StoredEnum> EnumCodec<T> {
    pub fn encode(value: T) -> String {
        value.stored_name().to_string()
    }

    /// Unknown names are an error, never a default.
    pub fn decode(column: &'static str, stored: &str) -> Result<T, CodecError> {
        stored.parse().map_err(|_| CodecError::UnknownVariant {
            column,
            value: stored.to_string(),
            expected: T::VARIANTS
                .iter()
                .map(|v| v.stored_name())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(id) => write!(f, "{id}"),
            Self::Text(text) => write!(f, "'{text}'"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type StateCodec = EnumCodec<ComponentLifecycleState>;

    mod json_codec {
        use super::*;

        #[test]
        fn encodes_compact_text() {
            assert_eq!(JsonCodec::encode(&json!({"x": 1})), Some(r#"{"x":1}"#.into()));
        }

        #[test]
        fn object_keys_are_written_in_sorted_order() {
            let value: Value = serde_json::from_str(r#"{"b":1,"a":{"d":2,"c":3}}"#).unwrap();
            assert_eq!(
                JsonCodec::encode(&value).unwrap(),
                r#"{"a":{"c":3,"d":2},"b":1}"#
            );
        }

        #[test]
        fn decode_reverses_encode() {
            let trees = [
                json!({}),
                json!([]),
                json!({"nested": {"list": [1, "two", null, false], "f": 1.5}}),
                json!("just a string"),
                json!(0),
            ];
            for tree in trees {
                let stored = JsonCodec::encode(&tree);
                assert_eq!(JsonCodec::decode("configuration", stored.as_deref()).unwrap(), tree);
            }
        }

        #[test]
        fn null_is_stored_as_absent_and_read_back_as_null() {
            assert_eq!(JsonCodec::encode(&Value::Null), None);
            assert_eq!(JsonCodec::decode("configuration", None).unwrap(), Value::Null);
            assert_eq!(JsonCodec::decode("configuration", Some("  ")).unwrap(), Value::Null);
        }

        #[test]
        fn malformed_content_is_a_codec_error() {
            let err = JsonCodec::decode("additional_info", Some("{\"x\":")).unwrap_err();
            assert!(matches!(
                err,
                CodecError::MalformedJson {
                    column: "additional_info",
                    ..
                }
            ));
        }
    }

    mod enum_codec {
        use super::*;

        #[test]
        fn encodes_variant_name() {
            assert_eq!(StateCodec::encode(ComponentLifecycleState::Active), "ACTIVE");
            assert_eq!(StateCodec::encode(ComponentLifecycleState::Suspended), "SUSPENDED");
        }

        #[test]
        fn decode_reverses_encode_for_every_variant() {
            for state in ComponentLifecycleState::ALL {
                let stored = StateCodec::encode(*state);
                assert_eq!(StateCodec::decode("state", &stored).unwrap(), *state);
            }
        }

        #[test]
        fn unknown_name_is_a_codec_error() {
            let err = StateCodec::decode("state", "RETIRED").unwrap_err();
            assert_eq!(
                err.to_string(),
                "column 'state' holds unknown value 'RETIRED'. Valid values: ACTIVE, SUSPENDED"
            );
        }

        #[test]
        fn decode_agrees_with_from_str() {
            for stored in ["ACTIVE", "SUSPENDED", "RETIRED", "Active", ""] {
                assert_eq!(
                    StateCodec::decode("state", stored).ok(),
                    stored.parse::<ComponentLifecycleState>().ok(),
                    "stored = {stored:?}"
                );
            }
        }

        #[test]
        fn names_are_case_sensitive() {
            assert!(StateCodec::decode("state", "active").is_err());
        }
    }

    mod column_codec {
        use super::*;

        #[test]
        fn json_and_enum_columns_are_text() {
            assert!(ColumnCodec::Json.check("configuration", &"{}".to_string().into()).is_ok());
            assert!(ColumnCodec::Enum.check("state", &"ACTIVE".to_string().into()).is_ok());
            assert!(ColumnCodec::Enum.check("state", &ColumnValue::Boolean(true)).is_err());
        }

        #[test]
        fn identity_columns_must_match_their_native_type() {
            let codec = ColumnCodec::Identity(NativeType::Uuid);
            assert!(codec.check("id", &ColumnValue::Uuid(Uuid::nil())).is_ok());

            let err = codec.check("id", &ColumnValue::Text("nope".into())).unwrap_err();
            assert_eq!(err.to_string(), "column 'id' expected uuid but found text");
        }

        #[test]
        fn null_passes_the_shape_check() {
            let codec = ColumnCodec::Identity(NativeType::Boolean);
            assert!(codec.check("public_access", &ColumnValue::Null).is_ok());
        }
    }
}
