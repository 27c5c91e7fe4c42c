//! Storage type mapping
//!
//! Maps Doctrine DBAL type names to the PHP types used for properties,
//! parameters and return values.

use serde::{Deserialize, Deserializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A Doctrine storage type
///
/// Any name outside the known vocabulary is kept as [`StorageType::Custom`]
/// and used verbatim as the PHP type, so value-object types keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageType {
    /// `boolean`
    Boolean,
    /// `integer`
    Integer,
    /// `bigint`
    BigInt,
    /// `smallint`
    SmallInt,
    /// `string`
    String,
    /// `text`
    Text,
    /// `blob`
    Blob,
    /// `decimal`
    Decimal,
    /// `date`
    Date,
    /// `time`
    Time,
    /// `datetime`
    DateTime,
    /// `datetimetz`
    DateTimeTz,
    /// `object`
    Object,
    /// `json_array`
    JsonArray,
    /// `simple_array`
    SimpleArray,
    /// Any other type name, passed through unchanged
    Custom(String),
}

impl StorageType {
    /// The Doctrine name of this type, as written in `@ORM\Column(type=...)`
    pub fn name(&self) -> &str {
        match self {
            StorageType::Boolean => "boolean",
            StorageType::Integer => "integer",
            StorageType::BigInt => "bigint",
            StorageType::SmallInt => "smallint",
            StorageType::String => "string",
            StorageType::Text => "text",
            StorageType::Blob => "blob",
            StorageType::Decimal => "decimal",
            StorageType::Date => "date",
            StorageType::Time => "time",
            StorageType::DateTime => "datetime",
            StorageType::DateTimeTz => "datetimetz",
            StorageType::Object => "object",
            StorageType::JsonArray => "json_array",
            StorageType::SimpleArray => "simple_array",
            StorageType::Custom(name) => name,
        }
    }

    /// The PHP type holding values of this storage type
    pub fn host_type(&self) -> &str {
        match self {
            StorageType::Boolean => "bool",
            StorageType::Integer | StorageType::BigInt | StorageType::SmallInt => "int",
            StorageType::String | StorageType::Text | StorageType::Blob | StorageType::Decimal => {
                "string"
            }
            StorageType::Date
            | StorageType::Time
            | StorageType::DateTime
            | StorageType::DateTimeTz => "\\DateTime",
            StorageType::Object => "\\stdClass",
            StorageType::JsonArray | StorageType::SimpleArray => "array",
            StorageType::Custom(name) => name,
        }
    }

    /// Whether the column carries a `length` option
    pub fn has_length(&self) -> bool {
        matches!(self, StorageType::String)
    }

    /// Whether the column carries `precision` and `scale` options
    pub fn has_precision(&self) -> bool {
        matches!(self, StorageType::Decimal)
    }
}

impl FromStr for StorageType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "boolean" => StorageType::Boolean,
            "integer" => StorageType::Integer,
            "bigint" => StorageType::BigInt,
            "smallint" => StorageType::SmallInt,
            "string" => StorageType::String,
            "text" => StorageType::Text,
            "blob" => StorageType::Blob,
            "decimal" => StorageType::Decimal,
            "date" => StorageType::Date,
            "time" => StorageType::Time,
            "datetime" => StorageType::DateTime,
            "datetimetz" => StorageType::DateTimeTz,
            "object" => StorageType::Object,
            "json_array" => StorageType::JsonArray,
            "simple_array" => StorageType::SimpleArray,
            other => StorageType::Custom(other.to_string()),
        })
    }
}

impl From<&str> for StorageType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(ty) => ty,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for StorageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(StorageType::from(name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_type_table() {
        assert_eq!(StorageType::Boolean.host_type(), "bool");
        assert_eq!(StorageType::BigInt.host_type(), "int");
        assert_eq!(StorageType::Decimal.host_type(), "string");
        assert_eq!(StorageType::DateTimeTz.host_type(), "\\DateTime");
        assert_eq!(StorageType::Object.host_type(), "\\stdClass");
        assert_eq!(StorageType::SimpleArray.host_type(), "array");
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let ty = StorageType::from("App\\Money");
        assert_eq!(ty, StorageType::Custom("App\\Money".to_string()));
        assert_eq!(ty.host_type(), "App\\Money");
        assert_eq!(ty.name(), "App\\Money");
    }

    #[test]
    fn test_name_round_trips_known_types() {
        for name in ["boolean", "datetime", "json_array", "smallint"] {
            assert_eq!(StorageType::from(name).name(), name);
        }
    }

    #[test]
    fn test_column_options() {
        assert!(StorageType::String.has_length());
        assert!(!StorageType::Text.has_length());
        assert!(StorageType::Decimal.has_precision());
        assert!(!StorageType::Integer.has_precision());
    }
}
