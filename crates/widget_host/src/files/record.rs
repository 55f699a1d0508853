//! Tagged file-record shapes.
//!
//! Records reach the controller either in the record store's API shape (keyed by the
//! server-assigned `Id`) or in the widget's own UI shape. The shape is decided once, when the raw
//! JSON object is received, so nothing downstream re-inspects field presence.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Field carrying the server-assigned identifier on API-shape records.
pub const SERVER_ID_FIELD: &str = "Id";

/// Field carrying the client-local identifier on UI-shape records.
pub const CLIENT_ID_FIELD: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which of the two record representations a record (or a whole list) uses.
pub enum FileShape {
    /// Record-store shape keyed by [`SERVER_ID_FIELD`].
    Api,
    /// Widget renderer shape without a server identifier.
    Ui,
}

impl FileShape {
    /// Returns a stable label for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Ui => "ui",
        }
    }
}

impl std::fmt::Display for FileShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
/// API-shape record. Always carries [`SERVER_ID_FIELD`].
pub struct ApiFileRecord {
    fields: Map<String, Value>,
}

impl ApiFileRecord {
    /// Wraps `fields` when they carry a server identifier.
    pub fn new(fields: Map<String, Value>) -> Result<Self, Map<String, Value>> {
        if fields.contains_key(SERVER_ID_FIELD) {
            Ok(Self { fields })
        } else {
            Err(fields)
        }
    }

    /// Returns the server-assigned identifier.
    pub fn server_id(&self) -> &Value {
        self.fields.get(SERVER_ID_FIELD).unwrap_or(&Value::Null)
    }

    /// Returns the raw record fields, server metadata included.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the record and returns its raw fields.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
/// UI-shape record, the representation the widget renderer consumes.
pub struct UiFileRecord {
    fields: Map<String, Value>,
}

impl UiFileRecord {
    /// Wraps `fields` when they carry no server identifier.
    pub fn new(fields: Map<String, Value>) -> Result<Self, Map<String, Value>> {
        if fields.contains_key(SERVER_ID_FIELD) {
            Err(fields)
        } else {
            Ok(Self { fields })
        }
    }

    /// Builds a record from converter output.
    ///
    /// A leftover server `Id` is dropped; it becomes the client `id` when none was assigned.
    pub fn from_converted(mut fields: Map<String, Value>) -> Self {
        if let Some(id) = fields.remove(SERVER_ID_FIELD) {
            fields.entry(CLIENT_ID_FIELD).or_insert(id);
        }
        Self { fields }
    }

    /// Returns the client-local identifier, when the widget assigned one.
    pub fn client_id(&self) -> Option<&Value> {
        self.fields.get(CLIENT_ID_FIELD)
    }

    /// Returns the raw record fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the record and returns its raw fields.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
/// One attached file in either representation.
pub enum FileRecord {
    /// Record-store shape.
    Api(ApiFileRecord),
    /// Widget renderer shape.
    Ui(UiFileRecord),
}

impl FileRecord {
    /// Tags a raw JSON object by the presence of [`SERVER_ID_FIELD`].
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        match ApiFileRecord::new(fields) {
            Ok(record) => Self::Api(record),
            Err(fields) => Self::Ui(UiFileRecord { fields }),
        }
    }

    /// Tags a raw JSON value; returns the value back when it is not an object.
    pub fn from_json(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(fields) => Ok(Self::from_fields(fields)),
            other => Err(other),
        }
    }

    /// Returns the record's representation.
    pub const fn shape(&self) -> FileShape {
        match self {
            Self::Api(_) => FileShape::Api,
            Self::Ui(_) => FileShape::Ui,
        }
    }

    /// Returns the identifier used to recognise the record across renders.
    ///
    /// API records answer with their server id, UI records with their client-local id.
    pub fn record_key(&self) -> Option<&Value> {
        match self {
            Self::Api(record) => Some(record.server_id()),
            Self::Ui(record) => record.client_id(),
        }
    }

    /// Returns the raw record fields.
    pub fn fields(&self) -> &Map<String, Value> {
        match self {
            Self::Api(record) => record.fields(),
            Self::Ui(record) => record.fields(),
        }
    }

    /// Serializes the record back into a plain JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.fields().clone())
    }
}

impl<'de> Deserialize<'de> for FileRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_fields(fields))
    }
}

impl<'de> Deserialize<'de> for UiFileRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        Self::new(fields).map_err(|_| {
            serde::de::Error::custom(format!(
                "ui file record must not carry `{SERVER_ID_FIELD}`"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn server_id_field_selects_api_shape() {
        let record = FileRecord::from_fields(object(json!({"Id": 7, "Name": "a.pdf"})));
        assert_eq!(record.shape(), FileShape::Api);
        assert_eq!(record.record_key(), Some(&json!(7)));
    }

    #[test]
    fn lowercase_id_is_a_client_key_not_a_server_id() {
        let record = FileRecord::from_fields(object(json!({"id": "local-1", "name": "a.pdf"})));
        assert_eq!(record.shape(), FileShape::Ui);
        assert_eq!(record.record_key(), Some(&json!("local-1")));
    }

    #[test]
    fn ui_record_without_any_identifier_has_no_key() {
        let record = FileRecord::from_fields(object(json!({"name": "a.pdf"})));
        assert_eq!(record.record_key(), None);
    }

    #[test]
    fn non_object_values_are_rejected() {
        assert_eq!(FileRecord::from_json(json!(3)), Err(json!(3)));
    }

    #[test]
    fn deserialize_tags_and_serialize_keeps_raw_fields() {
        let raw = json!({"Id": 1, "Name": "report.txt"});
        let record: FileRecord = serde_json::from_value(raw.clone()).expect("deserialize");
        assert_eq!(record.shape(), FileShape::Api);
        assert_eq!(serde_json::to_value(&record).expect("serialize"), raw);
    }

    #[test]
    fn ui_record_deserialize_refuses_server_id() {
        let err = serde_json::from_value::<UiFileRecord>(json!({"Id": 1}))
            .expect_err("server id should be rejected");
        assert!(err.to_string().contains("Id"));
    }

    #[test]
    fn converted_records_drop_a_leftover_server_id() {
        let both = UiFileRecord::from_converted(object(json!({"Id": 7, "id": "c-1", "name": "a"})));
        assert_eq!(both.fields(), &object(json!({"id": "c-1", "name": "a"})));

        let server_only = UiFileRecord::from_converted(object(json!({"Id": 7, "name": "a"})));
        assert_eq!(server_only.client_id(), Some(&json!(7)));
        assert!(!server_only.fields().contains_key(SERVER_ID_FIELD));
    }
}
