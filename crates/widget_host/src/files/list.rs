//! Homogeneous, cheaply cloneable file lists.

use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::record::{ApiFileRecord, FileRecord, FileShape, UiFileRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Typed rejection raised while building a [`FileList`] from host-supplied data.
pub enum FileListError {
    /// The host supplied something other than an array (or null).
    NotAnArray,
    /// An element was not a JSON object.
    NotAnObject {
        /// Position of the offending element.
        index: usize,
    },
    /// The list mixes API-shape and UI-shape records.
    MixedShapes {
        /// Position of the first record whose shape differs from the first element.
        index: usize,
        /// Shape of the first element.
        expected: FileShape,
        /// Shape found at `index`.
        found: FileShape,
    },
}

impl std::fmt::Display for FileListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnArray => write!(f, "existing files must be an array"),
            Self::NotAnObject { index } => {
                write!(f, "existing file at index {index} is not an object")
            }
            Self::MixedShapes {
                index,
                expected,
                found,
            } => write!(
                f,
                "existing files mix record shapes: index 0 is {expected}, index {index} is {found}"
            ),
        }
    }
}

impl std::error::Error for FileListError {}

#[derive(Debug)]
struct FileListInner {
    shape: Option<FileShape>,
    records: Vec<FileRecord>,
}

/// Shape-resolved borrowed view over a [`FileList`].
#[derive(Debug, Clone, PartialEq)]
pub enum FileListView<'a> {
    /// No records.
    Empty,
    /// Every record is in API shape.
    Api(Vec<&'a ApiFileRecord>),
    /// Every record is in UI shape.
    Ui(Vec<&'a UiFileRecord>),
}

/// Reference-counted list of file records sharing one shape.
///
/// Clones share storage, so [`FileList::ptr_eq`] can tell whether two handles are the very same
/// list. Equality (`==`) compares full record values.
#[derive(Debug, Clone)]
pub struct FileList {
    inner: Rc<FileListInner>,
}

impl Default for FileList {
    fn default() -> Self {
        Self::empty()
    }
}

impl FileList {
    /// Returns a new empty list.
    pub fn empty() -> Self {
        Self {
            inner: Rc::new(FileListInner {
                shape: None,
                records: Vec::new(),
            }),
        }
    }

    /// Builds a list, rejecting mixed record shapes.
    ///
    /// # Errors
    ///
    /// Returns [`FileListError::MixedShapes`] when any record's shape differs from the first.
    pub fn new(records: Vec<FileRecord>) -> Result<Self, FileListError> {
        let shape = records.first().map(FileRecord::shape);
        if let Some(expected) = shape {
            if let Some((index, record)) = records
                .iter()
                .enumerate()
                .find(|(_, record)| record.shape() != expected)
            {
                return Err(FileListError::MixedShapes {
                    index,
                    expected,
                    found: record.shape(),
                });
            }
        }
        Ok(Self {
            inner: Rc::new(FileListInner { shape, records }),
        })
    }

    /// Tags and validates a raw JSON value supplied by the host. `null` yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error for non-array input, non-object elements, or mixed shapes.
    pub fn from_json(value: &Value) -> Result<Self, FileListError> {
        let items = match value {
            Value::Null => return Ok(Self::empty()),
            Value::Array(items) => items,
            _ => return Err(FileListError::NotAnArray),
        };
        let records = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                FileRecord::from_json(item.clone())
                    .map_err(|_| FileListError::NotAnObject { index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    /// Serializes the list back into a JSON array.
    pub fn to_json(&self) -> Value {
        Value::Array(self.inner.records.iter().map(FileRecord::to_json).collect())
    }

    /// Returns whether both handles share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    /// Returns whether the list has no records.
    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }

    /// Returns the shape shared by every record, or `None` for an empty list.
    pub fn shape(&self) -> Option<FileShape> {
        self.inner.shape
    }

    /// Returns the records in order.
    pub fn records(&self) -> &[FileRecord] {
        &self.inner.records
    }

    /// Returns the first record's identifier.
    pub fn first_key(&self) -> Option<&Value> {
        self.inner.records.first().and_then(FileRecord::record_key)
    }

    /// Returns a shape-resolved view so callers never re-check individual records.
    pub fn view(&self) -> FileListView<'_> {
        match self.inner.shape {
            None => FileListView::Empty,
            Some(FileShape::Api) => FileListView::Api(
                self.inner
                    .records
                    .iter()
                    .filter_map(|record| match record {
                        FileRecord::Api(record) => Some(record),
                        FileRecord::Ui(_) => None,
                    })
                    .collect(),
            ),
            Some(FileShape::Ui) => FileListView::Ui(
                self.inner
                    .records
                    .iter()
                    .filter_map(|record| match record {
                        FileRecord::Ui(record) => Some(record),
                        FileRecord::Api(_) => None,
                    })
                    .collect(),
            ),
        }
    }
}

impl PartialEq for FileList {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner.records == other.inner.records
    }
}

impl Serialize for FileList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.records.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FileList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_json(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn null_and_empty_array_both_yield_empty_lists() {
        assert!(FileList::from_json(&Value::Null).expect("null").is_empty());
        let list = FileList::from_json(&json!([])).expect("empty");
        assert!(list.is_empty());
        assert_eq!(list.shape(), None);
        assert_eq!(list.view(), FileListView::Empty);
    }

    #[test]
    fn api_list_resolves_api_view() {
        let list =
            FileList::from_json(&json!([{"Id": 1}, {"Id": 2, "Name": "b"}])).expect("api list");
        assert_eq!(list.shape(), Some(FileShape::Api));
        assert_eq!(list.first_key(), Some(&json!(1)));
        match list.view() {
            FileListView::Api(records) => assert_eq!(records.len(), 2),
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn mixed_shapes_fail_loudly() {
        let err = FileList::from_json(&json!([{"Id": 1}, {"id": "x"}]))
            .expect_err("mixed list should fail");
        assert_eq!(
            err,
            FileListError::MixedShapes {
                index: 1,
                expected: FileShape::Api,
                found: FileShape::Ui,
            }
        );
    }

    #[test]
    fn non_array_and_non_object_inputs_are_rejected() {
        assert_eq!(
            FileList::from_json(&json!({"Id": 1})).expect_err("object"),
            FileListError::NotAnArray
        );
        assert_eq!(
            FileList::from_json(&json!([{"Id": 1}, "nope"])).expect_err("string element"),
            FileListError::NotAnObject { index: 1 }
        );
    }

    #[test]
    fn equality_is_by_value_and_ptr_eq_by_storage() {
        let a = FileList::from_json(&json!([{"Id": 1}])).expect("a");
        let b = FileList::from_json(&json!([{"Id": 1}])).expect("b");
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }

    #[test]
    fn deserialize_round_trips_through_json() {
        let raw = json!([{"id": "local", "name": "a.png"}]);
        let list: FileList = serde_json::from_value(raw.clone()).expect("deserialize");
        assert_eq!(list.shape(), Some(FileShape::Ui));
        assert_eq!(list.to_json(), raw);
    }
}
