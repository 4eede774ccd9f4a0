use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use std::ops::Index;
use std::{fmt, slice, vec};

/// The value of a single matrix parameter.
///
/// A value stays scalar unless its raw text contained a comma, in which case
/// it becomes an ordered list with one element per comma-delimited run, so
/// `a,b,,,` carries five elements.
#[derive(Clone, PartialEq, Eq)]
pub enum MatrixValue {
    /// A plain string value.
    Single(String),
    /// An ordered list split out of a comma-delimited value.
    List(Vec<String>),
}

impl MatrixValue {
    /// Returns the scalar value, or `None` if this value is a list.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MatrixValue::Single(value) => Some(value),
            MatrixValue::List(_) => None,
        }
    }

    /// Returns the list elements, or `None` if this value is scalar.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MatrixValue::Single(_) => None,
            MatrixValue::List(values) => Some(values),
        }
    }
}

impl From<&str> for MatrixValue {
    fn from(value: &str) -> Self {
        MatrixValue::Single(value.to_owned())
    }
}

impl From<String> for MatrixValue {
    fn from(value: String) -> Self {
        MatrixValue::Single(value)
    }
}

impl From<Vec<&str>> for MatrixValue {
    fn from(values: Vec<&str>) -> Self {
        MatrixValue::List(values.into_iter().map(str::to_owned).collect())
    }
}

impl fmt::Debug for MatrixValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixValue::Single(value) => value.fmt(f),
            MatrixValue::List(values) => f.debug_list().entries(values).finish(),
        }
    }
}

impl Serialize for MatrixValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MatrixValue::Single(value) => serializer.serialize_str(value),
            MatrixValue::List(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}

/// The matrix parameters of a single path segment.
///
/// Keys are unique: declaring a key twice within one segment keeps only the
/// last declaration. Iteration yields keys in the order they first appeared,
/// so serialized output is deterministic.
///
/// ```rust
/// use matrix_params::MatrixValue;
///
/// let parsed = matrix_params::parse("/index;x=1;list=a,b;x=2");
/// let matrix = &parsed[0].matrix;
///
/// assert_eq!(matrix.get("x").and_then(MatrixValue::as_str), Some("2"));
/// assert_eq!(
///     matrix.get("list").and_then(MatrixValue::as_list),
///     Some(&["a".to_owned(), "b".to_owned()][..]),
/// );
/// assert!(matrix.get("missing").is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct MatrixMap {
    // Keys are few per segment, so an ordered list with linear lookup beats
    // a hash map and keeps first-seen order for free.
    pairs: Vec<(String, MatrixValue)>,
}

impl MatrixMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        MatrixMap { pairs: Vec::new() }
    }

    /// Returns the value registered under the given key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&MatrixValue> {
        let key = key.as_ref();
        self.pairs
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the map contains the given key.
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of keys in the map.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if the map holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Inserts a key/value pair, returning the previous value if the key was
    /// already present. A replaced key keeps its original position.
    pub fn insert(&mut self, key: String, value: MatrixValue) -> Option<MatrixValue> {
        match self.pairs.iter_mut().find(|(k, _)| k.as_str() == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    /// Returns an iterator over the parameters in first-seen key order.
    pub fn iter(&self) -> MatrixMapIter<'_> {
        MatrixMapIter {
            inner: self.pairs.iter(),
        }
    }
}

impl fmt::Debug for MatrixMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for MatrixMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (key, value) in &self.pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl FromIterator<(String, MatrixValue)> for MatrixMap {
    fn from_iter<I: IntoIterator<Item = (String, MatrixValue)>>(iter: I) -> Self {
        let mut map = MatrixMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for MatrixMap {
    type Item = (String, MatrixValue);
    type IntoIter = vec::IntoIter<(String, MatrixValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'m> IntoIterator for &'m MatrixMap {
    type Item = (&'m str, &'m MatrixValue);
    type IntoIter = MatrixMapIter<'m>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the keys and values of a [`MatrixMap`].
pub struct MatrixMapIter<'m> {
    inner: slice::Iter<'m, (String, MatrixValue)>,
}

impl<'m> Iterator for MatrixMapIter<'m> {
    type Item = (&'m str, &'m MatrixValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value))
    }
}

impl ExactSizeIterator for MatrixMapIter<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// One `/`-delimited piece of a path together with its matrix parameters.
///
/// `segment` is the text before the piece's first `;`. Records are immutable
/// once normalization has run; a fresh parse produces fresh records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentRecord {
    /// The plain segment name.
    pub segment: String,
    /// The segment's matrix parameters.
    pub matrix: MatrixMap,
}

/// The ordered result of parsing a path, one record per path piece.
///
/// The number of records always equals the number of `/`-delimited pieces
/// after the leading slash, including empty ones. The type is cheap to clone
/// relative to a request lifecycle and is `Send + Sync`, so the middleware
/// can park it in [`http::Extensions`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ParsedMatrix {
    records: Vec<SegmentRecord>,
}

impl ParsedMatrix {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        ParsedMatrix {
            records: Vec::new(),
        }
    }

    /// Appends a record, preserving left-to-right path order.
    pub fn push(&mut self, record: SegmentRecord) {
        self.records.push(record);
    }

    /// Returns the number of segment records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the path had no segments.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at the given position.
    pub fn get(&self, index: usize) -> Option<&SegmentRecord> {
        self.records.get(index)
    }

    /// Returns an iterator over the records in path order.
    pub fn iter(&self) -> slice::Iter<'_, SegmentRecord> {
        self.records.iter()
    }
}

impl Index<usize> for ParsedMatrix {
    type Output = SegmentRecord;

    fn index(&self, index: usize) -> &SegmentRecord {
        &self.records[index]
    }
}

impl From<Vec<SegmentRecord>> for ParsedMatrix {
    fn from(records: Vec<SegmentRecord>) -> Self {
        ParsedMatrix { records }
    }
}

impl FromIterator<SegmentRecord> for ParsedMatrix {
    fn from_iter<I: IntoIterator<Item = SegmentRecord>>(iter: I) -> Self {
        ParsedMatrix {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ParsedMatrix {
    type Item = SegmentRecord;
    type IntoIter = vec::IntoIter<SegmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'p> IntoIterator for &'p ParsedMatrix {
    type Item = &'p SegmentRecord;
    type IntoIter = slice::Iter<'p, SegmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
