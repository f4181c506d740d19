//! Private-data envelope carried inside a synchronized file record.
//!
//! The envelope maps an [`OsTag`] to opaque payload bytes. Only the host's own
//! Getter and Setter interpret the bytes for their tag; every other entry is
//! carried verbatim.
use std::collections::btree_map::{self, BTreeMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::errors::{Error, Result};
use super::os::OsTag;

/// Per-file mapping from OS tag to serialized ownership payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivateData {
    entries: BTreeMap<OsTag, Vec<u8>>,
}

impl PrivateData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Envelope holding a single entry.
    #[must_use]
    pub fn single(tag: OsTag, bytes: Vec<u8>) -> Self {
        let mut pd = Self::new();
        pd.set(tag, bytes);
        pd
    }

    /// Replace the entry for `tag`, leaving every other tag untouched.
    pub fn set(&mut self, tag: OsTag, bytes: Vec<u8>) {
        self.entries.insert(tag, bytes);
    }

    #[must_use]
    pub fn get(&self, tag: OsTag) -> Option<&[u8]> {
        self.entries.get(&tag).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, tag: OsTag) -> bool {
        self.entries.contains_key(&tag)
    }

    pub fn remove(&mut self, tag: OsTag) -> Option<Vec<u8>> {
        self.entries.remove(&tag)
    }

    /// Overlay `other` onto this envelope. Tags present in `other` win; tags
    /// only present here are preserved.
    pub fn merge(&mut self, other: PrivateData) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> btree_map::Iter<'_, OsTag, Vec<u8>> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a PrivateData {
    type Item = (&'a OsTag, &'a Vec<u8>);
    type IntoIter = btree_map::Iter<'a, OsTag, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The slice of a synchronized file record this crate reads and writes.
///
/// `name` is the logical, slash-separated path relative to the folder root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "PrivateData::is_empty")]
    pub private_data: PrivateData,
}

impl FileRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            private_data: PrivateData::new(),
        }
    }

    /// Decode the payload stored under `tag`.
    ///
    /// Returns `Ok(None)` when no entry exists for `tag`.
    ///
    /// # Errors
    /// Returns an `Encoding` error when the entry exists but does not decode.
    pub fn load_os_data<T: DeserializeOwned>(&self, tag: OsTag) -> Result<Option<T>> {
        match self.private_data.get(tag) {
            None => Ok(None),
            Some(bytes) => serde_json::from_slice(bytes)
                .map(Some)
                .map_err(|e| Error::encoding(format!("decode {tag} private data: {e}"))),
        }
    }

    /// Encode `data` and store it under `tag`.
    ///
    /// # Errors
    /// Returns an `Encoding` error if serialization fails.
    pub fn store_os_data<T: Serialize>(&mut self, tag: OsTag, data: &T) -> Result<()> {
        let bytes = encode_payload(tag, data)?;
        self.private_data.set(tag, bytes);
        Ok(())
    }
}

pub(crate) fn encode_payload<T: Serialize>(tag: OsTag, data: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(data)
        .map_err(|e| Error::encoding(format!("surprising error encoding {tag} private data: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::payload::PosixOsData;

    #[test]
    fn set_leaves_other_tags_untouched() {
        let mut pd = PrivateData::single(OsTag::Windows, b"win".to_vec());
        pd.set(OsTag::Posix, b"one".to_vec());
        pd.set(OsTag::Posix, b"two".to_vec());
        assert_eq!(pd.get(OsTag::Windows), Some(&b"win"[..]));
        assert_eq!(pd.get(OsTag::Posix), Some(&b"two"[..]));
        assert_eq!(pd.len(), 2);
    }

    #[test]
    fn remove_drops_one_tag() {
        let mut pd = PrivateData::single(OsTag::Windows, b"win".to_vec());
        pd.set(OsTag::Posix, b"px".to_vec());
        assert_eq!(pd.remove(OsTag::Posix), Some(b"px".to_vec()));
        assert_eq!(pd.remove(OsTag::Posix), None);
        assert!(pd.contains(OsTag::Windows));
        assert_eq!(pd.len(), 1);
    }

    #[test]
    fn merge_overwrites_only_incoming_tags() {
        let mut pd = PrivateData::new();
        pd.set(OsTag::Windows, b"win".to_vec());
        pd.set(OsTag::Posix, b"old".to_vec());
        pd.merge(PrivateData::single(OsTag::Posix, b"new".to_vec()));
        assert_eq!(pd.get(OsTag::Windows), Some(&b"win"[..]));
        assert_eq!(pd.get(OsTag::Posix), Some(&b"new"[..]));
    }

    #[test]
    fn unknown_tags_survive_serialization() {
        let mut rec = FileRecord::new("dir/file.txt");
        rec.private_data.set(OsTag::Other(9), vec![1, 2, 3]);
        rec.private_data.set(OsTag::Posix, b"{}".to_vec());
        let json = serde_json::to_string(&rec).unwrap();
        let back: FileRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
        assert_eq!(back.private_data.get(OsTag::Other(9)), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn load_missing_tag_is_none() {
        let rec = FileRecord::new("a");
        let got: Option<PosixOsData> = rec.load_os_data(OsTag::Posix).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn load_garbage_is_encoding_error() {
        let mut rec = FileRecord::new("a");
        rec.private_data.set(OsTag::Posix, b"not json".to_vec());
        let err = rec.load_os_data::<PosixOsData>(OsTag::Posix).unwrap_err();
        assert_eq!(err.kind, crate::types::errors::ErrorKind::Encoding);
    }
}
