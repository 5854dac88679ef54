//! Insertion-ordered mapping from fully-qualified tag to field value.

use crate::error::{NitfError, Result};
use crate::tre::description::FieldKind;
use std::collections::HashMap;

/// A field's parsed byte content plus the wire kind it was read as. Fields
/// own their byte content; cloning a `FieldValue` clones the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub kind: FieldKind,
    pub bytes: Vec<u8>,
}

impl FieldValue {
    pub fn new(kind: FieldKind, bytes: Vec<u8>) -> Self {
        Self { kind, bytes }
    }

    /// Parses this field's numeric value for use by the postfix evaluator:
    /// ASCII fields are trimmed then parsed as signed 64-bit, with
    /// empty/all-space parsing as 0; binary fields are big-endian unsigned
    /// integers.
    pub fn as_i64(&self) -> Result<i64> {
        match self.kind {
            FieldKind::AsciiInteger | FieldKind::AsciiFloat => {
                let text = String::from_utf8_lossy(&self.bytes);
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(0);
                }
                if self.kind == FieldKind::AsciiFloat {
                    trimmed
                        .parse::<f64>()
                        .map(|f| f as i64)
                        .map_err(|e| NitfError::schema_error(format!("invalid ascii float: {e}")))
                } else {
                    trimmed
                        .parse::<i64>()
                        .map_err(|e| NitfError::schema_error(format!("invalid ascii integer: {e}")))
                }
            }
            FieldKind::Binary => {
                if self.bytes.len() > 8 {
                    return Err(NitfError::schema_error(
                        "binary field wider than 64 bits used in numeric context",
                    ));
                }
                let mut value: u64 = 0;
                for &b in &self.bytes {
                    value = (value << 8) | b as u64;
                }
                Ok(value as i64)
            }
            FieldKind::AsciiString | FieldKind::RawBytes => Err(NitfError::schema_error(
                "field is not numeric (ascii-string or raw-bytes kind)",
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    order: Vec<String>,
    values: HashMap<String, FieldValue>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field. The first write for a given tag fixes its position
    /// in insertion order; a later write to the same tag (schema error in
    /// well-formed descriptions, but not prevented here) replaces the
    /// value without moving it.
    pub fn insert(&mut self, tag: impl Into<String>, value: FieldValue) {
        let tag = tag.into();
        if !self.values.contains_key(&tag) {
            self.order.push(tag.clone());
        }
        self.values.insert(tag, value);
    }

    pub fn get(&self, tag: &str) -> Option<&FieldValue> {
        self.values.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.values.contains_key(tag)
    }

    /// Iterates fields in insertion order: insertion order equals
    /// first-write order equals cursor visit order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.order
            .iter()
            .map(move |tag| (tag.as_str(), self.values.get(tag).expect("index consistency")))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
