//! Byte-budgeted TRE read/write over a `Description`.

use crate::error::{NitfError, Result};
use crate::io::IoInterface;
use crate::tre::cursor::TreCursor;
use crate::tre::description::Description;
use crate::tre::field_store::{FieldStore, FieldValue};

/// Parses a TRE's bytes into a field store, consuming at most `budget`
/// bytes from `io`. Returns a truncation error as soon as a field needs
/// more bytes than remain in the budget, unless that field is flagged
/// `consume_remainder`, in which case it takes whatever is left.
pub fn read(description: &Description, io: &mut dyn IoInterface, budget: usize) -> Result<FieldStore> {
    let mut store = FieldStore::new();
    let mut remaining = budget;
    let mut cursor = TreCursor::begin(description, &store)?;
    while !cursor.is_done() {
        if cursor.consume_remainder() {
            let mut bytes = vec![0u8; remaining];
            io.read(&mut bytes)?;
            store.insert(cursor.tag().to_string(), FieldValue::new(cursor.kind(), bytes));
            remaining = 0;
            cursor.iterate(&store)?;
            break;
        }
        if cursor.length() > remaining {
            return Err(NitfError::parse_error(format!(
                "TRE '{}' truncated: field '{}' needs {} bytes, {} remain in budget",
                description.tag,
                cursor.tag(),
                cursor.length(),
                remaining
            )));
        }
        let mut bytes = vec![0u8; cursor.length()];
        io.read(&mut bytes)?;
        remaining -= cursor.length();
        store.insert(cursor.tag().to_string(), FieldValue::new(cursor.kind(), bytes));
        cursor.iterate(&store)?;
    }
    cursor.cleanup();
    Ok(store)
}

/// Serializes a field store back into bytes via `description`, emitting
/// `default` (or zero-fill) for any field the store has no value for.
/// Stored bytes are truncated or zero-padded to the cursor's declared
/// length so the emitted length always matches the schema exactly.
pub fn write(description: &Description, store: &FieldStore, io: &mut dyn IoInterface) -> Result<usize> {
    let mut cursor = TreCursor::begin(description, store)?;
    let mut total = 0usize;
    while !cursor.is_done() {
        let length = cursor.length();
        let mut out = vec![0u8; length];
        if let Some(field) = store.get(cursor.tag()) {
            let n = field.bytes.len().min(length);
            out[..n].copy_from_slice(&field.bytes[..n]);
        } else if let Some(default) = cursor.default() {
            let n = default.len().min(length);
            out[..n].copy_from_slice(&default[..n]);
        }
        io.write(&out)?;
        total += length;
        cursor.iterate(store)?;
    }
    cursor.cleanup();
    Ok(total)
}
