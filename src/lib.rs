/*!
# nitf-j2k-core

A description-driven TRE (Tagged Record Extension) engine and a JPEG 2000
tile codec bridge, the two subsystems shared by every NITF (National
Imagery Transmission Format) reader/writer.

## TRE engine (`tre`)

Walks a declarative [`tre::Description`] (fields, loops keyed on
previously parsed values, conditional branches gated by postfix
expressions, computed lengths) to decode bytes into a keyed
[`tre::FieldStore`] and re-encode the store back to bytes unchanged. See
[`tre::read`]/[`tre::write`] for the codec entry points and
[`tre::TreCursor`] for the traversal state machine.

## J2K tile codec bridge (`j2k`)

A uniform tile-oriented [`j2k::Container`]/[`j2k::J2kReader`]/
[`j2k::J2kWriter`] abstraction over a pluggable [`j2k::J2kCodec`] back
end, streaming tiles to and from an [`io::IoInterface`] without
materializing whole images where avoidable. This crate does not
reimplement wavelet or entropy coding; [`j2k::StoredCodec`] is the one
back end it ships.

## Error handling

Every fallible operation returns [`error::Result`], whose [`error::NitfError`]
carries an [`error::ErrorKind`], a message, and the call site that raised it.
*/

pub mod error;
pub mod io;
pub mod j2k;
pub mod tre;

pub use error::{ErrorKind, NitfError, Result};
pub use io::{IoInterface, MemoryIo, Whence};
