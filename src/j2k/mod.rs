//! J2K tile codec bridge: a container descriptor, a pluggable codec trait
//! with one shipped implementation, and the reader/writer that stream
//! tiles through it.

pub mod codec;
pub mod codestream;
pub mod container;
pub mod marker;
pub mod reader;
pub mod writer;

pub use codec::{J2kCodec, J2kEncodeConfig, Progression, Tile};
pub use codestream::StoredCodec;
pub use container::{Container, ImageKind};
pub use marker::J2kMarker;
pub use reader::J2kReader;
pub use writer::J2kWriter;
