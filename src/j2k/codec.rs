//! Pluggable J2K codec back end: a narrow trait a bridge implementation
//! can target without the rest of this crate knowing the concrete
//! encoding scheme.

use crate::error::Result;
use crate::io::IoInterface;
use crate::j2k::container::Container;

/// Progression order. JPEG 2000 defines four; the writer's default is LRCP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    Lrcp,
    Rlcp,
    Rpcl,
    Pcrl,
}

/// Encoder tunables, overridable by the caller; the defaults below match
/// what the writer used to hardcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct J2kEncodeConfig {
    pub quality_layers: u32,
    pub resolution_levels: u32,
    pub progression: Progression,
    pub irreversible: bool,
}

impl Default for J2kEncodeConfig {
    fn default() -> Self {
        Self {
            quality_layers: 1,
            resolution_levels: 6,
            progression: Progression::Lrcp,
            irreversible: false,
        }
    }
}

/// A fully decoded tile: its raster-order index and its pixel bytes, laid
/// out row-major, pixel-interleaved across components.
#[derive(Debug, Clone)]
pub struct Tile {
    pub index: u32,
    pub bytes: Vec<u8>,
}

/// The capability a pluggable JPEG 2000 back end exposes to the bridge.
/// This crate does not reimplement wavelet or entropy coding; `StoredCodec`
/// is the one implementation it ships.
pub trait J2kCodec {
    /// Encodes `container` plus all of its tiles (indexed by
    /// `Container::tile_index`, in raster order, one entry per tile; a
    /// missing entry is a `CodecError`) into a complete codestream written
    /// to `sink`.
    fn encode(
        &self,
        container: &Container,
        config: &J2kEncodeConfig,
        tiles: &[Tile],
        sink: &mut dyn IoInterface,
    ) -> Result<()>;

    /// Parses the codestream header starting at `io`'s current position
    /// and returns the container it describes.
    fn decode_header(&self, io: &mut dyn IoInterface) -> Result<Container>;

    /// Decodes one tile's pixel bytes. Callers re-seek `io` to the start
    /// of the codestream and call `decode_header` again before each call.
    fn decode_tile(&self, io: &mut dyn IoInterface, container: &Container, tile_index: u32) -> Result<Vec<u8>>;
}
