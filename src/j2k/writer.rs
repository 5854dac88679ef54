//! J2K tile writer: construct, `set_tile` any number of times, then
//! `write`, after which the writer is terminal. That lifecycle is enforced
//! by the type system rather than a runtime flag, since `write` consumes
//! the writer by value.

use log::debug;

use crate::error::{NitfError, Result};
use crate::io::IoInterface;
use crate::j2k::codec::{J2kCodec, J2kEncodeConfig, Tile};
use crate::j2k::container::Container;

pub struct J2kWriter<C: J2kCodec> {
    container: Container,
    codec: C,
    config: J2kEncodeConfig,
    /// Pre-sized to the tile grid: one slot per tile, filled in as
    /// `set_tile` is called.
    tiles: Vec<Option<Vec<u8>>>,
}

impl<C: J2kCodec> J2kWriter<C> {
    pub fn construct(container: Container, codec: C) -> Self {
        let n_tiles = (container.x_tiles() * container.y_tiles()) as usize;
        Self {
            container,
            codec,
            config: J2kEncodeConfig::default(),
            tiles: vec![None; n_tiles],
        }
    }

    pub fn with_config(mut self, config: J2kEncodeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn get_container(&self) -> &Container {
        &self.container
    }

    /// Stores tile `(tile_x, tile_y)`'s pixel buffer for the eventual
    /// `write`. Tiles may be set in any order; `StoredCodec` requires all
    /// of them present by the time `write` runs.
    pub fn set_tile(&mut self, tile_x: u32, tile_y: u32, buf: Vec<u8>) -> Result<()> {
        let expected = self.container.tile_buffer_len();
        if buf.len() != expected {
            return Err(NitfError::invalid_argument(format!(
                "tile ({tile_x}, {tile_y}) buffer is {} bytes, expected {expected}",
                buf.len()
            )));
        }
        let index = self.container.tile_index(tile_x, tile_y) as usize;
        let slot = self
            .tiles
            .get_mut(index)
            .ok_or_else(|| NitfError::invalid_argument(format!("tile ({tile_x}, {tile_y}) is out of range")))?;
        *slot = Some(buf);
        Ok(())
    }

    /// Ends compression and copies the encoded codestream to `sink`.
    /// Consumes the writer: after `write`, there is no writer left to
    /// call `set_tile` on again.
    pub fn write(self, sink: &mut dyn IoInterface) -> Result<()> {
        let tiles: Vec<Tile> = self
            .tiles
            .into_iter()
            .enumerate()
            .filter_map(|(index, bytes)| bytes.map(|bytes| Tile { index: index as u32, bytes }))
            .collect();
        debug!(
            "writing J2K codestream: {} tiles, {}x{} image",
            tiles.len(),
            self.container.width(),
            self.container.height()
        );
        self.codec.encode(&self.container, &self.config, &tiles, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryIo;
    use crate::j2k::codestream::StoredCodec;
    use crate::j2k::container::ImageKind;
    use crate::j2k::reader::J2kReader;

    #[test]
    fn single_tile_round_trips_byte_for_byte() {
        let container = Container::new(0, 0, 64, 64, 64, 64, 1, 8, false, ImageKind::Grayscale).unwrap();
        let mut pattern = vec![0u8; 64 * 64];
        for (i, b) in pattern.iter_mut().enumerate() {
            *b = if (i / 64 + i % 64) % 2 == 0 { 0xFF } else { 0x00 };
        }

        let mut writer = J2kWriter::construct(container, StoredCodec::new());
        writer.set_tile(0, 0, pattern.clone()).unwrap();
        let mut sink = MemoryIo::new();
        writer.write(&mut sink).unwrap();

        let mut reader = J2kReader::open(Box::new(MemoryIo::from_vec(sink.into_inner())), 0, StoredCodec::new()).unwrap();
        let read_back = reader.read_tile(0, 0).unwrap();
        assert_eq!(read_back, pattern);
    }

    #[test]
    fn writer_rejects_wrong_sized_tile_buffer() {
        let container = Container::new(0, 0, 64, 64, 64, 64, 1, 8, false, ImageKind::Grayscale).unwrap();
        let mut writer = J2kWriter::construct(container, StoredCodec::new());
        assert!(writer.set_tile(0, 0, vec![0u8; 10]).is_err());
    }

    #[test]
    fn missing_tile_fails_at_write_time() {
        let container = Container::new(0, 0, 128, 128, 64, 64, 1, 8, false, ImageKind::Grayscale).unwrap();
        let mut writer = J2kWriter::construct(container, StoredCodec::new());
        writer.set_tile(0, 0, vec![0u8; 64 * 64]).unwrap();
        let mut sink = MemoryIo::new();
        assert!(writer.write(&mut sink).is_err());
    }

    #[test]
    fn reader_recovers_the_writer_container() {
        let container = Container::new(0, 0, 64, 64, 64, 64, 1, 8, false, ImageKind::Grayscale).unwrap();
        let mut writer = J2kWriter::construct(container, StoredCodec::new());
        writer.set_tile(0, 0, vec![7u8; 64 * 64]).unwrap();
        let mut sink = MemoryIo::new();
        writer.write(&mut sink).unwrap();

        let reader = J2kReader::open(Box::new(MemoryIo::from_vec(sink.into_inner())), 0, StoredCodec::new()).unwrap();
        assert_eq!(reader.get_container().width(), 64);
        assert_eq!(reader.get_container().height(), 64);
        assert_eq!(reader.get_container().tile_width(), 64);
    }
}
