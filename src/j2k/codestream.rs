//! `StoredCodec`: the one `J2kCodec` this crate ships. It writes and reads
//! a real ISO/IEC 15444-1 marker sequence (SOC, SIZ, COD, QCD, then one
//! SOT/SOD pair per tile, then EOC) but stores each tile's raw sample
//! bytes directly in the tile-part body instead of wavelet/entropy-coded
//! data. It is a pluggable back end the bridge mediates to, not a
//! reimplementation of JPEG 2000 compression.

use std::convert::TryFrom;

use crate::error::{NitfError, Result};
use crate::io::IoInterface;
use crate::j2k::codec::{J2kCodec, J2kEncodeConfig, Progression, Tile};
use crate::j2k::container::{Container, ImageKind};
use crate::j2k::marker::J2kMarker;

#[derive(Debug, Clone, Copy, Default)]
pub struct StoredCodec;

impl StoredCodec {
    pub fn new() -> Self {
        Self
    }
}

fn write_marker(io: &mut dyn IoInterface, marker: J2kMarker) -> Result<()> {
    io.write(&u16::from(marker).to_be_bytes())
}

fn write_segment(io: &mut dyn IoInterface, marker: J2kMarker, payload: &[u8]) -> Result<()> {
    write_marker(io, marker)?;
    let length = payload.len() as u16 + 2;
    io.write(&length.to_be_bytes())?;
    io.write(payload)
}

fn read_u16(io: &mut dyn IoInterface) -> Result<u16> {
    let mut buf = [0u8; 2];
    io.read(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

fn read_u32(io: &mut dyn IoInterface) -> Result<u32> {
    let mut buf = [0u8; 4];
    io.read(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn read_marker(io: &mut dyn IoInterface) -> Result<J2kMarker> {
    J2kMarker::try_from(read_u16(io)?)
}

fn expect_marker(io: &mut dyn IoInterface, expected: J2kMarker) -> Result<()> {
    let found = read_marker(io)?;
    if found != expected {
        return Err(NitfError::parse_error(format!(
            "expected marker {expected:?}, found {found:?}"
        )));
    }
    Ok(())
}

fn read_segment_payload(io: &mut dyn IoInterface) -> Result<Vec<u8>> {
    let length = read_u16(io)?;
    if length < 2 {
        return Err(NitfError::parse_error("segment length shorter than its own field"));
    }
    let mut payload = vec![0u8; (length - 2) as usize];
    io.read(&mut payload)?;
    Ok(payload)
}

fn kind_byte(kind: ImageKind) -> u8 {
    match kind {
        ImageKind::Grayscale => 0,
        ImageKind::Rgb => 1,
    }
}

fn kind_from_byte(byte: u8) -> Result<ImageKind> {
    match byte {
        0 => Ok(ImageKind::Grayscale),
        1 => Ok(ImageKind::Rgb),
        other => Err(NitfError::parse_error(format!("unknown image kind byte {other}"))),
    }
}

fn progression_byte(progression: Progression) -> u8 {
    match progression {
        Progression::Lrcp => 0,
        Progression::Rlcp => 1,
        Progression::Rpcl => 2,
        Progression::Pcrl => 3,
    }
}

impl J2kCodec for StoredCodec {
    fn encode(
        &self,
        container: &Container,
        config: &J2kEncodeConfig,
        tiles: &[Tile],
        sink: &mut dyn IoInterface,
    ) -> Result<()> {
        write_marker(sink, J2kMarker::StartOfCodestream)?;

        let (origin_x, origin_y) = container.origin();
        let mut siz = Vec::with_capacity(34);
        siz.extend_from_slice(&container.width().to_be_bytes());
        siz.extend_from_slice(&container.height().to_be_bytes());
        siz.extend_from_slice(&origin_x.to_be_bytes());
        siz.extend_from_slice(&origin_y.to_be_bytes());
        siz.extend_from_slice(&container.tile_width().to_be_bytes());
        siz.extend_from_slice(&container.tile_height().to_be_bytes());
        siz.extend_from_slice(&container.n_components().to_be_bytes());
        siz.extend_from_slice(&container.precision().to_be_bytes());
        siz.push(container.signed() as u8);
        siz.push(kind_byte(container.kind()));
        write_segment(sink, J2kMarker::ImageAndTileSize, &siz)?;

        let mut cod = Vec::with_capacity(9);
        cod.push(progression_byte(config.progression));
        cod.extend_from_slice(&config.quality_layers.to_be_bytes());
        cod.extend_from_slice(&config.resolution_levels.to_be_bytes());
        cod.push(config.irreversible as u8);
        write_segment(sink, J2kMarker::CodingStyleDefault, &cod)?;

        write_segment(sink, J2kMarker::QuantizationDefault, &[])?;

        let n_tiles = container.x_tiles() * container.y_tiles();
        for index in 0..n_tiles {
            let tile = tiles
                .iter()
                .find(|t| t.index == index)
                .ok_or_else(|| NitfError::codec_error(format!("no tile data supplied for tile {index}")))?;
            let mut sot = Vec::with_capacity(8);
            sot.extend_from_slice(&tile.index.to_be_bytes());
            sot.extend_from_slice(&(tile.bytes.len() as u32).to_be_bytes());
            write_segment(sink, J2kMarker::StartOfTilePart, &sot)?;
            write_marker(sink, J2kMarker::StartOfData)?;
            sink.write(&tile.bytes)?;
        }

        write_marker(sink, J2kMarker::EndOfCodestream)?;
        Ok(())
    }

    fn decode_header(&self, io: &mut dyn IoInterface) -> Result<Container> {
        expect_marker(io, J2kMarker::StartOfCodestream)?;
        expect_marker(io, J2kMarker::ImageAndTileSize)?;
        let siz = read_segment_payload(io)?;
        if siz.len() != 34 {
            return Err(NitfError::parse_error("malformed SIZ segment"));
        }
        let width = u32::from_be_bytes(siz[0..4].try_into().unwrap());
        let height = u32::from_be_bytes(siz[4..8].try_into().unwrap());
        let origin_x = u32::from_be_bytes(siz[8..12].try_into().unwrap());
        let origin_y = u32::from_be_bytes(siz[12..16].try_into().unwrap());
        let tile_width = u32::from_be_bytes(siz[16..20].try_into().unwrap());
        let tile_height = u32::from_be_bytes(siz[20..24].try_into().unwrap());
        let n_components = u32::from_be_bytes(siz[24..28].try_into().unwrap());
        let precision = u32::from_be_bytes(siz[28..32].try_into().unwrap());
        let signed = siz[32] != 0;
        let kind = kind_from_byte(siz[33])?;

        expect_marker(io, J2kMarker::CodingStyleDefault)?;
        read_segment_payload(io)?;
        expect_marker(io, J2kMarker::QuantizationDefault)?;
        read_segment_payload(io)?;

        Container::new(
            origin_x,
            origin_y,
            width,
            height,
            tile_width,
            tile_height,
            n_components,
            precision,
            signed,
            kind,
        )
    }

    fn decode_tile(&self, io: &mut dyn IoInterface, _container: &Container, tile_index: u32) -> Result<Vec<u8>> {
        loop {
            let marker = read_marker(io)?;
            match marker {
                J2kMarker::StartOfTilePart => {
                    let sot = read_segment_payload(io)?;
                    if sot.len() != 8 {
                        return Err(NitfError::parse_error("malformed SOT segment"));
                    }
                    let found_index = u32::from_be_bytes(sot[0..4].try_into().unwrap());
                    let tile_len = u32::from_be_bytes(sot[4..8].try_into().unwrap()) as usize;
                    expect_marker(io, J2kMarker::StartOfData)?;
                    let mut bytes = vec![0u8; tile_len];
                    io.read(&mut bytes)?;
                    if found_index == tile_index {
                        return Ok(bytes);
                    }
                }
                J2kMarker::EndOfCodestream => {
                    return Err(NitfError::codec_error(format!("tile {tile_index} not found in codestream")));
                }
                other => {
                    return Err(NitfError::parse_error(format!(
                        "unexpected marker {other:?} while scanning for tile data"
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{IoInterface, MemoryIo, Whence};

    fn sample_container() -> Container {
        Container::new(0, 0, 4, 4, 2, 2, 1, 8, false, ImageKind::Grayscale).unwrap()
    }

    #[test]
    fn encodes_and_decodes_header() {
        let container = sample_container();
        let tiles = vec![
            Tile { index: 0, bytes: vec![1; 4] },
            Tile { index: 1, bytes: vec![2; 4] },
            Tile { index: 2, bytes: vec![3; 4] },
            Tile { index: 3, bytes: vec![4; 4] },
        ];
        let codec = StoredCodec::new();
        let mut sink = MemoryIo::new();
        codec
            .encode(&container, &J2kEncodeConfig::default(), &tiles, &mut sink)
            .unwrap();

        let mut io = MemoryIo::from_vec(sink.into_inner());
        let decoded = codec.decode_header(&mut io).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.tile_width(), 2);
        assert_eq!(decoded.x_tiles(), 2);
    }

    #[test]
    fn decodes_each_tile_by_reseeking_and_reparsing() {
        let container = sample_container();
        let tiles = vec![
            Tile { index: 0, bytes: vec![10; 4] },
            Tile { index: 1, bytes: vec![20; 4] },
            Tile { index: 2, bytes: vec![30; 4] },
            Tile { index: 3, bytes: vec![40; 4] },
        ];
        let codec = StoredCodec::new();
        let mut sink = MemoryIo::new();
        codec
            .encode(&container, &J2kEncodeConfig::default(), &tiles, &mut sink)
            .unwrap();
        let bytes = sink.into_inner();

        for (expected, tile) in tiles.iter().enumerate() {
            let mut io = MemoryIo::from_vec(bytes.clone());
            io.seek(0, Whence::Set).unwrap();
            let container = codec.decode_header(&mut io).unwrap();
            let decoded = codec.decode_tile(&mut io, &container, expected as u32).unwrap();
            assert_eq!(decoded, tile.bytes);
        }
    }

    #[test]
    fn missing_tile_at_encode_time_is_an_error() {
        let container = sample_container();
        let tiles = vec![Tile { index: 0, bytes: vec![1; 4] }];
        let codec = StoredCodec::new();
        let mut sink = MemoryIo::new();
        assert!(codec
            .encode(&container, &J2kEncodeConfig::default(), &tiles, &mut sink)
            .is_err());
    }
}
