//! Tile- and region-random-access J2K reader. Both `read_tile` and
//! `read_region` re-seek to the start of the codestream and re-parse the
//! header before every call, because the back end this bridge mediates to
//! is not restartable mid-stream.

use log::{debug, trace};

use crate::error::{NitfError, Result};
use crate::io::{IoInterface, Whence};
use crate::j2k::codec::J2kCodec;
use crate::j2k::container::Container;

pub struct J2kReader<C: J2kCodec> {
    io: Box<dyn IoInterface>,
    offset: i64,
    codec: C,
    container: Container,
}

impl<C: J2kCodec> J2kReader<C> {
    /// Seeks `io` to `offset`, parses the codestream header there, and
    /// fills the container descriptor.
    pub fn open(mut io: Box<dyn IoInterface>, offset: i64, codec: C) -> Result<Self> {
        io.seek(offset, Whence::Set)?;
        let container = codec.decode_header(io.as_mut())?;
        debug!(
            "opened J2K reader at offset {offset}: {}x{} image, {}x{} tiles",
            container.width(),
            container.height(),
            container.x_tiles(),
            container.y_tiles()
        );
        Ok(Self { io, offset, codec, container })
    }

    /// This bridge's one shipped codec supports tile random access.
    pub fn can_read_tiles(&self) -> bool {
        true
    }

    pub fn get_container(&self) -> &Container {
        &self.container
    }

    /// Re-seeks to the start of the codestream, re-parses the header, and
    /// decodes a single tile.
    pub fn read_tile(&mut self, tile_x: u32, tile_y: u32) -> Result<Vec<u8>> {
        trace!("re-parsing codestream header for readTile({tile_x}, {tile_y})");
        self.io.seek(self.offset, Whence::Set)?;
        let container = self.codec.decode_header(self.io.as_mut())?;
        let tile_index = container.tile_index(tile_x, tile_y);
        self.codec.decode_tile(self.io.as_mut(), &container, tile_index)
    }

    /// Re-seeks, re-parses the header once, then decodes every tile
    /// whose footprint intersects `[x0,y0,x1,y1)` in raster order,
    /// copying each into its place in a freshly allocated region buffer.
    /// `x1 == 0` is treated as the image width, `y1 == 0` as the image
    /// height.
    pub fn read_region(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) -> Result<Vec<u8>> {
        self.io.seek(self.offset, Whence::Set)?;
        let container = self.codec.decode_header(self.io.as_mut())?;

        let x1 = if x1 == 0 { container.width() } else { x1 };
        let y1 = if y1 == 0 { container.height() } else { y1 };
        if x1 <= x0 || y1 <= y0 {
            return Err(NitfError::invalid_argument(format!(
                "empty or inverted region [{x0},{y0},{x1},{y1})"
            )));
        }

        let component_bytes = container.component_bytes() as usize;
        let n_components = container.n_components() as usize;
        let pixel_stride = component_bytes * n_components;
        let region_w = (x1 - x0) as usize;
        let region_h = (y1 - y0) as usize;
        let mut region = vec![0u8; region_w * region_h * pixel_stride];

        let tile_w = container.tile_width();
        let tile_h = container.tile_height();
        let first_tx = x0 / tile_w;
        let last_tx = (x1 - 1) / tile_w;
        let first_ty = y0 / tile_h;
        let last_ty = (y1 - 1) / tile_h;

        trace!("readRegion spans tiles x[{first_tx}..={last_tx}] y[{first_ty}..={last_ty}]");

        for ty in first_ty..=last_ty {
            for tx in first_tx..=last_tx {
                let tile_index = container.tile_index(tx, ty);
                let tile_bytes = self.codec.decode_tile(self.io.as_mut(), &container, tile_index)?;
                let tile_x0 = tx * tile_w;
                let tile_y0 = ty * tile_h;
                for row in 0..tile_h {
                    let global_y = tile_y0 + row;
                    if global_y < y0 || global_y >= y1 {
                        continue;
                    }
                    for col in 0..tile_w {
                        let global_x = tile_x0 + col;
                        if global_x < x0 || global_x >= x1 {
                            continue;
                        }
                        let src = (row as usize * tile_w as usize + col as usize) * pixel_stride;
                        let dst_row = (global_y - y0) as usize;
                        let dst_col = (global_x - x0) as usize;
                        let dst = (dst_row * region_w + dst_col) * pixel_stride;
                        region[dst..dst + pixel_stride]
                            .copy_from_slice(&tile_bytes[src..src + pixel_stride]);
                    }
                }
            }
        }

        Ok(region)
    }
}
