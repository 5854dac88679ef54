//! Immutable JPEG 2000 image geometry: dimensions, tile grid, component
//! count and precision, fixed for the container's lifetime.

use crate::error::{NitfError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Grayscale,
    Rgb,
}

/// Constructed once (encoder path: explicit geometry; decoder path: filled
/// by the reader after header parse) and read-only for the rest of its
/// life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    origin_x: u32,
    origin_y: u32,
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    x_tiles: u32,
    y_tiles: u32,
    n_components: u32,
    precision: u32,
    signed: bool,
    kind: ImageKind,
}

impl Container {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin_x: u32,
        origin_y: u32,
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
        n_components: u32,
        precision: u32,
        signed: bool,
        kind: ImageKind,
    ) -> Result<Self> {
        if width == 0 || height == 0 || tile_width == 0 || tile_height == 0 {
            return Err(NitfError::invalid_argument(
                "container dimensions and tile dimensions must be non-zero",
            ));
        }
        if n_components == 0 {
            return Err(NitfError::invalid_argument(
                "container must have at least one component",
            ));
        }
        if precision == 0 || precision > 38 {
            return Err(NitfError::invalid_argument(format!(
                "precision {precision} out of supported range"
            )));
        }
        let x_tiles = width.div_ceil(tile_width);
        let y_tiles = height.div_ceil(tile_height);
        Ok(Self {
            origin_x,
            origin_y,
            width,
            height,
            tile_width,
            tile_height,
            x_tiles,
            y_tiles,
            n_components,
            precision,
            signed,
            kind,
        })
    }

    pub fn origin(&self) -> (u32, u32) {
        (self.origin_x, self.origin_y)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn x_tiles(&self) -> u32 {
        self.x_tiles
    }

    pub fn y_tiles(&self) -> u32 {
        self.y_tiles
    }

    pub fn n_components(&self) -> u32 {
        self.n_components
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn signed(&self) -> bool {
        self.signed
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// Bytes needed to hold one sample at this container's precision.
    pub fn component_bytes(&self) -> u32 {
        ((self.precision - 1) / 8) + 1
    }

    pub fn tile_index(&self, tile_x: u32, tile_y: u32) -> u32 {
        tile_y * self.x_tiles + tile_x
    }

    /// Byte size of one decoded tile's pixel buffer, row-major,
    /// pixel-interleaved components (decided in DESIGN.md's open-question
    /// ledger).
    pub fn tile_buffer_len(&self) -> usize {
        self.tile_width as usize
            * self.tile_height as usize
            * self.n_components as usize
            * self.component_bytes() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_ceiling_tile_counts() {
        let c = Container::new(0, 0, 128, 100, 64, 64, 1, 8, false, ImageKind::Grayscale).unwrap();
        assert_eq!(c.x_tiles(), 2);
        assert_eq!(c.y_tiles(), 2);
    }

    #[test]
    fn component_bytes_rounds_up_from_precision() {
        let c8 = Container::new(0, 0, 8, 8, 8, 8, 1, 8, false, ImageKind::Grayscale).unwrap();
        assert_eq!(c8.component_bytes(), 1);
        let c9 = Container::new(0, 0, 8, 8, 8, 8, 1, 9, false, ImageKind::Grayscale).unwrap();
        assert_eq!(c9.component_bytes(), 2);
        let c17 = Container::new(0, 0, 8, 8, 8, 8, 1, 17, false, ImageKind::Grayscale).unwrap();
        assert_eq!(c17.component_bytes(), 4);
    }

    #[test]
    fn single_tile_image_has_one_by_one_grid() {
        let c = Container::new(0, 0, 64, 64, 64, 64, 1, 8, false, ImageKind::Grayscale).unwrap();
        assert_eq!((c.x_tiles(), c.y_tiles()), (1, 1));
    }

    #[test]
    fn tile_index_is_raster_order() {
        let c = Container::new(0, 0, 128, 128, 64, 64, 1, 8, false, ImageKind::Grayscale).unwrap();
        assert_eq!(c.tile_index(0, 0), 0);
        assert_eq!(c.tile_index(1, 0), 1);
        assert_eq!(c.tile_index(0, 1), 2);
        assert_eq!(c.tile_index(1, 1), 3);
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(Container::new(0, 0, 0, 64, 64, 64, 1, 8, false, ImageKind::Grayscale).is_err());
    }
}
