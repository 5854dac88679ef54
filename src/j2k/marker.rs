//! JPEG 2000 codestream marker codes (ISO/IEC 15444-1 Annex A), restricted
//! to the subset this bridge reads and writes.

use crate::error::NitfError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum J2kMarker {
    /// SOC: start of codestream.
    StartOfCodestream = 0xFF4F,
    /// SIZ: image and tile size.
    ImageAndTileSize = 0xFF51,
    /// COD: coding style default.
    CodingStyleDefault = 0xFF52,
    /// QCD: quantization default.
    QuantizationDefault = 0xFF5C,
    /// SOT: start of tile-part.
    StartOfTilePart = 0xFF90,
    /// SOD: start of data.
    StartOfData = 0xFF93,
    /// EOC: end of codestream.
    EndOfCodestream = 0xFFD9,
}

impl std::convert::TryFrom<u16> for J2kMarker {
    type Error = NitfError;

    fn try_from(v: u16) -> Result<Self, Self::Error> {
        match v {
            0xFF4F => Ok(Self::StartOfCodestream),
            0xFF51 => Ok(Self::ImageAndTileSize),
            0xFF52 => Ok(Self::CodingStyleDefault),
            0xFF5C => Ok(Self::QuantizationDefault),
            0xFF90 => Ok(Self::StartOfTilePart),
            0xFF93 => Ok(Self::StartOfData),
            0xFFD9 => Ok(Self::EndOfCodestream),
            other => Err(NitfError::parse_error(format!(
                "unrecognized or unsupported J2K marker 0x{other:04X}"
            ))),
        }
    }
}

impl From<J2kMarker> for u16 {
    fn from(marker: J2kMarker) -> u16 {
        marker as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn round_trips_known_markers() {
        assert_eq!(J2kMarker::try_from(0xFF4Fu16).unwrap(), J2kMarker::StartOfCodestream);
        assert_eq!(u16::from(J2kMarker::EndOfCodestream), 0xFFD9);
    }

    #[test]
    fn rejects_unknown_marker() {
        assert!(J2kMarker::try_from(0x1234u16).is_err());
    }
}
