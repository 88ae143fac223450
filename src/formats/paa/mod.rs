//! PAA texture container format
//!
//! Tagged, mipmap-chained binary image format used by Arma. A file starts
//! with a 2-byte format code, followed by `GGAT` tag records, the palette
//! block, and the mipmap chain located through the `SFFO` offset table.
//! Pixel payloads (DXT/ARGB) are carried as opaque bytes; this module does
//! not decode them.

mod merge;
mod reader;
mod tags;
mod writer;

pub use merge::{MergeKey, MergeOptions, TemplateSource, merge_textures};
pub use reader::{parse_paa_bytes, read_paa};
pub use tags::{
    TAG_AVG_COLOR, TAG_FLAGS, TAG_MAX_COLOR, TAG_OFFSETS, TAGG_SIGNATURE, TagBlock, TagName,
    human_name,
};
pub use writer::{write_paa, write_paa_bytes, write_paa_to};

use std::fmt;
use std::path::PathBuf;

/// Number of slots in the `SFFO` offset table. The table always reserves
/// 16 entries on disk; unused slots hold zero.
pub const OFFSET_TABLE_SLOTS: usize = 16;

/// Bytes of the width/height/length header preceding each mipmap payload.
pub const MIPMAP_HEADER_SIZE: u32 = 7;

/// Largest payload length representable by the 3-byte on-disk length field.
pub const MAX_MIPMAP_DATA: usize = 0xFF_FFFF;

/// Average color used when a file carries no `CGVA` tag.
pub const DEFAULT_AVG_COLOR: u32 = 0xff802020;

/// Max color used when a file carries no `CXAM` tag.
pub const DEFAULT_MAX_COLOR: u32 = 0xffffffff;

/// PAA pixel format, stored as a 2-byte code at the start of the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaaType {
    /// Uncompressed default format (code 0).
    #[default]
    Default,
    Dxt1,
    Dxt3,
    Dxt5,
    Argb4444,
    Argb1555,
    Ai88,
    /// Unrecognized format code, preserved verbatim so the file can be
    /// round-tripped.
    Invalid(u16),
}

impl PaaType {
    /// Map an on-disk format code to its variant. Unknown codes become
    /// [`PaaType::Invalid`].
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            0x0000 => Self::Default,
            0xFF01 => Self::Dxt1,
            0xFF03 => Self::Dxt3,
            0xFF05 => Self::Dxt5,
            0x4444 => Self::Argb4444,
            0x1555 => Self::Argb1555,
            0x8080 => Self::Ai88,
            other => Self::Invalid(other),
        }
    }

    /// The 2-byte code written to disk.
    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            Self::Default => 0x0000,
            Self::Dxt1 => 0xFF01,
            Self::Dxt3 => 0xFF03,
            Self::Dxt5 => 0xFF05,
            Self::Argb4444 => 0x4444,
            Self::Argb1555 => 0x1555,
            Self::Ai88 => 0x8080,
            Self::Invalid(code) => code,
        }
    }
}

impl fmt::Display for PaaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Dxt1 => write!(f, "DXT1"),
            Self::Dxt3 => write!(f, "DXT3"),
            Self::Dxt5 => write!(f, "DXT5"),
            Self::Argb4444 => write!(f, "ARGB4444"),
            Self::Argb1555 => write!(f, "ARGB1555"),
            Self::Ai88 => write!(f, "AI88"),
            Self::Invalid(code) => write!(f, "invalid({code:#06x})"),
        }
    }
}

/// One resolution level of a texture: dimensions plus the raw (possibly
/// DXT-compressed) payload bytes. Plain value data; levels are moved or
/// cloned between textures, never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MipMap {
    /// Low 15 bits = pixel width; bit 15 flags a compressed payload.
    pub width: u16,
    /// Pixel height, no flag bit.
    pub height: u16,
    /// Payload bytes. Must stay within [`MAX_MIPMAP_DATA`] to be writable.
    pub data: Vec<u8>,
}

impl MipMap {
    /// Pixel width with the compressed flag masked off.
    #[must_use]
    pub fn pixel_width(&self) -> u16 {
        self.width & 0x7fff
    }

    /// Whether bit 15 of the width word marks the payload as compressed.
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.width & 0x8000 != 0
    }
}

/// An in-memory PAA file: format code, tag block, palette, and the ordered
/// mipmap chain.
///
/// After a read, `mipmaps` follows the offset table order. [`write_paa_to`]
/// re-sorts `mipmaps` by pixel width descending in place before
/// serializing.
#[derive(Debug, Clone)]
pub struct TextureFile {
    pub format: PaaType,
    /// Raw tag records; serialized back in insertion order.
    pub tags: TagBlock,
    /// From the `CGVA` tag, [`DEFAULT_AVG_COLOR`] if absent.
    pub avg_color: u32,
    /// From the `CXAM` tag, [`DEFAULT_MAX_COLOR`] if absent.
    pub max_color: u32,
    /// Bit 0 of the `GALF` flags word.
    pub is_alpha: bool,
    /// Bit 1 of the `GALF` flags word.
    pub is_transparent: bool,
    /// RGB triples; length is always 3 times the entry count.
    pub palette: Vec<u8>,
    pub mipmaps: Vec<MipMap>,
    /// Where this texture was read from. Reporting only, never serialized.
    pub source_path: Option<PathBuf>,
}

impl Default for TextureFile {
    fn default() -> Self {
        Self {
            format: PaaType::default(),
            tags: TagBlock::default(),
            avg_color: DEFAULT_AVG_COLOR,
            max_color: DEFAULT_MAX_COLOR,
            is_alpha: false,
            is_transparent: false,
            palette: Vec::new(),
            mipmaps: Vec::new(),
            source_path: None,
        }
    }
}

impl TextureFile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy everything except the mipmap chain: format, scalar fields, the
    /// full tag map, and palette bytes. The copy shares no state with the
    /// source and starts with an empty `mipmaps`; used as the seed when
    /// assembling a merged texture.
    #[must_use]
    pub fn copy_without_mipmaps(&self) -> Self {
        Self {
            format: self.format,
            tags: self.tags.clone(),
            avg_color: self.avg_color,
            max_color: self.max_color,
            is_alpha: self.is_alpha,
            is_transparent: self.is_transparent,
            palette: self.palette.clone(),
            mipmaps: Vec::new(),
            source_path: None,
        }
    }
}
