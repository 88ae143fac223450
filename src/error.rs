//! Error types for `mipmaptool`

use thiserror::Error;

/// The error type for PAA operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== PAA Structure Errors ====================
    /// A structural section of the file (format code, tag record, palette)
    /// ended before it could be read in full.
    #[error("malformed PAA header: truncated {section} section")]
    MalformedHeader {
        /// Which section was being read when the data ran out.
        section: &'static str,
    },

    /// A mipmap record declared more payload bytes than the file contains.
    #[error("truncated mipmap payload: {declared} bytes declared, {available} available")]
    TruncatedMipmap {
        /// Payload length declared in the mipmap header (or substituted
        /// from the expected-size hint).
        declared: u32,
        /// Bytes actually remaining in the stream.
        available: usize,
    },

    // ==================== Write Errors ====================
    /// A mipmap payload is too large for the 24-bit length field.
    #[error("mipmap payload of {size} bytes does not fit the 24-bit length field")]
    OversizedMipmap {
        /// The payload size in bytes.
        size: usize,
    },

    /// More mipmap levels than the 16 slots of the offset table.
    #[error("{count} mipmap levels exceed the 16 offset table slots")]
    TooManyMipmaps {
        /// The number of levels in the texture.
        count: usize,
    },

    // ==================== Merge Errors ====================
    /// Merge was called without any source textures.
    #[error("no input textures to merge")]
    NoInputTextures,
}

/// A specialized `Result` type for PAA operations.
pub type Result<T> = std::result::Result<T, Error>;
