//! # mipmaptool
//!
//! A pure-Rust library for working with Arma's PAA texture container
//! format: reading and writing the tagged mipmap chain, splitting a
//! texture into single-level files, and recombining the best mipmap per
//! resolution from several files into one texture.
//!
//! Pixel payloads (DXT/ARGB) are treated as opaque bytes; this crate does
//! not decode, resample, or generate image data.
//!
//! ## Quick Start
//!
//! ### Reading and writing textures
//!
//! ```no_run
//! use mipmaptool::formats::paa::{read_paa, write_paa};
//!
//! let mut texture = read_paa("data/rock_co.paa")?;
//! println!("{} with {} mipmaps", texture.format, texture.mipmaps.len());
//!
//! // Re-serialize (levels are re-sorted largest-first on write)
//! write_paa("out/rock_co.paa", &mut texture)?;
//! # Ok::<(), mipmaptool::Error>(())
//! ```
//!
//! ### Merging the best mipmaps from several files
//!
//! ```no_run
//! use mipmaptool::formats::paa::{merge_textures, read_paa, write_paa, MergeOptions};
//!
//! let sources = vec![
//!     read_paa("tex_mip4096_co.paa")?,
//!     read_paa("tex_mip1024_co.paa")?,
//! ];
//! let mut merged = merge_textures(sources, MergeOptions::default())?;
//! write_paa("tex_co.paa", &mut merged)?;
//! # Ok::<(), mipmaptool::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use mipmaptool::prelude::*;
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `mipmaptool` command-line binary

pub mod error;
pub mod formats;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::paa::{
        MergeKey, MergeOptions, MipMap, PaaType, TagBlock, TemplateSource, TextureFile,
        merge_textures, parse_paa_bytes, read_paa, write_paa, write_paa_bytes,
    };
}
