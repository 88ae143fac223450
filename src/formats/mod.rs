//! File format handlers

pub mod paa;

// Re-export the main texture types for convenience
pub use paa::{MipMap, PaaType, TagBlock, TextureFile};
