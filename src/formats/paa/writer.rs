//! PAA file writing

#![allow(clippy::cast_possible_truncation)]

use super::{MAX_MIPMAP_DATA, MipMap, OFFSET_TABLE_SLOTS, TextureFile};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, WriteBytesExt};
use std::cmp::Reverse;
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, SeekFrom, Write};
use std::path::Path;

/// Write a PAA file to disk
///
/// # Errors
/// Returns an error if file writing fails or the texture cannot be
/// represented (see [`write_paa_to`]).
pub fn write_paa<P: AsRef<Path>>(path: P, texture: &mut TextureFile) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_paa_to(&mut writer, texture)?;
    writer.flush()?;
    Ok(())
}

/// Serialize a texture into a fresh byte buffer.
///
/// # Errors
/// See [`write_paa_to`].
pub fn write_paa_bytes(texture: &mut TextureFile) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_paa_to(&mut cursor, texture)?;
    Ok(cursor.into_inner())
}

/// Serialize a texture: format code, tag block, palette, mipmap chain,
/// terminator, then one backward seek to backpatch the `SFFO` offset
/// table with each level's actual position.
///
/// Side effect: `texture.mipmaps` is re-sorted in place by pixel width
/// descending (stable) before serialization, since the offset table
/// records levels largest-first.
///
/// # Errors
/// Returns [`Error::TooManyMipmaps`] for more levels than the table's 16
/// slots and [`Error::OversizedMipmap`] for a payload the 24-bit length
/// field cannot hold.
///
/// [`Error::TooManyMipmaps`]: crate::Error::TooManyMipmaps
/// [`Error::OversizedMipmap`]: crate::Error::OversizedMipmap
pub fn write_paa_to<W: Write + Seek>(writer: &mut W, texture: &mut TextureFile) -> Result<()> {
    if texture.mipmaps.len() > OFFSET_TABLE_SLOTS {
        return Err(Error::TooManyMipmaps {
            count: texture.mipmaps.len(),
        });
    }

    writer.write_u16::<LittleEndian>(texture.format.code())?;
    let offsets_offset = texture.tags.write_to(writer)?;

    let palette_count = (texture.palette.len() / 3) as u16;
    writer.write_u16::<LittleEndian>(palette_count)?;
    writer.write_all(&texture.palette)?;

    // Largest level first; stable, so equal widths keep their relative order.
    texture.mipmaps.sort_by_key(|mip| Reverse(mip.pixel_width()));

    let mut offsets = Vec::with_capacity(texture.mipmaps.len());
    for mip in &texture.mipmaps {
        offsets.push(writer.stream_position()? as u32);
        write_mipmap(writer, mip)?;
    }

    // End-of-chain terminator: zero width, height, and length.
    writer.write_all(&[0u8; 6])?;

    writer.seek(SeekFrom::Start(offsets_offset))?;
    for offset in offsets {
        writer.write_u32::<LittleEndian>(offset)?;
    }

    Ok(())
}

/// Encode one mipmap record: width, height, payload length as 3-byte
/// little-endian, then the payload verbatim.
pub(crate) fn write_mipmap<W: Write>(writer: &mut W, mip: &MipMap) -> Result<()> {
    if mip.data.len() > MAX_MIPMAP_DATA {
        return Err(Error::OversizedMipmap {
            size: mip.data.len(),
        });
    }

    writer.write_u16::<LittleEndian>(mip.width)?;
    writer.write_u16::<LittleEndian>(mip.height)?;
    writer.write_u24::<LittleEndian>(mip.data.len() as u32)?;
    writer.write_all(&mip.data)?;
    Ok(())
}
