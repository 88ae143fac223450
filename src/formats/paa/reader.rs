//! PAA file reading and parsing

#![allow(clippy::cast_possible_truncation)]

use super::tags::TagBlock;
use super::{DEFAULT_AVG_COLOR, DEFAULT_MAX_COLOR, MIPMAP_HEADER_SIZE, MipMap, PaaType, TextureFile};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// Expected sizes beyond this overflow the headroom DXT payloads get from
/// the 3-byte length field and usually mean the offset table is corrupt.
const EXPECTED_SIZE_WARN_LIMIT: u32 = 8_388_607;

/// Read a PAA file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read.
/// Returns [`Error::MalformedHeader`] or [`Error::TruncatedMipmap`] if the
/// data does not parse as a PAA file.
///
/// [`Error::Io`]: crate::Error::Io
/// [`Error::MalformedHeader`]: crate::Error::MalformedHeader
/// [`Error::TruncatedMipmap`]: crate::Error::TruncatedMipmap
pub fn read_paa<P: AsRef<Path>>(path: P) -> Result<TextureFile> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let mut texture = parse_paa_bytes(&buffer)?;
    texture.source_path = Some(path.to_path_buf());
    tracing::debug!(
        "read {}: type={} mipmaps={} alpha={} transparent={} avg={:#010x} max={:#010x}",
        path.display(),
        texture.format,
        texture.mipmaps.len(),
        texture.is_alpha,
        texture.is_transparent,
        texture.avg_color,
        texture.max_color
    );
    Ok(texture)
}

/// Parse PAA data from bytes
///
/// Reads the format code, the tag block, the palette, and then every
/// mipmap the `SFFO` offset table points at, in table order. Iteration is
/// driven by the table; the in-stream terminator record is not consulted.
///
/// # Errors
/// Returns an error if the data has an invalid PAA structure or a mipmap
/// payload is truncated.
pub fn parse_paa_bytes(data: &[u8]) -> Result<TextureFile> {
    let mut cursor = Cursor::new(data);

    let code = cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| Error::MalformedHeader { section: "format code" })?;
    let format = PaaType::from_code(code);
    if let PaaType::Invalid(code) = format {
        tracing::warn!("unknown texture format code {code:#06x}");
    }

    let tags = TagBlock::read_from(&mut cursor)?;
    let offsets = tags.offset_table();

    let mut texture = TextureFile::new();
    texture.format = format;
    texture.avg_color = tags.avg_color().unwrap_or(DEFAULT_AVG_COLOR);
    texture.max_color = tags.max_color().unwrap_or(DEFAULT_MAX_COLOR);
    if let Some(flags) = tags.flags() {
        texture.is_alpha = flags & 1 != 0;
        texture.is_transparent = flags & 2 != 0;
    }
    texture.tags = tags;

    let palette_count = cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| Error::MalformedHeader { section: "palette size" })? as usize;
    let palette_len = palette_count * 3;
    let remaining = data.len().saturating_sub(cursor.position() as usize);
    if remaining < palette_len {
        return Err(Error::MalformedHeader { section: "palette" });
    }
    let mut palette = vec![0u8; palette_len];
    cursor.read_exact(&mut palette)?;
    tracing::debug!("palette entries: {palette_count}");
    texture.palette = palette;

    for (index, &offset) in offsets.iter().enumerate() {
        cursor.seek(SeekFrom::Start(u64::from(offset)))?;

        // The gap to the next table entry, minus the 7-byte mipmap header,
        // predicts this level's payload length. No hint for the last entry.
        let expected_size = offsets
            .get(index + 1)
            .map_or(0, |&next| {
                next.saturating_sub(offset.saturating_add(MIPMAP_HEADER_SIZE))
            });
        if expected_size > EXPECTED_SIZE_WARN_LIMIT {
            tracing::warn!(
                "expected mipmap size {expected_size} too big to fit; this will create problems with DXT compressed textures"
            );
        }

        match read_mipmap(&mut cursor, expected_size)? {
            Some(mip) => {
                tracing::debug!(
                    "got mipmap {}x{}{}",
                    mip.pixel_width(),
                    mip.height,
                    if mip.is_compressed() { " (compressed)" } else { "" }
                );
                texture.mipmaps.push(mip);
            }
            None => {
                tracing::warn!("offset table slot {index} points at a terminator record, skipping");
            }
        }
    }

    Ok(texture)
}

/// Decode one mipmap record at the cursor position.
///
/// Returns `Ok(None)` for the end-of-chain terminator (zero width or
/// height) without consuming any bytes past the dimensions. A declared
/// payload length of zero is repaired from `expected_size` when a hint is
/// available; both being zero is reported and leaves the payload empty.
pub(crate) fn read_mipmap(cursor: &mut Cursor<&[u8]>, expected_size: u32) -> Result<Option<MipMap>> {
    let width = cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| Error::MalformedHeader { section: "mipmap header" })?;
    let height = cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| Error::MalformedHeader { section: "mipmap header" })?;
    if width == 0 || height == 0 {
        return Ok(None);
    }

    let pixel_width = width & 0x7fff;
    if !pixel_width.is_power_of_two() || !height.is_power_of_two() {
        tracing::warn!("width or height not power of 2: {pixel_width}/{height}");
    }

    let mut length = cursor
        .read_u24::<LittleEndian>()
        .map_err(|_| Error::MalformedHeader { section: "mipmap header" })?;
    if length == 0 {
        if expected_size > 0 {
            tracing::warn!(
                "mipmap data size is 0 but expected size is {expected_size}; something is wrong with this mip, using expected size instead"
            );
            length = expected_size;
        } else {
            tracing::warn!("mipmap data size is 0 and expected size is also 0; something is wrong with this mip");
        }
    }

    let available = cursor.get_ref().len().saturating_sub(cursor.position() as usize);
    if available < length as usize {
        return Err(Error::TruncatedMipmap {
            declared: length,
            available,
        });
    }
    let mut data = vec![0u8; length as usize];
    cursor.read_exact(&mut data)?;

    Ok(Some(MipMap { width, height, data }))
}

#[cfg(test)]
mod tests {
    use super::super::tags::{TAG_OFFSETS, TAGG_SIGNATURE};
    use super::*;
    use pretty_assertions::assert_eq;

    fn mip_record(width: u16, height: u16, declared_len: u32, payload: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        bytes.extend_from_slice(&declared_len.to_le_bytes()[..3]);
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn test_terminator_consumes_only_dimensions() {
        let data = [0u8, 0, 0, 0, 0, 0, 0xAA, 0xBB];
        let mut cursor = Cursor::new(data.as_slice());
        let mip = read_mipmap(&mut cursor, 0).unwrap();
        assert!(mip.is_none());
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_zero_length_repaired_from_hint() {
        let payload = [7u8; 8];
        let data = mip_record(4, 4, 0, &payload);
        let mip = read_mipmap(&mut Cursor::new(data.as_slice()), 8)
            .unwrap()
            .unwrap();
        assert_eq!(mip.data, payload);
    }

    #[test]
    fn test_zero_length_without_hint_stays_empty() {
        let data = mip_record(4, 4, 0, &[1, 2, 3]);
        let mip = read_mipmap(&mut Cursor::new(data.as_slice()), 0)
            .unwrap()
            .unwrap();
        assert!(mip.data.is_empty());
    }

    #[test]
    fn test_truncated_payload_is_fatal() {
        let data = mip_record(4, 4, 100, &[1, 2, 3]);
        let err = read_mipmap(&mut Cursor::new(data.as_slice()), 0).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedMipmap {
                declared: 100,
                available: 3
            }
        ));
    }

    #[test]
    fn test_parse_minimal_file() {
        // format code + single SFFO tag (76 bytes) + empty palette = mipmap
        // payload begins at byte 80.
        let mut data = Vec::new();
        data.extend_from_slice(&0xFF05u16.to_le_bytes());
        data.extend_from_slice(&TAGG_SIGNATURE);
        data.extend_from_slice(&TAG_OFFSETS);
        data.extend_from_slice(&64u32.to_le_bytes());
        let mut table = [0u8; 64];
        table[..4].copy_from_slice(&80u32.to_le_bytes());
        data.extend_from_slice(&table);
        data.extend_from_slice(&0u16.to_le_bytes());
        assert_eq!(data.len(), 80);
        data.extend_from_slice(&mip_record(8, 8, 16, &[3u8; 16]));
        data.extend_from_slice(&[0u8; 6]);

        let texture = parse_paa_bytes(&data).unwrap();
        assert_eq!(texture.format, PaaType::Dxt5);
        assert!(texture.palette.is_empty());
        assert_eq!(texture.mipmaps.len(), 1);
        assert_eq!(texture.mipmaps[0].width, 8);
        assert_eq!(texture.mipmaps[0].height, 8);
        assert_eq!(texture.mipmaps[0].data, vec![3u8; 16]);
        assert_eq!(texture.avg_color, DEFAULT_AVG_COLOR);
        assert_eq!(texture.max_color, DEFAULT_MAX_COLOR);
        assert!(!texture.is_alpha);
        assert!(!texture.is_transparent);
    }

    #[test]
    fn test_offset_slot_at_terminator_is_skipped() {
        let mut data = Vec::new();
        data.extend_from_slice(&0x0000u16.to_le_bytes());
        data.extend_from_slice(&TAGG_SIGNATURE);
        data.extend_from_slice(&TAG_OFFSETS);
        data.extend_from_slice(&64u32.to_le_bytes());
        let mut table = [0u8; 64];
        table[..4].copy_from_slice(&80u32.to_le_bytes());
        data.extend_from_slice(&table);
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&[0u8; 6]); // the table points straight at the terminator

        let texture = parse_paa_bytes(&data).unwrap();
        assert!(texture.mipmaps.is_empty());
    }

    #[test]
    fn test_empty_input_is_malformed() {
        let err = parse_paa_bytes(&[]).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { section: "format code" }));
    }
}
