//! `GGAT` tag block handling
//!
//! Tags are 4-byte names (stored reversed on disk: `SFFO` is `OFFS`,
//! `CGVA` is `AVGC`) mapped to length-prefixed byte values. The block sits
//! between the format code and the palette and ends at the first 4 bytes
//! that are not the `GGAT` marker.

use super::OFFSET_TABLE_SLOTS;
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use indexmap::IndexMap;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// A tag name as it appears on disk (reversed byte order).
pub type TagName = [u8; 4];

/// Marker preceding every tag record ("TAGG" reversed).
pub const TAGG_SIGNATURE: TagName = *b"GGAT";

/// Offset table: 16 little-endian u32 slots, zero = unused.
pub const TAG_OFFSETS: TagName = *b"SFFO";

/// Average color, u32 ARGB.
pub const TAG_AVG_COLOR: TagName = *b"CGVA";

/// Max color, u32 ARGB.
pub const TAG_MAX_COLOR: TagName = *b"CXAM";

/// Flags word: bit 0 = alpha, bit 1 = transparent.
pub const TAG_FLAGS: TagName = *b"GALF";

/// Human-readable form of an on-disk tag name (reverses the byte order, so
/// `SFFO` displays as `OFFS`).
#[must_use]
pub fn human_name(name: TagName) -> String {
    let reversed: Vec<u8> = name.iter().rev().copied().collect();
    String::from_utf8_lossy(&reversed).into_owned()
}

/// The tag records of a PAA file, keyed by on-disk name.
///
/// Insertion order is the serialization order: a file that was read and is
/// written back keeps its original tag layout byte for byte, and tags added
/// programmatically serialize after the existing ones. Inserting an
/// already-present name overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagBlock {
    entries: IndexMap<TagName, Vec<u8>>,
}

impl TagBlock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: TagName) -> bool {
        self.entries.contains_key(&name)
    }

    #[must_use]
    pub fn get(&self, name: TagName) -> Option<&[u8]> {
        self.entries.get(&name).map(Vec::as_slice)
    }

    /// Insert or overwrite a tag value, returning the previous value if the
    /// name was already present.
    pub fn insert(&mut self, name: TagName, value: Vec<u8>) -> Option<Vec<u8>> {
        self.entries.insert(name, value)
    }

    /// Iterate entries in insertion (= serialization) order.
    pub fn iter(&self) -> impl Iterator<Item = (TagName, &[u8])> {
        self.entries.iter().map(|(name, value)| (*name, value.as_slice()))
    }

    /// Read tag records until the first 4 bytes that are not the `GGAT`
    /// marker, then rewind those 4 bytes. The cursor is left exactly at the
    /// palette-size field. Duplicate names: last record wins.
    pub(crate) fn read_from(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        let mut block = Self::new();

        loop {
            let mut marker = [0u8; 4];
            if cursor.read_exact(&mut marker).is_err() {
                return Err(Error::MalformedHeader { section: "tag marker" });
            }
            if marker != TAGG_SIGNATURE {
                // Not a tag record; the palette starts here.
                cursor.seek(SeekFrom::Current(-4))?;
                break;
            }

            let mut name = [0u8; 4];
            if cursor.read_exact(&mut name).is_err() {
                return Err(Error::MalformedHeader { section: "tag name" });
            }
            let len = cursor
                .read_u32::<LittleEndian>()
                .map_err(|_| Error::MalformedHeader { section: "tag length" })? as usize;

            let remaining = cursor.get_ref().len() - cursor.position() as usize;
            if remaining < len {
                return Err(Error::MalformedHeader { section: "tag value" });
            }
            let mut value = vec![0u8; len];
            cursor.read_exact(&mut value)?;

            tracing::debug!("got tag {} of size {len}", human_name(name));
            block.entries.insert(name, value);
        }

        Ok(block)
    }

    /// Write every record as `GGAT` + name + length + value.
    ///
    /// The `SFFO` value is not written as stored: mipmap offsets are only
    /// known after the levels have been serialized, so a zero-filled
    /// 16-slot block goes out instead and its start position is returned
    /// for backpatching. A missing `SFFO` entry is inserted first so the
    /// offset table always exists on disk.
    pub(crate) fn write_to<W: Write + Seek>(&mut self, writer: &mut W) -> Result<u64> {
        self.entries.entry(TAG_OFFSETS).or_default();

        let mut offsets_offset = 0u64;
        for (name, value) in &self.entries {
            writer.write_all(&TAGG_SIGNATURE)?;
            writer.write_all(name)?;

            if *name == TAG_OFFSETS {
                writer.write_u32::<LittleEndian>((OFFSET_TABLE_SLOTS * 4) as u32)?;
                offsets_offset = writer.stream_position()?;
                writer.write_all(&[0u8; OFFSET_TABLE_SLOTS * 4])?;
            } else {
                writer.write_u32::<LittleEndian>(value.len() as u32)?;
                writer.write_all(value)?;
            }
        }

        Ok(offsets_offset)
    }

    /// Non-zero entries of the `SFFO` offset table, in slot order. Zero
    /// slots are unused capacity, not offsets. Empty if the tag is absent.
    #[must_use]
    pub fn offset_table(&self) -> Vec<u32> {
        let Some(value) = self.get(TAG_OFFSETS) else {
            return Vec::new();
        };
        value
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .filter(|&offset| offset != 0)
            .collect()
    }

    /// The `CGVA` average color, if present.
    #[must_use]
    pub fn avg_color(&self) -> Option<u32> {
        self.scalar(TAG_AVG_COLOR)
    }

    /// The `CXAM` max color, if present.
    #[must_use]
    pub fn max_color(&self) -> Option<u32> {
        self.scalar(TAG_MAX_COLOR)
    }

    /// The `GALF` flags word, if present.
    #[must_use]
    pub fn flags(&self) -> Option<u32> {
        self.scalar(TAG_FLAGS)
    }

    fn scalar(&self, name: TagName) -> Option<u32> {
        let value = self.get(name)?;
        if value.len() < 4 {
            tracing::warn!(
                "tag {} holds {} bytes, expected at least 4; ignoring",
                human_name(name),
                value.len()
            );
            return None;
        }
        Some(u32::from_le_bytes([value[0], value[1], value[2], value[3]]))
    }
}

impl<'a> IntoIterator for &'a TagBlock {
    type Item = (&'a TagName, &'a Vec<u8>);
    type IntoIter = indexmap::map::Iter<'a, TagName, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_record(name: TagName, value: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&TAGG_SIGNATURE);
        bytes.extend_from_slice(&name);
        bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
        bytes.extend_from_slice(value);
        bytes
    }

    #[test]
    fn test_read_stops_at_first_non_marker() {
        let mut data = tag_record(TAG_AVG_COLOR, &0x11223344u32.to_le_bytes());
        data.extend_from_slice(&[0x02, 0x00, 0xAA, 0xBB]); // palette size + bytes

        let mut cursor = Cursor::new(data.as_slice());
        let block = TagBlock::read_from(&mut cursor).unwrap();

        assert_eq!(block.len(), 1);
        assert_eq!(block.avg_color(), Some(0x11223344));
        // Cursor must sit exactly at the palette-size field.
        assert_eq!(cursor.position() as usize, data.len() - 4);
    }

    #[test]
    fn test_duplicate_tag_last_wins() {
        let mut data = tag_record(TAG_MAX_COLOR, &1u32.to_le_bytes());
        data.extend_from_slice(&tag_record(TAG_MAX_COLOR, &2u32.to_le_bytes()));
        data.extend_from_slice(&[0x00, 0x00]);

        let block = TagBlock::read_from(&mut Cursor::new(data.as_slice())).unwrap();
        assert_eq!(block.len(), 1);
        assert_eq!(block.max_color(), Some(2));
    }

    #[test]
    fn test_truncated_tag_value_is_malformed() {
        let mut data = Vec::new();
        data.extend_from_slice(&TAGG_SIGNATURE);
        data.extend_from_slice(&TAG_FLAGS);
        data.extend_from_slice(&100u32.to_le_bytes());
        data.extend_from_slice(&[1, 2, 3]); // far fewer than 100 bytes

        let err = TagBlock::read_from(&mut Cursor::new(data.as_slice())).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedHeader { section: "tag value" }));
    }

    #[test]
    fn test_offset_table_filters_zero_slots() {
        let mut value = Vec::new();
        for offset in [128u32, 0, 4096, 0, 0, 777] {
            value.extend_from_slice(&offset.to_le_bytes());
        }
        // pad to the full 16 slots
        value.resize(OFFSET_TABLE_SLOTS * 4, 0);

        let mut block = TagBlock::new();
        block.insert(TAG_OFFSETS, value);
        assert_eq!(block.offset_table(), vec![128, 4096, 777]);
    }

    #[test]
    fn test_write_reserves_zeroed_offset_block() {
        let mut block = TagBlock::new();
        block.insert(TAG_AVG_COLOR, vec![1, 2, 3, 4]);
        block.insert(TAG_OFFSETS, vec![0xFF; 8]); // stored value is ignored

        let mut cursor = Cursor::new(Vec::new());
        let offsets_offset = block.write_to(&mut cursor).unwrap();
        let bytes = cursor.into_inner();

        // AVGC record first (insertion order), then the offset table.
        let table_start = offsets_offset as usize;
        assert_eq!(&bytes[table_start..table_start + OFFSET_TABLE_SLOTS * 4], &[0u8; 64]);
        // The record header before the table declares 64 bytes.
        assert_eq!(&bytes[table_start - 12..table_start - 8], &TAGG_SIGNATURE);
        assert_eq!(&bytes[table_start - 8..table_start - 4], &TAG_OFFSETS);
        assert_eq!(&bytes[table_start - 4..table_start], &64u32.to_le_bytes());
    }

    #[test]
    fn test_write_inserts_missing_offset_tag() {
        let mut block = TagBlock::new();
        let mut cursor = Cursor::new(Vec::new());
        let offsets_offset = block.write_to(&mut cursor).unwrap();

        assert!(block.contains(TAG_OFFSETS));
        assert_eq!(offsets_offset, 12); // GGAT + SFFO + length
        assert_eq!(cursor.into_inner().len(), 12 + OFFSET_TABLE_SLOTS * 4);
    }

    #[test]
    fn test_human_name_reverses_bytes() {
        assert_eq!(human_name(TAG_OFFSETS), "OFFS");
        assert_eq!(human_name(TAG_FLAGS), "FLAG");
    }
}
