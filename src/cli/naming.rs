//! Filename conventions for unpack outputs and merge inputs
//!
//! Unpacked levels are named `stem_mipNNN_suffix.paa` (NNN = pixel width),
//! splitting the original name at its last underscore so the usual
//! `rock_co.paa` style keeps its `_co` suffix in place. Merge inputs follow
//! the inverse convention `(stem)_mip(digits)(suffix).paa`, from which the
//! combined output name `stem` + `suffix` + `.paa` is derived.

use std::path::{Path, PathBuf};

/// Output path for one unpacked mipmap level.
///
/// `rock_co.paa` at width 256 becomes `rock_mip256_co.paa` next to the
/// input; names without an underscore (or without a `.paa` extension) get
/// `_mipNNN` appended to the stem instead.
#[must_use]
pub fn unpack_name(input: &Path, pixel_width: u16) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(base) = file_name.strip_suffix(".paa") {
        if let Some((stem, suffix)) = base.rsplit_once('_') {
            return parent.join(format!("{stem}_mip{pixel_width}_{suffix}.paa"));
        }
    }

    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = input
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    parent.join(format!("{stem}_mip{pixel_width}{extension}"))
}

/// Derive the merged output path from a `(stem)_mip(digits)(suffix).paa`
/// input name: the `_mip` run of digits is dropped, giving
/// `stem` + `suffix` + `.paa` next to the input. `None` if the name does
/// not follow the convention.
#[must_use]
pub fn merge_output_name(input: &Path) -> Option<PathBuf> {
    let file_name = input.file_name()?.to_string_lossy();
    let base = file_name.strip_suffix(".paa")?;

    // The rightmost `_mip` decides: its remainder must be a run of digits
    // followed by a digit-free suffix (either part may be empty). A digit
    // appearing after a non-digit there also rules out every earlier
    // `_mip` occurrence, whose suffix would contain the same digit.
    let at = base.rfind("_mip")?;
    let remainder = &base[at + 4..];
    let digits_end = remainder
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(remainder.len());
    let suffix = &remainder[digits_end..];
    if suffix.contains(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    Some(parent.join(format!("{}{suffix}.paa", &base[..at])))
}
