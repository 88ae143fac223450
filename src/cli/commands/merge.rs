//! CLI command combining the best mipmaps from several files

use crate::cli::naming;
use crate::formats::paa::{MergeOptions, merge_textures, read_paa, write_paa};
use anyhow::{Context, bail};
use console::style;
use std::path::PathBuf;

/// Merge the inputs into `output`, or into the name derived from the
/// `xxx_mipNNN_yy.paa` convention when no output is given. Name
/// derivation runs before any file is read, so pattern mismatches fail
/// fast.
pub fn run(
    output: Option<PathBuf>,
    files: &[PathBuf],
    options: MergeOptions,
) -> anyhow::Result<()> {
    let output = match output {
        Some(path) => path,
        None => derive_output(files)?,
    };

    let mut sources = Vec::with_capacity(files.len());
    for file in files {
        let texture =
            read_paa(file).with_context(|| format!("failed to read {}", file.display()))?;
        sources.push(texture);
    }

    let mut merged = merge_textures(sources, options)?;

    println!("packing mipmaps...");
    for mip in &merged.mipmaps {
        println!("  {}x{}", mip.pixel_width(), mip.height);
    }

    write_paa(&output, &mut merged)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "packed new texture file with {} mipmaps into {}",
        merged.mipmaps.len(),
        style(output.display()).cyan()
    );
    Ok(())
}

/// Every input must yield the same derived output name; the first input's
/// directory hosts the result.
fn derive_output(files: &[PathBuf]) -> anyhow::Result<PathBuf> {
    let mut derived: Option<PathBuf> = None;

    for file in files {
        let candidate = naming::merge_output_name(file).with_context(|| {
            format!(
                "filename {} doesn't match the expected xxx_mipNNN_yy.paa pattern",
                file.display()
            )
        })?;

        match &derived {
            None => derived = Some(candidate),
            Some(previous) => {
                if previous.file_name() != candidate.file_name() {
                    bail!(
                        "filename {} doesn't match previously determined output {}",
                        file.display(),
                        previous.display()
                    );
                }
            }
        }
    }

    derived.context("no input files given")
}
