//! CLI command printing per-file texture details

use crate::formats::paa::{TextureFile, human_name, read_paa};
use anyhow::Context;
use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One mipmap level in the report
#[derive(Serialize)]
struct MipReport {
    width: u16,
    height: u16,
    compressed: bool,
    data_size: usize,
}

/// Per-file report; `--json` emits this verbatim
#[derive(Serialize)]
struct TextureReport {
    path: PathBuf,
    format: String,
    is_alpha: bool,
    is_transparent: bool,
    avg_color: String,
    max_color: String,
    palette_entries: usize,
    tags: Vec<String>,
    mipmaps: Vec<MipReport>,
}

impl TextureReport {
    fn new(path: &Path, texture: &TextureFile) -> Self {
        Self {
            path: path.to_path_buf(),
            format: texture.format.to_string(),
            is_alpha: texture.is_alpha,
            is_transparent: texture.is_transparent,
            avg_color: format!("{:#010x}", texture.avg_color),
            max_color: format!("{:#010x}", texture.max_color),
            palette_entries: texture.palette.len() / 3,
            tags: texture.tags.iter().map(|(name, _)| human_name(name)).collect(),
            mipmaps: texture
                .mipmaps
                .iter()
                .map(|mip| MipReport {
                    width: mip.pixel_width(),
                    height: mip.height,
                    compressed: mip.is_compressed(),
                    data_size: mip.data.len(),
                })
                .collect(),
        }
    }
}

/// Show info about each PAA file, as text or JSON
pub fn run(files: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        let texture =
            read_paa(file).with_context(|| format!("failed to read {}", file.display()))?;
        reports.push(TextureReport::new(file, &texture));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        print_report(report);
    }
    Ok(())
}

fn print_report(report: &TextureReport) {
    println!("{}", style(report.path.display()).cyan().bold());
    println!("  Format: {}", report.format);
    println!("  Mip levels: {}", report.mipmaps.len());
    for mip in &report.mipmaps {
        println!(
            "    {}x{} ({} bytes{})",
            mip.width,
            mip.height,
            mip.data_size,
            if mip.compressed { ", compressed" } else { "" }
        );
    }
    println!("  Alpha: {}", report.is_alpha);
    println!("  Transparent: {}", report.is_transparent);
    println!("  Avg color: {}", report.avg_color);
    println!("  Max color: {}", report.max_color);
    println!("  Palette entries: {}", report.palette_entries);
    println!("  Tags: {}", report.tags.join(", "));
    println!();
}
