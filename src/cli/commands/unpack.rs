//! CLI command splitting textures into one file per mipmap level

use crate::cli::naming;
use crate::formats::paa::{read_paa, write_paa};
use anyhow::Context;
use console::style;
use std::path::{Path, PathBuf};

/// Unpack each input into single-mipmap files next to it. A file that
/// fails to read or write is reported and the batch continues; the command
/// errors at the end if anything failed.
pub fn run(files: &[PathBuf]) -> anyhow::Result<()> {
    println!("Unpacking files:");

    let mut failed = 0usize;
    for file in files {
        if let Err(err) = unpack_one(file) {
            eprintln!("{} {err:#}", style("ERROR").red().bold());
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} files failed to unpack", files.len());
    }
    Ok(())
}

fn unpack_one(path: &Path) -> anyhow::Result<()> {
    let texture = read_paa(path).with_context(|| format!("failed to read {}", path.display()))?;
    println!("{}", style(path.display()).cyan());

    for mip in &texture.mipmaps {
        let mut single = texture.copy_without_mipmaps();
        single.mipmaps.push(mip.clone());

        let output = naming::unpack_name(path, mip.pixel_width());
        write_paa(&output, &mut single)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("  {}x{} -> {}", mip.pixel_width(), mip.height, output.display());
    }
    Ok(())
}
