use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::formats::paa::{MergeKey, MergeOptions, TemplateSource};

pub mod info;
pub mod merge;
pub mod unpack;

/// Dimension used to match levels across files (`--key`)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KeyArg {
    /// Match levels by pixel width
    Width,
    /// Match levels by height (legacy behavior)
    Height,
}

impl From<KeyArg> for MergeKey {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::Width => MergeKey::Width,
            KeyArg::Height => MergeKey::Height,
        }
    }
}

/// Which input donates the merged file's metadata (`--template`)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TemplateArg {
    /// The input whose largest mipmap is narrowest
    SmallestMax,
    /// The input whose largest mipmap is widest (legacy behavior)
    LargestMax,
}

impl From<TemplateArg> for TemplateSource {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::SmallestMax => TemplateSource::SmallestMax,
            TemplateArg::LargestMax => TemplateSource::LargestMax,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split each input into one single-mipmap PAA per level
    Unpack {
        /// Input .paa files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print format, tag, and mipmap details for each input
    Info {
        /// Input .paa files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit a machine-readable JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Combine the best mipmap per resolution from several files
    Merge {
        /// Output file; derived from the xxx_mipNNN_yy.paa input names
        /// when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input .paa files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Dimension used to match levels across files
        #[arg(long, value_enum, default_value_t = KeyArg::Width)]
        key: KeyArg,

        /// Which input donates the merged file's metadata
        #[arg(long, value_enum, default_value_t = TemplateArg::SmallestMax)]
        template: TemplateArg,
    },
}

impl Commands {
    pub fn execute(self) -> anyhow::Result<()> {
        match self {
            Self::Unpack { files } => unpack::run(&files),
            Self::Info { files, json } => info::run(&files, json),
            Self::Merge {
                output,
                files,
                key,
                template,
            } => merge::run(
                output,
                &files,
                MergeOptions {
                    key: key.into(),
                    template: template.into(),
                },
            ),
        }
    }
}
