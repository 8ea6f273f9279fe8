use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use linkqa_core::Mode;

use super::render::OutputFormat;

/// Ask a question about a set of web pages, or have them summarized.
#[derive(Debug, Parser)]
#[command(name = "linkqa", version)]
pub struct Cli {
    /// Source URL; repeat for several sources, in citation order.
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    #[arg(short, long, value_enum, default_value_t = ModeArg::Query)]
    pub mode: ModeArg,

    /// Question about the sources. Blank means the configured default question.
    #[arg(short, long)]
    pub query: Option<String>,

    /// RON configuration file. Defaults to ./linkqa.ron when present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = FormatArg::Markdown)]
    pub format: FormatArg,

    /// Write the rendered answer to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Edit the source list and submit from a line-based prompt.
    #[arg(short, long)]
    pub interactive: bool,

    /// More log output; repeat for trace level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Query,
    Summary,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Query => Mode::Query,
            ModeArg::Summary => Mode::Summary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Markdown,
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Html => OutputFormat::Html,
        }
    }
}
