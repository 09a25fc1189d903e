use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "repositor",
    version,
    about = "Replenishment list builder for sales report dumps"
)]
pub struct Cli {
    /// Text dump produced by the PDF extraction step; stdin when omitted
    pub input: Option<PathBuf>,

    /// JSON file overriding the built-in category rules
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// JSON file overriding the built-in normalization chains
    #[arg(long)]
    pub chains: Option<PathBuf>,

    /// Title line prepended to the rendered message
    #[arg(long, default_value = "REPOSICION")]
    pub title: String,

    /// Print the aggregated entries as JSON instead of the message
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Also export the aggregated entries to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
