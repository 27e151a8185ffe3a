use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docana",
    about = "Docana: compose the DOCUMENTATION block of a simulation README",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the README from input files, overrides, and optional run stats
    Render {
        /// Simulation input file(s), read in order
        #[arg(long = "input", required = true)]
        inputs: Vec<String>,

        /// Command-line override, e.g. "GENRANGE_REDSHIFT 0.1 0.5"
        #[arg(long = "set")]
        overrides: Vec<String>,

        /// Report configuration (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Run statistics (JSON); without it only pass 1 is written
        #[arg(long)]
        stats: Option<String>,

        /// README path; the document goes to stdout when omitted
        #[arg(long)]
        out: Option<String>,

        /// Rate-model summary line for INPUT_NOTES (repeatable)
        #[arg(long = "rate-line")]
        rate_lines: Vec<String>,

        /// Expected events per season, for the per-season yield
        #[arg(long, default_value_t = 0.0)]
        season_count: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the documented keys per registry without rendering
    Keys {
        /// Simulation input file(s), read in order
        #[arg(long = "input", required = true)]
        inputs: Vec<String>,

        /// Command-line override, e.g. "NGENTOT_LC 500"
        #[arg(long = "set")]
        overrides: Vec<String>,

        /// Report configuration (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
