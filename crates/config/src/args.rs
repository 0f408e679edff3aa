use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.testnet)
    #[arg(short, long, default_value = ".env")]
    pub env_file: String,

    /// Network to fetch; repeat to fetch several. Overrides RA_NETWORKS.
    #[arg(short, long = "network")]
    pub networks: Vec<String>,

    /// Directory holding the registry snapshots. Overrides RA_SNAPSHOT_DIR.
    #[arg(long)]
    pub snapshot_dir: Option<String>,

    /// Directory to write the aggregated dataset to. Overrides RA_OUTPUT_DIR.
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
