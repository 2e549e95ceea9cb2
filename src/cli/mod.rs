// CLI module for studygenius

use clap::Parser;

/// studygenius - Stateless study-material generation gateway for the Gemini API
#[derive(Parser, Debug)]
#[command(name = "studygenius", version, about, long_about = None)]
pub struct Args {
    /// Override the configured bind address
    #[arg(long)]
    pub host: Option<String>,

    /// Override the configured port
    #[arg(long)]
    pub port: Option<u16>,
}
