//! CLI for mfdl.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use mfdl_core::config::{self, MfdlConfig};
use mfdl_core::transport::CurlTransport;
use std::io;
use std::path::PathBuf;

use commands::{prompt_url, run_download, run_speed_test};

/// Download a file from a MediaFire landing page.
#[derive(Debug, Parser)]
#[command(name = "mfdl")]
#[command(about = "mfdl: resolve a MediaFire link and download the file", long_about = None)]
pub struct Cli {
    /// MediaFire landing-page URL. Prompted for when omitted.
    pub url: Option<String>,

    /// Directory to save the file in (default: current directory).
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Measure network throughput first; skip the download if it fails.
    #[arg(long)]
    pub speed_test: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let cfg = match config::load_or_init() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("could not load config, using defaults: {:#}", e);
                MfdlConfig::default()
            }
        };
        tracing::debug!("loaded config: {:?}", cfg);

        let transport = CurlTransport::new(cfg.user_agent.clone());

        if (self.speed_test || cfg.speed_test_enabled())
            && !run_speed_test(&transport, cfg.speed_test_url())
        {
            return Ok(());
        }

        let input = match self.url {
            Some(url) => url,
            None => prompt_url(io::stdin().lock(), io::stdout()).context("read URL from stdin")?,
        };

        let dest_dir = match self.output_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("current directory")?,
        };

        run_download(&cfg, &transport, &input, &dest_dir);
        Ok(())
    }
}
