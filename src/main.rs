use std::io;
use std::sync::OnceLock;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use sortscope::app::App;
use sortscope::config::{Cli, Config};

/// Logs go to stderr so `--plain` output stays clean on stdout.
fn init_tracing() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(io::stderr)
            .try_init()
            .ok();
    });
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::try_from(Cli::parse()).context("invalid arguments")?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let plain = config.plain;
    let app = App::new(config, rng);
    if plain {
        app.run_plain(&mut io::stdout().lock())
            .context("plain run failed")?;
    } else {
        app.run().context("terminal session failed")?;
    }
    Ok(())
}
