use clap::Parser;
use keytally::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    // Bad or missing arguments print usage and exit successfully.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return Ok(());
        }
    };

    let (config, config_error) = cli::load_config(&cli);
    keytally::logging::init(cli.debug, &config.logging)?;
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "config could not be loaded, using defaults");
    }

    cli::run(cli, &config)
}
