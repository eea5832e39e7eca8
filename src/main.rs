use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use importscan::cli::Cli;
use importscan::logging;
use importscan::ImportScanner;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.scan_config()?;
    let root = config.root.clone();
    let mut scanner = ImportScanner::new(config).context("invalid --target-pkg")?;

    // Patterns are already merged into the config.
    if let Err(err) = scanner.try_scan_directory(&[]) {
        error!(root = %root.display(), error = %err, "scan aborted");
        std::process::exit(2);
    }

    scanner.print_results(&cli.output_format());

    let failed = scanner.failures().len();
    if failed > 0 {
        eprintln!("{} file(s) skipped because of read or parse errors", failed);
    }

    Ok(())
}
