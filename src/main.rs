//! # nuget-sweep CLI
//!
//! The command-line interface for nuget-sweep, a tool that reclaims disk
//! space by pruning stale and superseded versions from the NuGet
//! global-packages cache.
//!
//! ## Quick Start
//!
//! ```bash
//! # Dry run: report what a 90-day sweep would reclaim
//! nuget-sweep
//!
//! # Actually delete, with a 30-day threshold
//! nuget-sweep --force --min-days 30
//!
//! # Also drop versions superseded by a newer one
//! nuget-sweep --force --prune-superseded
//! ```
//!
//! ## Environment Variables
//!
//! - `NUGET_SWEEP_CACHE_DIR`: Override the cache root (default: ~/.nuget/packages)
//! - `NUGET_SWEEP_MIN_DAYS`: Idle threshold in days (default: 90)
//! - `NUGET_SWEEP_FORCE`: Perform deletions instead of a dry run
//! - `NUGET_SWEEP_PRUNE_SUPERSEDED`: Enable superseded-version pruning
//! - `NUGET_SWEEP_VERBOSE`: Enable verbose output
//! - `NUGET_SWEEP_QUIET`: Silence all output except warnings and errors

use std::io::IsTerminal;

use nuget_sweep::cli::Cli;

fn main() -> miette::Result<()> {
    // Install miette's fancy panic and error report handler
    miette::set_panic_hook();

    // Configure miette handler based on terminal capabilities
    // This provides better error formatting for both TTY and non-TTY environments
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        // Use a simpler handler for non-TTY environments (CI, logs, etc.)
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Execute the sweep
    let result = nuget_sweep::commands::execute(&cli);

    // Convert our error type to miette's Result
    result.map_err(Into::into)
}
