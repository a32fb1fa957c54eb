use clap::Parser;
use profiledrill::{init_logging, run, Cli};
use tracing::{debug, warn};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    debug!("profiledrill {} (built {})", profiledrill::VERSION, profiledrill::BUILD_DATE);

    let cli = Cli::parse();
    let summary = run(&cli)?;

    for (name, reason) in &summary.failed {
        warn!("Profile {} not written: {}", name, reason);
    }
    println!(
        "{} profiles with holes, {} without holes skipped, {} programs written",
        summary.profiles,
        summary.dropped,
        summary.written.len()
    );

    Ok(())
}
