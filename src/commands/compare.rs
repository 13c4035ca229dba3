//! Compare command implementation

use anyhow::{Context, Result};
use trade_ladder::{compare_algorithms, report};
use tracing::{info, warn};

use super::PlanArgs;

pub fn run(args: PlanArgs) -> Result<()> {
    let config = args.resolve()?;

    info!("Comparing TP algorithms");
    let rows = compare_algorithms(&config.plan).context("Failed to compute TP ladders")?;

    for row in &rows {
        if let Err(e) = &row.tp_prices {
            warn!("{} rejected the inputs: {}", row.algorithm, e);
        }
    }

    print!("{}", report::render_comparison(&rows, &config.display));

    Ok(())
}
