//! Plan command implementation

use anyhow::{Context, Result};
use trade_ladder::{compute_plan, report};
use tracing::info;

use super::PlanArgs;

pub fn run(args: PlanArgs, json: bool) -> Result<()> {
    let config = args.resolve()?;

    let plan = compute_plan(&config.plan).context("Failed to compute trade plan")?;
    info!(
        "Computed {} orders around DCA {}",
        plan.entry_prices.len(),
        plan.dca_price
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?
        );
    } else {
        print!("{}", report::render_plan(&plan, &config.display));
    }

    Ok(())
}
