//! Subcommand implementations

pub mod compare;
pub mod plan;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use tracing::info;
use trade_ladder::{Config, Side, TpAlgorithm};

/// Plan inputs shared by every subcommand; flags override the config file
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to a JSON plan file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Upper price level
    #[arg(long)]
    pub upper: Option<Decimal>,

    /// Lower price level
    #[arg(long)]
    pub lower: Option<Decimal>,

    /// Number of entry orders
    #[arg(short, long)]
    pub orders: Option<usize>,

    /// Stop-loss percentage from DCA
    #[arg(long)]
    pub sl: Option<Decimal>,

    /// Minimum take-profit percentage from DCA
    #[arg(long)]
    pub min_tp: Option<Decimal>,

    /// Maximum take-profit percentage from DCA
    #[arg(long)]
    pub max_tp: Option<Decimal>,

    /// Plan a buy (long) position
    #[arg(long, conflicts_with = "sell")]
    pub buy: bool,

    /// Plan a sell (short) position
    #[arg(long)]
    pub sell: bool,

    /// TP algorithm (linear, exponential, fibonacci, logarithmic)
    #[arg(short, long)]
    pub algorithm: Option<String>,
}

impl PlanArgs {
    /// Load the config (file or defaults) and apply command-line overrides
    pub fn resolve(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let config = Config::from_file(path)?;
                info!("Loaded configuration from: {}", path);
                config
            }
            None => Config::from_env()?,
        };
        let plan = &mut config.plan;

        if let Some(upper) = self.upper {
            info!("Overriding upper price to: {}", upper);
            plan.upper_price = upper;
        }
        if let Some(lower) = self.lower {
            info!("Overriding lower price to: {}", lower);
            plan.lower_price = lower;
        }
        if let Some(orders) = self.orders {
            info!("Overriding order count to: {}", orders);
            plan.num_orders = orders;
        }
        if let Some(sl) = self.sl {
            info!("Overriding stop-loss to: {}%", sl);
            plan.sl_pct = sl;
        }
        if let Some(min_tp) = self.min_tp {
            info!("Overriding minimum TP to: {}%", min_tp);
            plan.min_tp_pct = min_tp;
        }
        if let Some(max_tp) = self.max_tp {
            info!("Overriding maximum TP to: {}%", max_tp);
            plan.max_tp_pct = max_tp;
        }
        if self.buy || self.sell {
            plan.side = Side::from_is_buy(self.buy);
            info!("Overriding side to: {}", plan.side);
        }
        if let Some(name) = self.algorithm {
            plan.algorithm = TpAlgorithm::from_name(&name);
            info!("Overriding TP algorithm to: {}", plan.algorithm);
        }

        Ok(config)
    }
}
