//! Command line interface for the rebalance planner.
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use clmm_rebalance_domain::math::{Q96, ideal_value_share, sqrt_price_at_tick};
use clmm_rebalance_domain::{SqrtPriceX96, TickRange, Token, TokenAmount, plan};
use clmm_rebalance_execution::prelude::*;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde_json::json;

#[derive(Parser)]
#[command(name = "rebalance-cli")]
#[command(about = "Rebalance planning for concentrated-liquidity deposits", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PlanArgs {
    /// Lower tick bound of the target range
    #[arg(long)]
    tick_lower: i32,

    /// Upper tick bound of the target range
    #[arg(long)]
    tick_upper: i32,

    /// Current pool tick; the price is taken from the tick grid
    #[arg(long, conflicts_with = "sqrt_price_x96")]
    current_tick: Option<i32>,

    /// Current sqrt price as a raw Q64.96 decimal string
    #[arg(long)]
    sqrt_price_x96: Option<String>,

    /// Available token X balance in smallest units
    #[arg(long)]
    amount_x: i128,

    /// Available token Y balance in smallest units
    #[arg(long)]
    amount_y: i128,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the swap that balances two holdings for a tick range
    Plan {
        #[command(flatten)]
        args: PlanArgs,

        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the swap-then-mint sequence against in-memory collaborators
    Rehearse {
        #[command(flatten)]
        args: PlanArgs,

        /// Pool fee in basis points
        #[arg(long, default_value_t = 30)]
        fee_bps: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Plan { args, json } => run_plan(&args, json),
        Commands::Rehearse { args, fee_bps } => run_rehearse(&args, fee_bps).await,
    }
}

fn resolve_price(args: &PlanArgs) -> Result<SqrtPriceX96> {
    match (&args.current_tick, &args.sqrt_price_x96) {
        (Some(tick), None) => Ok(sqrt_price_at_tick(*tick)?),
        (None, Some(raw)) => {
            let value =
                U256::from_dec_str(raw).context("sqrt price must be a decimal integer")?;
            let price = SqrtPriceX96::new(value);
            price.validate()?;
            Ok(price)
        }
        _ => bail!("provide exactly one of --current-tick or --sqrt-price-x96"),
    }
}

fn run_plan(args: &PlanArgs, json: bool) -> Result<()> {
    let range = TickRange::new(args.tick_lower, args.tick_upper)?;
    let price = resolve_price(args)?;
    let amount_x = TokenAmount::from_signed(args.amount_x)?;
    let amount_y = TokenAmount::from_signed(args.amount_y)?;

    let result = plan(price, range, amount_x, amount_y)?;
    let share = ideal_value_share(
        price,
        sqrt_price_at_tick(range.lower())?,
        sqrt_price_at_tick(range.upper())?,
    );

    if json {
        let output = json!({
            "plan": result,
            "share_x_percent": percent(share.x_q96).to_string(),
            "share_y_percent": percent(share.y_q96).to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if result.is_no_op() {
        println!("Holdings already match the range; no swap needed.");
    } else {
        let (source, target) = match result.direction {
            clmm_rebalance_domain::SwapDirection::XForY => ("X", "Y"),
            clmm_rebalance_domain::SwapDirection::YForX => ("Y", "X"),
        };
        println!(
            "Swap {} of token {source} into token {target}",
            result.base_amount
        );
    }
    println!(
        "Ideal split at this price: {}% X / {}% Y",
        percent(share.x_q96),
        percent(share.y_q96)
    );
    Ok(())
}

async fn run_rehearse(args: &PlanArgs, fee_bps: u32) -> Result<()> {
    let range = TickRange::new(args.tick_lower, args.tick_upper)?;
    let price = resolve_price(args)?;
    let amount_x = TokenAmount::from_signed(args.amount_x)?;
    let amount_y = TokenAmount::from_signed(args.amount_y)?;

    let state = PoolState {
        pool: "rehearsal-pool".to_string(),
        token_x: Token::new("0x01", "X", 18),
        token_y: Token::new("0x02", "Y", 18),
        fee_bps,
        sqrt_price_x96: price,
        tick: args.current_tick.unwrap_or_default(),
    };
    let minter = LedgerMinter::new();
    let workflow = RebalanceWorkflow::new(
        FixedPoolReader::new(state.clone()),
        IdealSwapVenue::new(state),
        minter.clone(),
        WorkflowConfig::default(),
    );

    let outcome = workflow
        .execute("rehearsal-pool", range, amount_x, amount_y, "rehearsal")
        .await?;

    match outcome.swap {
        Some(receipt) => println!(
            "Swapped {} in for {} out",
            receipt.amount_in, receipt.amount_out
        ),
        None => println!("No swap was needed."),
    }
    if let Some(mint) = outcome.mint {
        println!(
            "Minted position {} with {} X and {} Y",
            mint.position_id, mint.used_x, mint.used_y
        );
    }
    Ok(())
}

/// Renders a Q96 fraction as a percentage with two decimals.
fn percent(q96: U256) -> Decimal {
    let bps = (q96 * U256::from(10_000u64) / Q96).as_u64();
    Decimal::new(bps as i64, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn percent_renders_q96_fractions() {
        assert_eq!(percent(Q96), dec!(100.00));
        assert_eq!(percent(Q96 / 2u64), dec!(50.00));
        assert_eq!(percent(U256::zero()), dec!(0.00));
    }
}
