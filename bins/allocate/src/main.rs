//! Apportion allocation CLI
//!
//! Usage:
//!   allocate <CODE> <AMOUNT> parts <N> [--json]
//!   allocate <CODE> <AMOUNT> ratios <P1> <P2> ... [--json]

use std::str::FromStr;

use anyhow::{Context, bail};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apportion_core::{Allocate, Allocation, AllocationRequest, CurrencyRegistry};
use apportion_shared::{Money, MoneyConfig};

const USAGE: &str = "usage: allocate <CODE> <AMOUNT> (parts <N> | ratios <P1> <P2> ...) [--json]";

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct Command {
    code: String,
    amount: Decimal,
    request: AllocationRequest,
    json: bool,
}

fn parse_args<I>(args: I) -> anyhow::Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let (flags, positional): (Vec<String>, Vec<String>) =
        args.into_iter().partition(|arg| arg.starts_with("--"));

    let json = match flags.as_slice() {
        [] => false,
        [flag] if flag == "--json" => true,
        _ => bail!("unknown flags {flags:?}\n{USAGE}"),
    };

    let [code, amount, kind, values @ ..] = positional.as_slice() else {
        bail!("{USAGE}");
    };

    let amount = Decimal::from_str(amount).with_context(|| format!("invalid amount '{amount}'"))?;

    let request = match (kind.as_str(), values) {
        ("parts", [n]) => {
            let n: i64 = n.parse().with_context(|| format!("invalid part count '{n}'"))?;
            AllocationRequest::even(n)?
        }
        ("ratios", values) if !values.is_empty() => {
            let ratios = values
                .iter()
                .map(|value| {
                    Decimal::from_str(value).with_context(|| format!("invalid ratio '{value}'"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            AllocationRequest::ratios(&ratios)?
        }
        _ => bail!("{USAGE}"),
    };

    Ok(Command {
        code: code.clone(),
        amount,
        request,
        json,
    })
}

fn render(allocation: &Allocation) -> anyhow::Result<String> {
    let mut out = format!(
        "{} -> {} (reverse {}, difference {})\n",
        allocation.money(),
        allocation.strategy(),
        allocation.reverse(),
        allocation.difference()?,
    );
    for (index, (share, adjustment)) in allocation
        .allocations()
        .iter()
        .zip(allocation.adjustments())
        .enumerate()
    {
        out.push_str(&format!("  #{:<3} {share}  (adjustment {adjustment})\n", index + 1));
    }
    out.push_str(&format!(
        "  total {}\n",
        allocation.details().allocations_total()?
    ));
    Ok(out)
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apportion=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = parse_args(std::env::args().skip(1))?;

    // Load configuration
    let config = MoneyConfig::load().context("failed to load configuration")?;

    let registry = CurrencyRegistry::builder()
        .cache_config(&config.cache)
        .build();
    let currency = registry.resolve(&command.code)?;
    let rounding = config.rounding_for(&currency);
    info!(currency = %currency, rounding = %rounding, request = %command.request, "allocating");

    let money = Money::with_rounding(command.amount, currency, rounding);
    let allocation = money.allocate(&command.request)?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&allocation)?);
    } else {
        print!("{}", render(&allocation)?);
    }

    Ok(())
}
