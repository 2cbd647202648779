//! DropCraft CLI
//!
//! Generates claim and relay transactions for the multi-wave airdrop.
//! Every command prints one JSON document on stdout; logs go to stderr.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use alloy_primitives::utils::{parse_units, ParseUnits};
use alloy_primitives::{hex, U256};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{debug, info};

use dropcraft_aggregator::Allocation;
use dropcraft_core::DropCraftError;
use dropcraft_logging::{try_init as try_init_logging, LogLevel};
use dropcraft_settings::{RelaySettings, Settings, DEFAULT_SETTINGS_FILE};
use dropcraft_settlement::{
    to_json_pretty, BaseCostOracle, ClaimAssembler, FixedCostOracle, RelayAssembler,
    RpcCostOracle,
};

/// DropCraft - airdrop claim transaction generator
#[derive(Parser)]
#[command(name = "dropcraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    /// Base directory for relative allocation and alias list paths
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Claim calldata for an address claiming directly on L2
    GenerateL2ContractClaimTx {
        /// L2 address
        address: String,
    },

    /// Bridgehub transaction claiming on behalf of an L1 contract
    GenerateL1ContractClaimTx {
        /// L1 contract address
        address: String,

        #[command(flatten)]
        l1: L1Args,
    },

    /// Bridgehub transaction moving claimed tokens out of an L1 contract's
    /// L2 alias
    GenerateL1TransferTx {
        /// L1 contract address (owner of the tokens on L2)
        from: String,

        /// Recipient on L2
        to: String,

        /// Amount in the token's smallest unit
        amount: String,

        #[command(flatten)]
        l1: L1Args,
    },

    /// Show every wave's distributor, leaf count and Merkle root
    Roots,
}

#[derive(clap::Args)]
struct L1Args {
    /// L1 gas price in gwei
    #[arg(long)]
    l1_gas_price: String,

    /// L1 JSON-RPC endpoint (overrides the settings file)
    #[arg(long)]
    l1_json_rpc: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    try_init_logging(LogLevel::from_verbosity(cli.verbose))
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let settings = Settings::load_from(&cli.config)
        .with_context(|| format!("failed to load settings from {}", cli.config.display()))?;

    let output = match cli.command {
        Commands::GenerateL2ContractClaimTx { address } => {
            let allocation = load_allocation(&settings, &cli.data_dir)?;
            let response = ClaimAssembler::new(&allocation).l2_claims(&address)?;
            to_json_pretty(&response)?
        }
        Commands::GenerateL1ContractClaimTx { address, l1 } => {
            let gas_price = parse_gas_price(&l1.l1_gas_price)?;
            let allocation = load_allocation(&settings, &cli.data_dir)?;
            let claims = ClaimAssembler::new(&allocation).l1_claims(&address)?;

            let relay = relay_assembler(&settings.relay, l1.l1_json_rpc)?;
            let response = relay.relay_claims(&claims, gas_price).await?;
            to_json_pretty(&response)?
        }
        Commands::GenerateL1TransferTx {
            from,
            to,
            amount,
            l1,
        } => {
            let gas_price = parse_gas_price(&l1.l1_gas_price)?;
            let relay = relay_assembler(&settings.relay, l1.l1_json_rpc)?;
            let response = relay
                .relay_transfer(settings.relay.l2_token, &from, &to, &amount, gas_price)
                .await?;
            to_json_pretty(&response)?
        }
        Commands::Roots => {
            let allocation = load_allocation(&settings, &cli.data_dir)?;
            to_json_pretty(&roots(&allocation))?
        }
    };

    println!("{}", output);
    Ok(())
}

fn load_allocation(settings: &Settings, data_dir: &Path) -> Result<Allocation> {
    let inputs = settings
        .load_wave_inputs(data_dir)
        .context("failed to load wave inputs")?;
    let allocation = Allocation::build(&inputs.allocations, &inputs.aliases, &inputs.distributors)?;
    info!("Loaded {} wave(s)", allocation.waves().len());
    Ok(allocation)
}

/// Where the relay base cost comes from.
#[derive(Debug, PartialEq)]
enum CostSource {
    Rpc(String),
    Fixed(U256),
}

/// `--l1-json-rpc` wins, then a configured fixed cost, then the configured
/// endpoint (mainnet unless overridden in the settings file).
fn cost_source(settings: &RelaySettings, rpc_override: Option<String>) -> Result<CostSource> {
    Ok(match (rpc_override, settings.fixed_base_cost_wei()?) {
        (Some(url), _) => CostSource::Rpc(url),
        (None, Some(cost)) => CostSource::Fixed(cost),
        (None, None) => CostSource::Rpc(settings.rpc_url.clone()),
    })
}

fn relay_assembler(settings: &RelaySettings, rpc_override: Option<String>) -> Result<RelayAssembler> {
    let oracle: Arc<dyn BaseCostOracle> = match cost_source(settings, rpc_override)? {
        CostSource::Rpc(url) => Arc::new(rpc_oracle(settings, url)?),
        CostSource::Fixed(cost) => {
            debug!("Using fixed base cost {} wei", cost);
            Arc::new(FixedCostOracle::new(cost))
        }
    };

    Ok(RelayAssembler::new(settings.config.clone(), oracle))
}

fn rpc_oracle(settings: &RelaySettings, url: String) -> Result<RpcCostOracle> {
    debug!("Using L1 endpoint {}", url);
    RpcCostOracle::with_timeout(url, settings.config.bridgehub, settings.rpc_timeout())
        .map_err(DropCraftError::from)
        .context("failed to build L1 client")
}

/// Decimal gwei → wei.
fn parse_gas_price(gwei: &str) -> Result<U256> {
    let parsed = parse_units(gwei.trim(), "gwei").map_err(|e| {
        DropCraftError::Validation(format!("invalid L1 gas price '{}': {}", gwei, e))
    })?;
    match parsed {
        ParseUnits::U256(wei) => Ok(wei),
        ParseUnits::I256(_) => Err(DropCraftError::Validation(format!(
            "negative L1 gas price '{}'",
            gwei
        ))
        .into()),
    }
}

/// One entry per wave in input order. An empty wave reports the 32-byte
/// zero root, not an empty `0x`.
fn roots(allocation: &Allocation) -> serde_json::Value {
    let waves: Vec<_> = allocation
        .waves()
        .iter()
        .enumerate()
        .map(|(index, wave)| {
            json!({
                "wave": index + 1,
                "distributor": wave.distributor().to_checksum(None),
                "leaves": wave.len(),
                "root": hex::encode_prefixed(wave.root()),
            })
        })
        .collect();
    json!({ "waves": waves })
}
