use std::io::{self, Read};

use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::{json, Value};
use swap_library::swap::{
    errors::SwapError,
    evm::{
        codecs::curve_routes::CurveRoutesCodec,
        constants::{DEFAULT_MAX_HOPS, WAD_DECIMALS},
        fixed_point::parse_amount,
        utils::{decode_hex, parse_address},
    },
    models::{CurveRoute, PaddedRoute, Protocol, SwapConfig, UniswapParams},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
/// Build, inspect and query swap configs
///
/// Reads a JSON object from stdin. Addresses and byte strings are `0x` prefixed hex and
/// `max_slippage` is a decimal fraction ("0.02" is 2%).
///
/// `uniswap`:
/// ```json
/// { "max_slippage": "0.02", "fee_tier": 500, "router": "0x..." }
/// ```
///
/// `curve` (`pools` is optional on every route):
/// ```json
/// {
///     "max_slippage": "0.02",
///     "router": "0x...",
///     "routes": [{
///         "route": ["0x...", "0x...", "0x..."],
///         "swap_params": [[1, 0, 1, 1, 2]],
///         "pools": ["0x..."]
///     }]
/// }
/// ```
///
/// `decode`: `{ "config": "0x..." }`
///
/// `find-route`: `{ "custom_params": "0x...", "token_in": "0x...", "token_out": "0x..." }`
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Maximum number of hops of a Curve route
    #[arg(short, long, default_value_t = DEFAULT_MAX_HOPS)]
    max_hops: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode a single pool swap config
    Uniswap,
    /// Encode a Curve router swap config
    Curve,
    /// Decode an encoded swap config
    Decode,
    /// Find the Curve route connecting two tokens
    FindRoute,
}

#[derive(Deserialize)]
struct UniswapInput {
    max_slippage: String,
    fee_tier: u32,
    router: String,
}

#[derive(Deserialize)]
struct CurveRouteInput {
    route: Vec<String>,
    swap_params: Vec<Vec<u8>>,
    #[serde(default)]
    pools: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct CurveInput {
    max_slippage: String,
    router: String,
    routes: Vec<CurveRouteInput>,
}

#[derive(Deserialize)]
struct DecodeInput {
    config: String,
}

#[derive(Deserialize)]
struct FindRouteInput {
    custom_params: String,
    token_in: String,
    token_out: String,
}

fn parse_addresses(field: &str, values: &[String]) -> Result<Vec<Address>, SwapError> {
    values
        .iter()
        .map(|value| parse_address(field, value))
        .collect()
}

fn hex_string(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn config_json(config: &SwapConfig) -> Value {
    json!({
        "protocol": config.protocol,
        "max_slippage": config.max_slippage.to_string(),
        "custom_params": hex_string(&config.custom_params),
        "config": hex_string(&config.encode()),
    })
}

fn route_json(route: &PaddedRoute) -> Value {
    json!({
        "route": route.route().iter().map(|a| a.to_string()).collect::<Vec<_>>(),
        "swap_params": route.swap_params(),
        "pools": route.pools().iter().map(|a| a.to_string()).collect::<Vec<_>>(),
    })
}

fn build_uniswap(input: &str) -> Result<Value, SwapError> {
    let input: UniswapInput = serde_json::from_str(input)?;
    let config = SwapConfig::uniswap(
        parse_amount(&input.max_slippage, WAD_DECIMALS)?,
        input.fee_tier,
        parse_address("router", &input.router)?,
    )?;
    Ok(config_json(&config))
}

fn build_curve(input: &str, codec: &CurveRoutesCodec) -> Result<Value, SwapError> {
    let input: CurveInput = serde_json::from_str(input)?;
    let routes = input
        .routes
        .into_iter()
        .map(|route| {
            let pools = match route.pools {
                Some(pools) => Some(parse_addresses("pool", &pools)?),
                None => None,
            };
            CurveRoute::from_params(parse_addresses("route", &route.route)?, route.swap_params, pools)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let router = parse_address("router", &input.router)?;
    let custom_params = codec.encode(router, &routes)?;
    let config = SwapConfig::new(
        Protocol::CurveRouter,
        parse_amount(&input.max_slippage, WAD_DECIMALS)?,
        custom_params.into(),
    );
    Ok(config_json(&config))
}

fn decode(input: &str, codec: &CurveRoutesCodec) -> Result<Value, SwapError> {
    let input: DecodeInput = serde_json::from_str(input)?;
    let config = SwapConfig::decode(&decode_hex(&input.config)?)?;
    let mut output = config_json(&config);
    let params = match config.protocol {
        Protocol::Uniswap => {
            let params = UniswapParams::decode(&config.custom_params)?;
            json!({ "fee_tier": params.fee_tier, "router": params.router.to_string() })
        }
        Protocol::CurveRouter => {
            let routes = codec.decode(&config.custom_params)?;
            json!({
                "router": routes.router.to_string(),
                "routes": routes.routes.iter().map(route_json).collect::<Vec<_>>(),
            })
        }
        Protocol::Undefined => Value::Null,
    };
    output["params"] = params;
    Ok(output)
}

fn find_route(input: &str, codec: &CurveRoutesCodec) -> Result<Value, SwapError> {
    let input: FindRouteInput = serde_json::from_str(input)?;
    let token_in = parse_address("token_in", &input.token_in)?;
    let token_out = parse_address("token_out", &input.token_out)?;
    let (router, route) =
        codec.find_route(&decode_hex(&input.custom_params)?, token_in, token_out)?;
    let mut output = route_json(&route);
    output["router"] = json!(router.to_string());
    output["reversed"] = json!(route.token_in() != token_in);
    Ok(output)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    // Read from stdin until EOF
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| format!("Failed to read from stdin: {e}"))?;

    if buffer.trim().is_empty() {
        return Err("No input provided. Expected JSON input on stdin.".into());
    }

    let codec = CurveRoutesCodec::new(cli.max_hops)?;
    debug!(max_hops = codec.max_hops(), "Codec ready");
    let output = match cli.command {
        Commands::Uniswap => build_uniswap(&buffer)?,
        Commands::Curve => build_curve(&buffer, &codec)?,
        Commands::Decode => decode(&buffer, &codec)?,
        Commands::FindRoute => find_route(&buffer, &codec)?,
    };
    // Output the result as JSON to stdout
    println!(
        "{}",
        serde_json::to_string(&output).map_err(|e| format!("Failed to serialize output: {e}"))?
    );
    Ok(())
}
