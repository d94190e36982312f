use std::{env, sync::Arc};

use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
};
use tokio::runtime::{Handle, Runtime};

use crate::swap::errors::SwapError;

/// Safely converts a byte slice to an `Address`.
///
/// Checks the length of the slice before attempting to convert, and returns a `SwapError` if it
/// is not 20 bytes long.
pub fn bytes_to_address(address: &[u8]) -> Result<Address, SwapError> {
    if address.len() == 20 {
        Ok(Address::from_slice(address))
    } else {
        Err(SwapError::InvalidInput(format!("Invalid address: 0x{}", hex::encode(address))))
    }
}

/// Parses a hex string into an `Address`, with a readable error naming the field.
pub fn parse_address(field: &str, value: &str) -> Result<Address, SwapError> {
    value
        .parse::<Address>()
        .map_err(|_| SwapError::InvalidInput(format!("Invalid {field} address: {value}")))
}

/// Decodes a `0x` prefixed (or bare) hex string.
pub fn decode_hex(value: &str) -> Result<Vec<u8>, SwapError> {
    let stripped = value
        .strip_prefix("0x")
        .unwrap_or(value);
    hex::decode(stripped).map_err(|e| SwapError::InvalidInput(format!("Invalid hex {value}: {e}")))
}

pub fn get_runtime() -> Result<(Handle, Option<Arc<Runtime>>), SwapError> {
    match Handle::try_current() {
        Ok(h) => Ok((h, None)),
        Err(_) => {
            let rt = Arc::new(Runtime::new().map_err(|_| {
                SwapError::FatalError("Failed to create a new tokio runtime".to_string())
            })?);
            Ok((rt.handle().clone(), Some(rt)))
        }
    }
}

/// Gets the client used for interacting with the EVM-compatible network.
pub fn get_client() -> Result<DynProvider, SwapError> {
    dotenv::dotenv().ok();
    let eth_rpc_url = env::var("RPC_URL")
        .map_err(|_| SwapError::FatalError("Missing RPC_URL in environment".to_string()))?;
    let url = eth_rpc_url
        .parse()
        .map_err(|_| SwapError::FatalError(format!("Invalid RPC_URL: {eth_rpc_url}")))?;
    Ok(ProviderBuilder::new()
        .connect_http(url)
        .erased())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_address() {
        let bytes = [0x11u8; 20];
        assert_eq!(bytes_to_address(&bytes).unwrap(), Address::from([0x11u8; 20]));
        assert!(matches!(bytes_to_address(&bytes[..19]), Err(SwapError::InvalidInput(_))));
    }

    #[test]
    fn test_decode_hex_with_and_without_prefix() {
        assert_eq!(decode_hex("0x0102").unwrap(), vec![1, 2]);
        assert_eq!(decode_hex("0102").unwrap(), vec![1, 2]);
        assert!(decode_hex("0xzz").is_err());
    }

    #[test]
    fn test_parse_address() {
        let address = parse_address("router", "0xE592427A0AEce92De3Edee1F18E0157C05861564").unwrap();
        assert_eq!(address.to_string(), "0xE592427A0AEce92De3Edee1F18E0157C05861564");
        assert!(parse_address("router", "0x1234").is_err());
    }
}
