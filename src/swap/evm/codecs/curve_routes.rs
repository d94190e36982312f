use alloy::primitives::Address;
use tracing::debug;

use crate::swap::{
    errors::SwapError,
    evm::{
        constants::{ADDRESS_SIZE, DEFAULT_MAX_HOPS},
        utils::bytes_to_address,
    },
    models::{CurveRoute, CurveRoutesConfig, PaddedRoute, SwapParams, SWAP_PARAMS_LEN},
};

/// Encodes and decodes the custom params of a Curve router swap config.
///
/// The params are a packed byte stream (no ABI padding):
///
/// ```text
/// router (20) | n_routes (1) | route_0 | route_1 | ...
/// route = n_hops (1) | route addresses (20 * (2 * n_hops + 1))
///       | swap params (5 * n_hops, row major) | pools (20 * n_hops)
/// ```
///
/// There is no length prefix besides each route's hop count, so decoding walks the stream route
/// by route. Decoding never trusts the input: any truncated field, hop count out of range or
/// trailing byte rejects the whole blob.
///
/// # Fields
/// * `max_hops` - Maximum number of hops of a route. Decoded routes are padded to this size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveRoutesCodec {
    max_hops: usize,
}

impl Default for CurveRoutesCodec {
    fn default() -> Self {
        Self { max_hops: DEFAULT_MAX_HOPS }
    }
}

impl CurveRoutesCodec {
    pub fn new(max_hops: usize) -> Result<Self, SwapError> {
        if max_hops == 0 || max_hops > u8::MAX as usize {
            return Err(SwapError::InvalidInput(format!(
                "Max hops must be between 1 and {}, got {max_hops}",
                u8::MAX
            )));
        }
        Ok(Self { max_hops })
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    pub fn encode(&self, router: Address, routes: &[CurveRoute]) -> Result<Vec<u8>, SwapError> {
        let n_routes = u8::try_from(routes.len()).map_err(|_| SwapError::TooManyRoutes(routes.len()))?;
        let size = ADDRESS_SIZE +
            1 +
            routes
                .iter()
                .map(CurveRoute::encoded_len)
                .sum::<usize>();

        let mut encoded = Vec::with_capacity(size);
        encoded.extend_from_slice(router.as_slice());
        encoded.push(n_routes);
        for route in routes {
            let hops = route.hops();
            if hops > self.max_hops {
                return Err(SwapError::TooManyHops { hops, max_hops: self.max_hops });
            }
            // max_hops <= u8::MAX
            encoded.push(hops as u8);
            for address in route.route() {
                encoded.extend_from_slice(address.as_slice());
            }
            for params in route.swap_params() {
                encoded.extend_from_slice(params);
            }
            for pool in route.pools() {
                encoded.extend_from_slice(pool.as_slice());
            }
        }
        Ok(encoded)
    }

    pub fn decode(&self, data: &[u8]) -> Result<CurveRoutesConfig, SwapError> {
        let mut reader = ByteReader::new(data);
        let router = bytes_to_address(reader.read(ADDRESS_SIZE)?)?;
        let n_routes = reader.read_u8()? as usize;

        let mut routes = Vec::with_capacity(n_routes);
        for _ in 0..n_routes {
            routes.push(self.decode_route(&mut reader)?);
        }
        if reader.remaining() > 0 {
            return Err(SwapError::TrailingBytes(reader.remaining()));
        }
        Ok(CurveRoutesConfig { router, routes })
    }

    fn decode_route(&self, reader: &mut ByteReader) -> Result<PaddedRoute, SwapError> {
        let hops = reader.read_u8()? as usize;
        if hops == 0 {
            return Err(SwapError::InvalidRouteLength(1));
        }
        if hops > self.max_hops {
            return Err(SwapError::TooManyHops { hops, max_hops: self.max_hops });
        }

        let route = reader
            .read(ADDRESS_SIZE * (2 * hops + 1))?
            .chunks_exact(ADDRESS_SIZE)
            .map(Address::from_slice)
            .collect();
        let swap_params = reader
            .read(SWAP_PARAMS_LEN * hops)?
            .chunks_exact(SWAP_PARAMS_LEN)
            .map(|chunk| {
                let mut params: SwapParams = [0u8; SWAP_PARAMS_LEN];
                params.copy_from_slice(chunk);
                params
            })
            .collect();
        let pools = reader
            .read(ADDRESS_SIZE * hops)?
            .chunks_exact(ADDRESS_SIZE)
            .map(Address::from_slice)
            .collect();

        let route = CurveRoute::new(route, swap_params, Some(pools))?;
        PaddedRoute::pad(&route, self.max_hops)
    }

    /// Checks the params can be decoded and hold a usable configuration.
    pub fn validate(&self, data: &[u8]) -> Result<CurveRoutesConfig, SwapError> {
        let config = self.decode(data)?;
        if config.routes.is_empty() {
            return Err(SwapError::AtLeastOneRoute);
        }
        if config.router == Address::ZERO {
            return Err(SwapError::CurveRouterCannotBeZero);
        }
        Ok(config)
    }

    /// Finds the first route connecting `token_in` and `token_out`, in either direction.
    ///
    /// A route matches if it starts at `token_in` and ends at `token_out`, or the reverse. The
    /// route is returned as encoded (it is not reversed) together with the router address.
    pub fn find_route(
        &self,
        data: &[u8],
        token_in: Address,
        token_out: Address,
    ) -> Result<(Address, PaddedRoute), SwapError> {
        let config = self.validate(data)?;
        let route = config
            .find_route(token_in, token_out)?
            .clone();
        Ok((config.router, route))
    }
}

impl CurveRoutesConfig {
    /// Returns the first route connecting `token_in` and `token_out`, in either direction.
    pub fn find_route(&self, token_in: Address, token_out: Address) -> Result<&PaddedRoute, SwapError> {
        let position = self
            .routes
            .iter()
            .position(|route| {
                (route.token_in() == token_in && route.token_out() == token_out) ||
                    (route.token_in() == token_out && route.token_out() == token_in)
            })
            .ok_or(SwapError::RouteNotFound { token_in, token_out })?;
        debug!(%token_in, %token_out, position, n_routes = self.routes.len(), "Curve route found");
        Ok(&self.routes[position])
    }
}

/// Cursor over the packed routes that refuses to read past the end of the data.
struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn read(&mut self, len: usize) -> Result<&'a [u8], SwapError> {
        if len > self.remaining() {
            return Err(SwapError::UnexpectedEndOfData {
                offset: self.offset,
                needed: len,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, SwapError> {
        Ok(self.read(1)?[0])
    }
}
