use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::{Arc, RwLock},
};

use alloy::primitives::{Address, U256};
use chrono::Utc;
use tracing::{debug, warn};

use crate::swap::{
    errors::SwapError,
    evm::{
        backends::{
            interfaces::ISwapRouter::{ExactInputSingleParams, ExactOutputSingleParams},
            SinglePoolRouter, TokenMetadata,
        },
        fixed_point::{amount_out_at_price, convert_decimals, wad_mul},
    },
};

/// Permissions of the [`P2PRouter`].
///
/// - `Admin`: grants and revokes roles.
/// - `Pricer`: sets the price of token pairs.
/// - `Swap`: executes swaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Pricer,
    Swap,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "ADMIN",
            Role::Pricer => "PRICER",
            Role::Swap => "SWAP",
        };
        write!(f, "{name}")
    }
}

/// Single pool router filling swaps at a price set by a pricer account.
///
/// Prices are stored per ordered pair `(token_in, token_out)` as the amount of `token_in` paid
/// for one `token_out`, in wad. Swaps only compute amounts and enforce the limits of the params:
/// no balances are moved.
pub struct P2PRouter {
    token_metadata: Arc<dyn TokenMetadata>,
    roles: RwLock<HashMap<Role, HashSet<Address>>>,
    prices: RwLock<HashMap<(Address, Address), U256>>,
}

impl P2PRouter {
    /// Creates the router with `admin` holding the `Admin` role.
    pub fn new(admin: Address, token_metadata: Arc<dyn TokenMetadata>) -> Self {
        let roles = HashMap::from([(Role::Admin, HashSet::from([admin]))]);
        Self { token_metadata, roles: RwLock::new(roles), prices: RwLock::new(HashMap::new()) }
    }

    pub fn has_role(&self, role: Role, account: Address) -> Result<bool, SwapError> {
        let roles = self
            .roles
            .read()
            .map_err(|_| poisoned())?;
        Ok(roles
            .get(&role)
            .is_some_and(|accounts| accounts.contains(&account)))
    }

    fn check_role(&self, role: Role, account: Address) -> Result<(), SwapError> {
        if self.has_role(role, account)? {
            Ok(())
        } else {
            Err(SwapError::MissingRole { account, role: role.to_string() })
        }
    }

    pub fn grant_role(&self, caller: Address, role: Role, account: Address) -> Result<(), SwapError> {
        self.check_role(Role::Admin, caller)?;
        self.roles
            .write()
            .map_err(|_| poisoned())?
            .entry(role)
            .or_default()
            .insert(account);
        Ok(())
    }

    pub fn revoke_role(
        &self,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), SwapError> {
        self.check_role(Role::Admin, caller)?;
        if let Some(accounts) = self
            .roles
            .write()
            .map_err(|_| poisoned())?
            .get_mut(&role)
        {
            accounts.remove(&account);
        }
        Ok(())
    }

    /// Sets the price of `token_in` in terms of `token_out`. Only the given direction is set.
    pub fn set_current_price(
        &self,
        caller: Address,
        token_in: Address,
        token_out: Address,
        price: U256,
    ) -> Result<(), SwapError> {
        self.check_role(Role::Pricer, caller)?;
        if price.is_zero() {
            return Err(SwapError::InvalidInput("Price cannot be zero".to_string()));
        }
        self.prices
            .write()
            .map_err(|_| poisoned())?
            .insert((token_in, token_out), price);
        debug!(%token_in, %token_out, %price, "Price updated");
        Ok(())
    }

    pub fn current_price(&self, token_in: Address, token_out: Address) -> Result<U256, SwapError> {
        self.prices
            .read()
            .map_err(|_| poisoned())?
            .get(&(token_in, token_out))
            .copied()
            .ok_or(SwapError::PriceNotSet { token_in, token_out })
    }

    fn check_swap(
        &self,
        caller: Address,
        amount: U256,
        recipient: Address,
        deadline: U256,
    ) -> Result<(), SwapError> {
        self.check_role(Role::Swap, caller)?;
        if amount.is_zero() {
            return Err(SwapError::ZeroAmount);
        }
        if recipient == Address::ZERO {
            return Err(SwapError::InvalidRecipient(recipient));
        }
        let now = Utc::now().timestamp().max(0) as u64;
        if deadline < U256::from(now) {
            return Err(SwapError::DeadlineExpired { deadline, now });
        }
        Ok(())
    }
}

impl SinglePoolRouter for P2PRouter {
    fn exact_input_single(
        &self,
        caller: Address,
        params: ExactInputSingleParams,
    ) -> Result<U256, SwapError> {
        self.check_swap(caller, params.amountIn, params.recipient, params.deadline)?;
        let price = self.current_price(params.tokenIn, params.tokenOut)?;
        let amount_out = amount_out_at_price(
            params.amountIn,
            self.token_metadata
                .decimals(params.tokenIn)?,
            self.token_metadata
                .decimals(params.tokenOut)?,
            price,
        )?;
        if amount_out < params.amountOutMinimum {
            warn!(%amount_out, minimum = %params.amountOutMinimum, "Rejecting exact input swap");
            return Err(SwapError::OutputBelowMinimum {
                amount: amount_out,
                minimum: params.amountOutMinimum,
            });
        }
        Ok(amount_out)
    }

    fn exact_output_single(
        &self,
        caller: Address,
        params: ExactOutputSingleParams,
    ) -> Result<U256, SwapError> {
        self.check_swap(caller, params.amountOut, params.recipient, params.deadline)?;
        let price = self.current_price(params.tokenIn, params.tokenOut)?;
        let amount_out = convert_decimals(
            params.amountOut,
            self.token_metadata
                .decimals(params.tokenOut)?,
            self.token_metadata
                .decimals(params.tokenIn)?,
        )?;
        let amount_in = wad_mul(amount_out, price)?;
        if amount_in > params.amountInMaximum {
            warn!(%amount_in, maximum = %params.amountInMaximum, "Rejecting exact output swap");
            return Err(SwapError::InputAboveMaximum {
                amount: amount_in,
                maximum: params.amountInMaximum,
            });
        }
        Ok(amount_in)
    }
}

fn poisoned() -> SwapError {
    SwapError::FatalError("P2P router state is poisoned".to_string())
}
