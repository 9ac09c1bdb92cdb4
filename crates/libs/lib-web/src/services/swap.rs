//! # Swap Service
//!
//! Builds unsigned DeepBook swap transactions for a wallet to sign, and
//! relays signed transactions to the chain.
//!
//! ## Swap Flow
//!
//! 1. **Build**: `POST /api/swap/build` quotes the pair and returns base64 BCS
//!    transaction bytes plus the quote they were built from
//! 2. **Sign**: the wallet signs the bytes; the backend never sees a key
//! 3. **Execute**: `POST /api/swap/execute` submits bytes and signatures
//!
//! ```text
//! SwapService → DeepBook (quote, pool, PTB) → ChainClient (coins, gas price, submit)
//! ```

use lib_core::{AppError, Config, Result};
use lib_sui::deepbook::{slippage_from_f64, SwapOrder};
use lib_sui::SuiState;
use lib_utils::{b64_decode, normalize_sui_address, validation::missing_fields};
use shared::{SwapBuildRequest, SwapBuildResponse, SwapExecuteRequest, SwapExecuteResponse};
use tracing::{info, instrument};

use super::missing_fields_error;

const BUILD_REQUIRED: &[&str] = &["walletAddress", "tokenIn", "tokenOut", "amountIn"];
const EXECUTE_REQUIRED: &[&str] = &["txBytes", "signatures"];

#[derive(Clone)]
pub struct SwapService {
    sui: SuiState,
    config: Config,
}

impl SwapService {
    pub fn new(sui: SuiState, config: Config) -> Self {
        Self { sui, config }
    }

    /// Validate a build request into a [`SwapOrder`].
    pub fn order(&self, request: &SwapBuildRequest) -> Result<SwapOrder> {
        let fields = [
            ("walletAddress", request.wallet_address.as_deref()),
            ("tokenIn", request.token_in.as_deref()),
            ("tokenOut", request.token_out.as_deref()),
            ("amountIn", request.amount_in.as_deref()),
        ];
        if !missing_fields(&fields).is_empty() {
            return Err(missing_fields_error(BUILD_REQUIRED));
        }
        let field = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();

        let slippage = match request.slippage {
            Some(slippage) => slippage_from_f64(slippage)?,
            None => self.config.default_slippage,
        };

        Ok(SwapOrder {
            wallet_address: normalize_sui_address(&field(&request.wallet_address))?,
            token_in: field(&request.token_in).to_uppercase(),
            token_out: field(&request.token_out).to_uppercase(),
            amount_in: field(&request.amount_in),
            slippage,
            gas_budget: self.config.gas_budget,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn build(&self, request: &SwapBuildRequest) -> Result<SwapBuildResponse> {
        let order = self.order(request)?;
        self.sui
            .deepbook
            .build_swap(self.sui.chain.as_ref(), &order)
            .await
    }

    /// Submit wallet-signed transaction bytes.
    #[instrument(skip(self, request))]
    pub async fn execute(&self, request: &SwapExecuteRequest) -> Result<SwapExecuteResponse> {
        let tx_bytes = request
            .tx_bytes
            .as_deref()
            .map(str::trim)
            .filter(|tx| !tx.is_empty());
        let tx_bytes = match tx_bytes {
            Some(tx) if !request.signatures.is_empty() => tx,
            _ => return Err(missing_fields_error(EXECUTE_REQUIRED)),
        };
        if b64_decode(tx_bytes).is_err() {
            return Err(AppError::InvalidRequest("txBytes must be base64".to_string()));
        }

        let block = self
            .sui
            .chain
            .execute_transaction(tx_bytes, &request.signatures)
            .await?;
        let status = block.status();

        info!(digest = %block.digest, status = %status, "[SWAP] Transaction submitted");

        Ok(SwapExecuteResponse {
            digest: block.digest,
            status,
        })
    }
}
