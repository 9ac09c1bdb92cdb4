//! # Swap Trigger
//!
//! A [`SwapController`] owns the build, sign and execute sequence. Registering
//! it spawns a task that serves swap commands over an mpsc channel and hands
//! out [`SwapTrigger`] handles; each command carries a oneshot for its
//! outcome. The registration is scoped: once the [`SwapRegistration`] is
//! dropped, every trigger reports [`ClientError::TriggerUnavailable`].
//!
//! Commands are served one at a time, so two triggers cannot submit
//! overlapping swaps from the same wallet.

use std::sync::Arc;

use shared::dto::swap::{SwapBuildRequest, SwapExecuteRequest, SwapExecuteResponse};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::intent::{format_swap_error, format_swap_success, SwapParams};
use crate::api::ApiService;
use crate::error::{ClientError, Result};
use crate::wallet::{TransactionSigner, WalletProvider};

const COMMAND_CAPACITY: usize = 8;

/// Result of a triggered swap, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    pub success: bool,
    pub message: String,
    pub digest: Option<String>,
}

struct SwapCommand {
    params: SwapParams,
    reply: oneshot::Sender<SwapOutcome>,
}

/// Cloneable handle for requesting swaps from anywhere in the app.
#[derive(Debug, Clone)]
pub struct SwapTrigger {
    tx: mpsc::Sender<SwapCommand>,
}

impl SwapTrigger {
    pub async fn trigger(&self, params: SwapParams) -> Result<SwapOutcome> {
        let (reply, outcome) = oneshot::channel();
        self.tx
            .send(SwapCommand { params, reply })
            .await
            .map_err(|_| ClientError::TriggerUnavailable)?;
        outcome.await.map_err(|_| ClientError::TriggerUnavailable)
    }

    pub fn is_available(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Keeps the controller task alive; dropping it unregisters every trigger.
#[derive(Debug)]
pub struct SwapRegistration {
    trigger: SwapTrigger,
    task: JoinHandle<()>,
}

impl SwapRegistration {
    pub fn trigger(&self) -> SwapTrigger {
        self.trigger.clone()
    }
}

impl Drop for SwapRegistration {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Runs swaps for the connected wallet.
pub struct SwapController {
    api: Arc<dyn ApiService>,
    wallet: Arc<dyn WalletProvider>,
    signer: Arc<dyn TransactionSigner>,
    slippage: Option<f64>,
}

impl SwapController {
    pub fn new(
        api: Arc<dyn ApiService>,
        wallet: Arc<dyn WalletProvider>,
        signer: Arc<dyn TransactionSigner>,
    ) -> Self {
        Self {
            api,
            wallet,
            signer,
            slippage: None,
        }
    }

    /// Slippage sent with every build; the backend default applies otherwise.
    pub fn with_slippage(mut self, slippage: f64) -> Self {
        self.slippage = Some(slippage);
        self
    }

    /// Start serving triggers.
    pub fn register(self) -> SwapRegistration {
        let (tx, mut rx) = mpsc::channel::<SwapCommand>(COMMAND_CAPACITY);

        let task = tokio::spawn(async move {
            while let Some(SwapCommand { params, reply }) = rx.recv().await {
                let outcome = self.run(&params).await;
                if reply.send(outcome).is_err() {
                    tracing::debug!("[SWAP] Trigger caller went away before the outcome");
                }
            }
            tracing::debug!("[SWAP] All triggers dropped");
        });

        SwapRegistration {
            trigger: SwapTrigger { tx },
            task,
        }
    }

    /// Swap and describe the result.
    pub async fn run(&self, params: &SwapParams) -> SwapOutcome {
        match self.swap(params).await {
            Ok(response) => SwapOutcome {
                success: true,
                message: format_swap_success(params),
                digest: Some(response.digest),
            },
            Err(err) => {
                tracing::warn!(error = %err, from = %params.from_token, to = %params.to_token, "[SWAP] Failed");
                SwapOutcome {
                    success: false,
                    message: format_swap_error(&err),
                    digest: None,
                }
            }
        }
    }

    /// Build, sign and execute.
    #[tracing::instrument(skip(self, params), fields(from = %params.from_token, to = %params.to_token, amount = %params.amount))]
    pub async fn swap(&self, params: &SwapParams) -> Result<SwapExecuteResponse> {
        let session = self.wallet.session();
        let address = session
            .active_address()
            .ok_or_else(|| ClientError::Wallet("Wallet not connected".to_string()))?;

        let built = self
            .api
            .build_swap(&SwapBuildRequest {
                wallet_address: Some(address.to_string()),
                token_in: Some(params.from_token.clone()),
                token_out: Some(params.to_token.clone()),
                amount_in: Some(params.amount.clone()),
                slippage: self.slippage,
            })
            .await?;
        tracing::info!(
            pool_id = %built.pool_id,
            min_amount_out = %built.quote.min_amount_out,
            "[SWAP] Transaction built"
        );

        let signature = self.signer.sign_transaction(&built.transaction.tx_bytes).await?;

        let response = self
            .api
            .execute_swap(&SwapExecuteRequest {
                tx_bytes: Some(built.transaction.tx_bytes),
                signatures: vec![signature],
            })
            .await?;

        if response.status != "success" {
            return Err(ClientError::TransactionFailed(response.status));
        }
        Ok(response)
    }
}
