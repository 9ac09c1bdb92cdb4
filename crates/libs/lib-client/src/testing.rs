//! In-memory backend and signer for hook and trigger tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::dto::quote::{Quote, QuoteRequest};
use shared::dto::swap::{
    BuiltTransaction, SwapBuildRequest, SwapBuildResponse, SwapExecuteRequest, SwapExecuteResponse,
    SwapQuoteSummary,
};
use shared::dto::wallet::{Availability, BalancesResponse, CoinBalance, TransactionStatus};

use crate::api::ApiService;
use crate::error::{ClientError, Result};
use crate::wallet::TransactionSigner;

pub const SUI_TYPE: &str = "0x2::sui::SUI";
pub const DEEP_TYPE: &str =
    "0x36dbef866a1d62bf7328989a10fb2f07d769f4ee587c0de4a0a256e57e0a58a8::deep::DEEP";

pub fn coin(coin_type: &str, total_balance: &str) -> CoinBalance {
    CoinBalance {
        coin_type: coin_type.to_string(),
        coin_object_count: 1,
        total_balance: total_balance.to_string(),
    }
}

pub struct FakeApi {
    balances: Mutex<Result<BalancesResponse>>,
    quote_delays: Mutex<VecDeque<Duration>>,
    quote_error: Mutex<Option<ClientError>>,
    execute_status: Mutex<String>,
    pub balance_calls: AtomicUsize,
    pub quote_calls: AtomicUsize,
    pub built: Mutex<Vec<SwapBuildRequest>>,
    pub executed: Mutex<Vec<SwapExecuteRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(Ok(BalancesResponse {
                balances: Vec::new(),
                availability: Availability::Empty,
            })),
            quote_delays: Mutex::new(VecDeque::new()),
            quote_error: Mutex::new(None),
            execute_status: Mutex::new("success".to_string()),
            balance_calls: AtomicUsize::new(0),
            quote_calls: AtomicUsize::new(0),
            built: Mutex::new(Vec::new()),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_balances(self, balances: Vec<CoinBalance>) -> Self {
        *self.balances.lock() = Ok(BalancesResponse {
            availability: if balances.is_empty() { Availability::Empty } else { Availability::Ok },
            balances,
        });
        self
    }

    pub fn set_balances_result(&self, result: Result<BalancesResponse>) {
        *self.balances.lock() = result;
    }

    /// Delays applied to successive quote calls, in order.
    pub fn with_quote_delays(self, delays: &[Duration]) -> Self {
        self.quote_delays.lock().extend(delays.iter().copied());
        self
    }

    pub fn fail_quotes(&self, err: ClientError) {
        *self.quote_error.lock() = Some(err);
    }

    pub fn set_execute_status(&self, status: &str) {
        *self.execute_status.lock() = status.to_string();
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiService for FakeApi {
    async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.quote_delays.lock().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.quote_error.lock().clone() {
            return Err(err);
        }

        let amount_in = request.amount_in.clone().unwrap_or_default();
        Ok(Quote {
            token_in: request.token_in.clone().unwrap_or_default(),
            token_out: request.token_out.clone().unwrap_or_default(),
            amount_in_raw: String::new(),
            // Echo the input so tests can tell responses apart
            estimated_amount_out: amount_in.clone(),
            estimated_amount_out_raw: String::new(),
            amount_in,
            price_per_token: "1.000000".to_string(),
            price_impact: "0.00".to_string(),
            pool_id: "0xpool".to_string(),
        })
    }

    async fn get_balances(&self, _address: &str) -> Result<BalancesResponse> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.balances.lock().clone()
    }

    async fn build_swap(&self, request: &SwapBuildRequest) -> Result<SwapBuildResponse> {
        self.built.lock().push(request.clone());
        Ok(SwapBuildResponse {
            transaction: BuiltTransaction {
                tx_bytes: "AAAA".to_string(),
                estimated_gas: "50000000".to_string(),
            },
            quote: SwapQuoteSummary {
                amount_in: request.amount_in.clone().unwrap_or_default(),
                estimated_amount_out: "100".to_string(),
                min_amount_out: "99".to_string(),
                price_impact: "0.00".to_string(),
            },
            pool_id: "0xpool".to_string(),
        })
    }

    async fn execute_swap(&self, request: &SwapExecuteRequest) -> Result<SwapExecuteResponse> {
        self.executed.lock().push(request.clone());
        Ok(SwapExecuteResponse {
            digest: "5HqDigest".to_string(),
            status: self.execute_status.lock().clone(),
        })
    }

    async fn get_transaction(&self, digest: &str) -> Result<TransactionStatus> {
        Ok(TransactionStatus {
            digest: digest.to_string(),
            status: "success".to_string(),
            timestamp: None,
            gas_used: None,
            effects: None,
        })
    }
}

/// Signs by prefixing the bytes, or refuses every request.
pub struct FakeSigner {
    pub refuse: bool,
}

#[async_trait]
impl TransactionSigner for FakeSigner {
    async fn sign_transaction(&self, tx_bytes: &str) -> Result<String> {
        if self.refuse {
            return Err(ClientError::Wallet("User rejected the request".to_string()));
        }
        Ok(format!("sig:{tx_bytes}"))
    }
}
