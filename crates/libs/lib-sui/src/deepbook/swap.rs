//! # Swap Transaction Builder
//!
//! Builds an unsigned DeepBook v3 swap for the wallet to sign.
//!
//! ```text
//! input coin ─► SplitCoins(amountIn) ─┐
//! coin::zero<DEEP>() ─────────────────┼─► pool::swap_exact_{base_for_quote|quote_for_base}
//! pool (shared, mut), minOut, clock ──┘        │
//!                                              ▼
//!                          TransferObjects([base, quote, deep], sender)
//! ```
//!
//! SUI input is split from the gas coin, so the gas coins must cover the
//! amount plus the gas budget. Any other input merges the wallet's coins of
//! that type into the first one and splits from it.

use lib_core::tokens;
use lib_core::{AppError, Result};
use lib_utils::amount::to_raw_amount;
use lib_utils::b64_encode;
use rust_decimal::Decimal;
use shared::{BuiltTransaction, SwapBuildResponse, SwapQuoteSummary};
use tracing::{info, instrument};

use super::quote::{min_amount_out, QuoteOutcome};
use super::DeepBook;
use crate::client::{ChainClient, CoinObject, FALLBACK_GAS_PRICE};
use crate::fetched::Fetched;
use crate::ptb::{
    nested, AccountAddress, Argument, ObjectArg, ObjectDigest, ObjectRef,
    ProgrammableTransactionBuilder, TransactionData, TypeTag,
};

/// Most gas coins a transaction may pay with.
const MAX_GAS_OBJECTS: usize = 255;

/// Validated swap request. Symbols are upper-cased, the address normalized.
#[derive(Debug, Clone)]
pub struct SwapOrder {
    pub wallet_address: String,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub slippage: Decimal,
    pub gas_budget: u64,
}

fn build_failed(context: &str, err: impl std::fmt::Display) -> AppError {
    AppError::TransactionBuildFailed(format!("{}: {}", context, err))
}

fn object_ref(coin: &CoinObject) -> Result<ObjectRef> {
    Ok((
        AccountAddress::parse(&coin.coin_object_id)?,
        coin.version,
        ObjectDigest::from_base58(&coin.digest)?,
    ))
}

fn total_balance(coins: &[CoinObject]) -> u128 {
    coins.iter().map(|c| c.balance).sum()
}

/// Error for listed coins that do not cover `needed`. A wallet whose total
/// balance would cover it has more coin objects than one listing returns.
async fn shortfall(chain: &dyn ChainClient, owner: &str, token: &tokens::TokenConfig, needed: u128) -> AppError {
    let held = match chain.get_balance(owner, token.coin_type).await {
        Fetched::Ready(total) => total.parse::<u128>().ok(),
        Fetched::Empty | Fetched::Unavailable(_) => None,
    };
    match held {
        Some(held) if held >= needed => AppError::InvalidAmount(format!(
            "Too many {} coin objects to spend in one swap; merge them and retry",
            token.symbol
        )),
        _ => AppError::InvalidAmount(format!("Insufficient {} balance", token.symbol)),
    }
}

/// Unsigned swap before encoding.
#[derive(Debug, Clone)]
pub struct SwapPlan {
    pub outcome: QuoteOutcome,
    pub min_amount_out: String,
    pub data: TransactionData,
}

impl DeepBook {
    /// Quote the order and build the unsigned transaction that executes it.
    #[instrument(skip(self, chain, order), fields(wallet = %order.wallet_address))]
    pub async fn build_swap(&self, chain: &dyn ChainClient, order: &SwapOrder) -> Result<SwapBuildResponse> {
        let SwapPlan {
            outcome,
            min_amount_out,
            data,
        } = self.plan_swap(chain, order).await?;
        let tx_bytes = b64_encode(data.to_bytes()?);

        info!(
            pool = %outcome.pool.pool_name,
            amount_in = %outcome.quote.amount_in,
            min_out = %min_amount_out,
            "[SWAP] Built transaction"
        );

        Ok(SwapBuildResponse {
            transaction: BuiltTransaction {
                tx_bytes,
                estimated_gas: order.gas_budget.to_string(),
            },
            quote: SwapQuoteSummary {
                amount_in: outcome.quote.amount_in,
                estimated_amount_out: outcome.quote.estimated_amount_out,
                min_amount_out,
                price_impact: outcome.quote.price_impact,
            },
            pool_id: outcome.pool.pool_id,
        })
    }

    /// Gather chain state and assemble the programmable transaction.
    pub async fn plan_swap(&self, chain: &dyn ChainClient, order: &SwapOrder) -> Result<SwapPlan> {
        let outcome = self
            .quote(&order.token_in, &order.token_out, &order.amount_in)
            .await?;

        let min_out = min_amount_out(
            &outcome.quote.estimated_amount_out,
            order.slippage,
            outcome.token_out.decimals,
        )?;
        let min_out_raw = to_raw_amount(&min_out, outcome.token_out.decimals)
            .map_err(|e| build_failed("Invalid minimum output", e))?;
        let min_out_raw = u64::try_from(min_out_raw)
            .map_err(|_| AppError::TransactionBuildFailed("Minimum output exceeds u64".to_string()))?;
        let amount_in_raw = u64::try_from(outcome.amount_in_raw)
            .map_err(|_| AppError::InvalidAmount("Amount exceeds the coin supply range".to_string()))?;

        let sender = AccountAddress::parse(&order.wallet_address)?;
        let sui = tokens::token("SUI")
            .ok_or_else(|| AppError::Config("SUI missing from token table".to_string()))?;
        let deep = tokens::token("DEEP")
            .ok_or_else(|| AppError::Config("DEEP missing from token table".to_string()))?;

        // Gas
        let gas_price = chain.reference_gas_price().await.or_fallback(FALLBACK_GAS_PRICE);
        let mut sui_coins = chain
            .get_coins(&order.wallet_address, sui.coin_type)
            .await
            .map_err(|e| build_failed("Failed to load SUI coins", e))?;
        if sui_coins.is_empty() {
            return Err(AppError::InvalidAmount("No SUI coins found in wallet".to_string()));
        }
        sui_coins.sort_by(|a, b| b.balance.cmp(&a.balance));
        let payment = sui_coins
            .iter()
            .take(MAX_GAS_OBJECTS)
            .map(object_ref)
            .collect::<Result<Vec<_>>>()?;

        let mut ptb = ProgrammableTransactionBuilder::new();

        // Input coin
        let source = if outcome.token_in.symbol == sui.symbol {
            let needed = u128::from(amount_in_raw) + u128::from(order.gas_budget);
            if total_balance(&sui_coins) < needed {
                return Err(shortfall(chain, &order.wallet_address, sui, needed).await);
            }
            Argument::GasCoin
        } else {
            let coins = chain
                .get_coins(&order.wallet_address, outcome.token_in.coin_type)
                .await
                .map_err(|e| build_failed("Failed to load input coins", e))?;
            if coins.is_empty() {
                return Err(AppError::InvalidAmount(format!(
                    "No {} coins found in wallet",
                    outcome.token_in.symbol
                )));
            }
            if total_balance(&coins) < u128::from(amount_in_raw) {
                return Err(
                    shortfall(chain, &order.wallet_address, outcome.token_in, u128::from(amount_in_raw)).await,
                );
            }

            let mut args = Vec::with_capacity(coins.len());
            for coin in &coins {
                args.push(ptb.object(ObjectArg::ImmOrOwnedObject(object_ref(coin)?)));
            }
            let primary = args.remove(0);
            if !args.is_empty() {
                ptb.merge_coins(primary, args);
            }
            primary
        };

        let amount = ptb.pure(&amount_in_raw)?;
        let coin_in = ptb.split_coin(source, amount);

        // Fee coin: whitelisted pools charge no DEEP
        let deep_tag = TypeTag::parse_struct(deep.coin_type)?;
        let deep_in = ptb.move_call(
            AccountAddress::FRAMEWORK,
            "coin",
            "zero",
            vec![deep_tag],
            vec![],
        );

        let pool_id = AccountAddress::parse(&outcome.pool.pool_id)?;
        let pool_shared = chain
            .get_shared_object(&outcome.pool.pool_id)
            .await
            .map_err(|e| build_failed("Failed to load pool object", e))?;
        let pool = ptb.object(ObjectArg::SharedObject {
            id: pool_id,
            initial_shared_version: pool_shared.initial_shared_version,
            mutable: true,
        });
        let min_out_arg = ptb.pure(&min_out_raw)?;
        let clock = ptb.object(ObjectArg::SharedObject {
            id: AccountAddress::CLOCK,
            initial_shared_version: 1,
            mutable: false,
        });

        // Pool is BASE_QUOTE; a reversed match means tokenIn is the quote asset
        let (base, quote_asset, function) = if outcome.is_reversed {
            (outcome.token_out, outcome.token_in, "swap_exact_quote_for_base")
        } else {
            (outcome.token_in, outcome.token_out, "swap_exact_base_for_quote")
        };
        let swap = ptb.move_call(
            AccountAddress::parse(&self.package_id)?,
            "pool",
            function,
            vec![
                TypeTag::parse_struct(base.coin_type)?,
                TypeTag::parse_struct(quote_asset.coin_type)?,
            ],
            vec![pool, coin_in, deep_in, min_out_arg, clock],
        );

        let recipient = ptb.pure(&sender)?;
        ptb.transfer_objects(
            vec![nested(swap, 0), nested(swap, 1), nested(swap, 2)],
            recipient,
        );

        let data = TransactionData::new_programmable(
            sender,
            payment,
            ptb.finish(),
            order.gas_budget,
            gas_price,
        );

        Ok(SwapPlan {
            outcome,
            min_amount_out: min_out,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deepbook::testing::{deepbook_with_book, FakeChain, WALLET, DEEP_SUI_POOL};
    use crate::ptb::{CallArg, Command, TransactionKind};
    use lib_utils::b64_decode;

    fn order(token_in: &str, token_out: &str, amount_in: &str) -> SwapOrder {
        SwapOrder {
            wallet_address: WALLET.to_string(),
            token_in: token_in.to_string(),
            token_out: token_out.to_string(),
            amount_in: amount_in.to_string(),
            slippage: Decimal::new(1, 2),
            gas_budget: 50_000_000,
        }
    }

    #[tokio::test]
    async fn test_build_sui_to_deep() {
        let deepbook = deepbook_with_book(&[("0.05", "1000")], &[("0.01", "1000")]);
        let chain = FakeChain::funded();

        let built = deepbook.build_swap(&chain, &order("SUI", "DEEP", "1")).await.unwrap();

        assert_eq!(built.pool_id, DEEP_SUI_POOL);
        assert_eq!(built.quote.estimated_amount_out, "100");
        assert_eq!(built.quote.min_amount_out, "99");
        assert_eq!(built.transaction.estimated_gas, "50000000");

        let bytes = b64_decode(&built.transaction.tx_bytes).unwrap();
        // TransactionData::V1 + ProgrammableTransaction
        assert_eq!(&bytes[..2], &[0, 0]);
    }

    #[tokio::test]
    async fn test_command_shape_for_non_sui_input() {
        let deepbook = deepbook_with_book(&[("0.05", "1000")], &[("0.06", "1000")]);
        let chain = FakeChain::funded();

        let built = deepbook.build_swap(&chain, &order("DEEP", "SUI", "10")).await.unwrap();
        assert_eq!(built.quote.estimated_amount_out, "0.5");
        assert_eq!(built.quote.min_amount_out, "0.495");

        let plan = deepbook.plan_swap(&chain, &order("DEEP", "SUI", "10")).await.unwrap();
        let TransactionData::V1(v1) = plan.data;
        let TransactionKind::ProgrammableTransaction(pt) = v1.kind;
        assert_eq!(v1.gas_data.price, 1000);
        assert_eq!(v1.gas_data.payment.len(), 1);
        // two DEEP coins merged, split, zero fee coin, swap, transfer
        assert!(matches!(pt.commands[0], Command::MergeCoins(_, _)));
        assert!(matches!(pt.commands[1], Command::SplitCoins(_, _)));
        match &pt.commands[3] {
            Command::MoveCall(call) => {
                assert_eq!(call.module, "pool");
                assert_eq!(call.function, "swap_exact_base_for_quote");
            }
            other => panic!("expected move call, got {other:?}"),
        }
        assert!(matches!(pt.commands[4], Command::TransferObjects(_, _)));
        assert!(pt.inputs.iter().any(|i| matches!(i, CallArg::Object(ObjectArg::SharedObject { mutable: true, .. }))));
    }

    #[tokio::test]
    async fn test_empty_wallet() {
        let deepbook = deepbook_with_book(&[("0.05", "1000")], &[("0.01", "1000")]);
        let chain = FakeChain::empty();

        let err = deepbook.build_swap(&chain, &order("SUI", "DEEP", "1")).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_AMOUNT");
        assert_eq!(err.user_message(), "No SUI coins found in wallet");
    }

    #[tokio::test]
    async fn test_sui_input_must_also_cover_gas_budget() {
        let deepbook = deepbook_with_book(&[("0.05", "1000")], &[("0.01", "1000")]);
        let chain = FakeChain::funded();

        // 9.96 SUI + 0.05 SUI budget exceeds the 10 SUI held
        let err = deepbook.build_swap(&chain, &order("SUI", "DEEP", "9.96")).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_AMOUNT");
        assert_eq!(err.user_message(), "Insufficient SUI balance");

        assert!(deepbook.build_swap(&chain, &order("SUI", "DEEP", "9.95")).await.is_ok());
    }

    #[tokio::test]
    async fn test_capped_coin_listing_is_not_reported_as_insufficient() {
        let deepbook = deepbook_with_book(&[("0.05", "1000")], &[("0.06", "1000")]);
        // Only the 100 DEEP coin is listed; the wallet holds 150
        let chain = FakeChain::funded().with_coin_listing_limit(1);

        let err = deepbook.build_swap(&chain, &order("DEEP", "SUI", "120")).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_AMOUNT");
        assert_eq!(
            err.user_message(),
            "Too many DEEP coin objects to spend in one swap; merge them and retry"
        );

        let err = deepbook.build_swap(&chain, &order("DEEP", "SUI", "200")).await.unwrap_err();
        assert_eq!(err.user_message(), "Insufficient DEEP balance");
    }
}
