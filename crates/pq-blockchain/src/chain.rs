use std::{collections::HashMap, time::Instant};

use alloy::{
    contract::{Error as ContractError, SolCallBuilder},
    eips::BlockNumberOrTag,
    network::{Ethereum, ReceiptResponse as _},
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::{Filter, TransactionReceipt},
    sol_types::{SolCall, SolEvent},
};
use async_trait::async_trait;
use pq_domain::{BlockchainId, ContentId, Quest, QuestId, Submission};
use tokio::sync::Mutex;

use crate::{
    BlockchainConfig,
    contract_events::{ContractLog, decode_contract_log, monitored_contract_events},
    contracts::PhotoQuest::{self, PhotoQuestInstance},
    error::BlockchainError,
    error_classification::{contract_error_backoff_hint, is_retryable_contract_error},
    provider::{BlockchainProvider, initialize_provider},
    quest_contract::{
        CreatedQuest, NewQuest, QuestContract, TransactionOutcome, quest_from_contract,
        quest_id_field, quest_ids_from_contract, submission_from_contract,
        submissions_from_contract, u64_field,
    },
    rpc_executor::{RetryPolicy, RetryableError, backoff_delay},
    rpc_rate_limiter::RpcRateLimiter,
};

/// Block span of a single `eth_getLogs` request.
pub const MAXIMUM_NUMBERS_OF_BLOCKS_TO_FETCH: u64 = 50;
const GAS_ESTIMATE_MULTIPLIER: f64 = 1.2;

/// Client for the chain hosting the quest contract.
pub struct EvmChain {
    config: BlockchainConfig,
    provider: BlockchainProvider,
    contract: PhotoQuestInstance<BlockchainProvider>,
    rpc_rate_limiter: RpcRateLimiter,
    tx_mutex: Mutex<()>,
    rpc_retry_policy: RetryPolicy,
    tx_retry_policy: RetryPolicy,
}

impl EvmChain {
    pub async fn connect(config: BlockchainConfig) -> Result<Self, BlockchainError> {
        let provider = initialize_provider(&config).await?;
        let contract = PhotoQuest::new(config.contract_address(), provider.clone());

        let rpc_rate_limiter = RpcRateLimiter::new(config.max_rpc_requests_per_second());
        if let Some(rps) = config.max_rpc_requests_per_second() {
            tracing::info!(
                "{}: RPC rate limiting enabled at {} requests/second",
                config.blockchain_id(),
                rps
            );
        }

        match config.wallet_address() {
            Some(wallet) => tracing::info!(
                blockchain = %config.blockchain_id(),
                contract = %config.contract_address(),
                wallet = %wallet,
                "Quest contract client initialized"
            ),
            None => tracing::info!(
                blockchain = %config.blockchain_id(),
                contract = %config.contract_address(),
                "Quest contract client initialized without a wallet (read-only)"
            ),
        }

        Ok(Self {
            config,
            provider,
            contract,
            rpc_rate_limiter,
            tx_mutex: Mutex::new(()),
            rpc_retry_policy: RetryPolicy::rpc_default(),
            tx_retry_policy: RetryPolicy::tx_default(),
        })
    }

    pub fn blockchain_id(&self) -> &BlockchainId {
        self.config.blockchain_id()
    }

    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }

    pub fn contract_address(&self) -> Address {
        self.config.contract_address()
    }

    /// Runs an RPC call behind the rate limiter, retrying transient failures.
    async fn rpc_call<T, E, F, O>(&self, operation: &str, mut call: F) -> Result<T, E>
    where
        E: RetryableError,
        F: FnMut() -> O,
        O: std::future::IntoFuture<Output = Result<T, E>>,
    {
        let blockchain_id = self.blockchain_id().as_str();
        let mut attempt = 1;
        loop {
            self.rpc_rate_limiter.acquire().await;
            let started = Instant::now();
            let result = call().into_future().await;
            match result {
                Ok(value) => {
                    pq_observability::record_blockchain_rpc_call(
                        blockchain_id,
                        operation,
                        "ok",
                        started.elapsed(),
                    );
                    return Ok(value);
                }
                Err(err) => {
                    pq_observability::record_blockchain_rpc_call(
                        blockchain_id,
                        operation,
                        "error",
                        started.elapsed(),
                    );
                    if attempt >= self.rpc_retry_policy.max_attempts || !err.is_retryable() {
                        return Err(err);
                    }

                    let delay = backoff_delay(&self.rpc_retry_policy, attempt, err.backoff_hint());
                    pq_observability::record_blockchain_rpc_retry(blockchain_id, operation);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.rpc_retry_policy.max_attempts,
                        delay_ms = delay.as_millis(),
                        error = %err,
                        "{} failed; retrying",
                        operation
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Contract read mapped into the crate's error taxonomy.
    async fn read<T, F, O>(&self, operation: &'static str, call: F) -> Result<T, BlockchainError>
    where
        F: FnMut() -> O,
        O: std::future::IntoFuture<Output = Result<T, ContractError>>,
    {
        self.rpc_call(operation, call)
            .await
            .map_err(|err| BlockchainError::from_contract(operation, err))
    }

    pub async fn get_block_number(&self) -> Result<u64, BlockchainError> {
        self.rpc_call("get_block_number", || self.provider.get_block_number())
            .await
            .map_err(BlockchainError::get_block_number)
    }

    pub async fn get_block_timestamp(&self, block_number: u64) -> Result<u64, BlockchainError> {
        let block = self
            .rpc_call("get_block_by_number", || {
                self.provider
                    .get_block_by_number(BlockNumberOrTag::Number(block_number))
            })
            .await
            .map_err(|err| BlockchainError::unavailable("get_block_by_number", err))?;

        block
            .map(|block| block.header.timestamp)
            .ok_or_else(|| BlockchainError::Unavailable {
                operation: "get_block_by_number".to_string(),
                reason: format!("block {block_number} not found"),
            })
    }

    /// Fetches and decodes quest contract events in `[from_block, to_block]`,
    /// `batch_size` blocks per request, sorted by block, transaction and log index.
    pub async fn get_contract_logs(
        &self,
        from_block: u64,
        to_block: u64,
        batch_size: u64,
    ) -> Result<Vec<ContractLog>, BlockchainError> {
        let batch_size = batch_size.clamp(1, MAXIMUM_NUMBERS_OF_BLOCKS_TO_FETCH * 20);
        let blockchain_id = self.blockchain_id().as_str().to_string();
        let signatures = monitored_contract_events();
        let mut decoded = Vec::new();

        let mut block = from_block;
        while block <= to_block {
            let batch_end = std::cmp::min(block.saturating_add(batch_size - 1), to_block);
            let block_span = (batch_end - block + 1) as usize;

            let filter = Filter::new()
                .address(self.contract_address())
                .from_block(block)
                .to_block(batch_end)
                .event_signature(signatures.clone());

            let batch_started = Instant::now();
            let logs = match self
                .rpc_call("get_logs", || self.provider.get_logs(&filter))
                .await
            {
                Ok(logs) => {
                    pq_observability::record_blockchain_event_logs_batch(
                        &blockchain_id,
                        "ok",
                        batch_started.elapsed(),
                        block_span,
                        logs.len(),
                    );
                    logs
                }
                Err(err) => {
                    pq_observability::record_blockchain_event_logs_batch(
                        &blockchain_id,
                        "error",
                        batch_started.elapsed(),
                        block_span,
                        0,
                    );
                    return Err(BlockchainError::get_logs(err));
                }
            };

            for log in &logs {
                match decode_contract_log(log) {
                    Some(contract_log) => decoded.push(contract_log),
                    None => tracing::debug!(
                        transaction_hash = ?log.transaction_hash,
                        log_index = ?log.log_index,
                        "Skipping undecodable or pending log"
                    ),
                }
            }

            block = batch_end + 1;
        }

        self.fill_block_timestamps(&mut decoded).await?;
        decoded.sort_by_key(|log| log.meta.position());
        Ok(decoded)
    }

    async fn fill_block_timestamps(&self, logs: &mut [ContractLog]) -> Result<(), BlockchainError> {
        let mut timestamps: HashMap<u64, u64> = HashMap::new();
        for log in logs.iter_mut() {
            if log.meta.block_timestamp.is_some() {
                continue;
            }
            let block_number = log.meta.block_number;
            let timestamp = match timestamps.get(&block_number) {
                Some(timestamp) => *timestamp,
                None => {
                    let timestamp = self.get_block_timestamp(block_number).await?;
                    timestamps.insert(block_number, timestamp);
                    timestamp
                }
            };
            log.meta.block_timestamp = Some(timestamp);
        }
        Ok(())
    }

    fn ensure_sender(&self, operation: &'static str, sender: Address) -> Result<(), BlockchainError> {
        let wallet = self
            .config
            .wallet_address()
            .ok_or(BlockchainError::WalletRequired { operation })?;
        if wallet != sender {
            return Err(BlockchainError::WalletMismatch {
                sender: sender.to_string(),
                wallet: wallet.to_string(),
            });
        }
        Ok(())
    }

    /// Estimates gas, sends and waits for the receipt. Only one transaction is
    /// in flight at a time so nonces stay ordered.
    async fn send_transaction<'a, C, F>(
        &'a self,
        function: &'static str,
        mut build_call: F,
    ) -> Result<TransactionReceipt, BlockchainError>
    where
        C: SolCall,
        F: FnMut() -> SolCallBuilder<&'a BlockchainProvider, C, Ethereum>,
    {
        let _guard = self.tx_mutex.lock().await;
        let started = Instant::now();
        let blockchain_id = self.blockchain_id().as_str();

        let result = self.submit_with_retry(function, &mut build_call).await;
        let receipt = match result {
            Ok(pending_tx) => {
                let pending_tx = pending_tx
                    .with_required_confirmations(self.config.tx_confirmations())
                    .with_timeout(self.config.tx_receipt_timeout());
                pending_tx.get_receipt().await.map_err(|err| {
                    tracing::error!("Failed to retrieve transaction receipt: {:?}", err);
                    BlockchainError::ReceiptFailed {
                        reason: err.to_string(),
                    }
                })
            }
            Err(err) => {
                tracing::error!(function, error = %err, "Contract call failed");
                Err(BlockchainError::from_contract(function, err))
            }
        };

        let receipt = match receipt {
            Ok(receipt) if !receipt.status() => Err(BlockchainError::Reverted {
                reason: format!(
                    "{function} reverted on-chain in {}",
                    receipt.transaction_hash
                ),
            }),
            other => other,
        };

        let status = if receipt.is_ok() { "ok" } else { "error" };
        pq_observability::record_blockchain_tx(blockchain_id, function, status, started.elapsed());
        receipt
    }

    async fn submit_with_retry<'a, C, F>(
        &'a self,
        function: &'static str,
        build_call: &mut F,
    ) -> Result<alloy::providers::PendingTransactionBuilder<Ethereum>, ContractError>
    where
        C: SolCall,
        F: FnMut() -> SolCallBuilder<&'a BlockchainProvider, C, Ethereum>,
    {
        let mut attempt = 1;
        let mut cached_gas_limit: Option<u64> = None;

        loop {
            let mut call = build_call();

            if cached_gas_limit.is_none() {
                self.rpc_rate_limiter.acquire().await;
                match call.estimate_gas().await {
                    Ok(estimate) => cached_gas_limit = Some(apply_gas_estimate_multiplier(estimate)),
                    Err(err) => {
                        if attempt >= self.tx_retry_policy.max_attempts
                            || !is_retryable_contract_error(&err)
                        {
                            return Err(err);
                        }
                        let delay = backoff_delay(
                            &self.tx_retry_policy,
                            attempt,
                            contract_error_backoff_hint(&err),
                        );
                        tracing::warn!(
                            function,
                            attempt,
                            delay_ms = delay.as_millis(),
                            error = %err,
                            "Gas estimation failed; retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                }
            }

            if let Some(gas_limit) = cached_gas_limit {
                call = call.gas(gas_limit);
            }

            self.rpc_rate_limiter.acquire().await;
            match call.send().await {
                Ok(pending_tx) => return Ok(pending_tx),
                Err(err) => {
                    if attempt >= self.tx_retry_policy.max_attempts
                        || !is_retryable_contract_error(&err)
                    {
                        return Err(err);
                    }
                    let delay = backoff_delay(
                        &self.tx_retry_policy,
                        attempt,
                        contract_error_backoff_hint(&err),
                    );
                    tracing::warn!(
                        function,
                        attempt,
                        delay_ms = delay.as_millis(),
                        error = %err,
                        "Transaction submission failed; retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn receipt_event<E: SolEvent>(&self, receipt: &TransactionReceipt) -> Option<E> {
        receipt
            .inner
            .logs()
            .iter()
            .filter(|log| log.address() == self.contract_address())
            .find_map(|log| E::decode_log(&log.inner).ok().map(|decoded| decoded.data))
    }
}

fn apply_gas_estimate_multiplier(estimate: u64) -> u64 {
    if estimate == 0 {
        return 0;
    }

    let scaled = (estimate as f64 * GAS_ESTIMATE_MULTIPLIER).ceil();
    if !scaled.is_finite() || scaled <= 0.0 {
        return estimate;
    }

    let scaled = scaled.min(u64::MAX as f64) as u64;
    scaled.max(estimate)
}

fn outcome(receipt: &TransactionReceipt) -> TransactionOutcome {
    TransactionOutcome {
        transaction_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
    }
}

#[async_trait]
impl QuestContract for EvmChain {
    async fn quest_counter(&self) -> Result<u64, BlockchainError> {
        let counter = self
            .read("questCounter", || async {
                self.contract.questCounter().call().await
            })
            .await?;
        u64_field("questCounter", counter)
    }

    async fn get_quest(&self, quest_id: QuestId) -> Result<Option<Quest>, BlockchainError> {
        let raw = self
            .read("getQuest", || async {
                self.contract.getQuest(quest_id.to_u256()).call().await
            })
            .await?;
        quest_from_contract(raw)
    }

    async fn get_quest_submissions(
        &self,
        quest_id: QuestId,
    ) -> Result<Vec<Submission>, BlockchainError> {
        let raw = self
            .read("getQuestSubmissions", || async {
                self.contract
                    .getQuestSubmissions(quest_id.to_u256())
                    .call()
                    .await
            })
            .await?;
        submissions_from_contract(quest_id, raw)
    }

    async fn has_photographer_submitted(
        &self,
        quest_id: QuestId,
        photographer: Address,
    ) -> Result<bool, BlockchainError> {
        self.read("hasPhotographerSubmitted", || async {
            self.contract
                .hasPhotographerSubmitted(quest_id.to_u256(), photographer)
                .call()
                .await
        })
        .await
    }

    async fn get_photographer_submission(
        &self,
        quest_id: QuestId,
        photographer: Address,
    ) -> Result<Option<Submission>, BlockchainError> {
        let raw = self
            .read("getPhotographerSubmission", || async {
                self.contract
                    .getPhotographerSubmission(quest_id.to_u256(), photographer)
                    .call()
                    .await
            })
            .await?;
        submission_from_contract(quest_id, raw)
    }

    async fn get_user_quests(&self, user: Address) -> Result<Vec<QuestId>, BlockchainError> {
        let raw = self
            .read("getUserQuests", || async {
                self.contract.getUserQuests(user).call().await
            })
            .await?;
        quest_ids_from_contract(raw)
    }

    async fn get_photographer_quests(
        &self,
        photographer: Address,
    ) -> Result<Vec<QuestId>, BlockchainError> {
        let raw = self
            .read("getPhotographerQuests", || async {
                self.contract
                    .getPhotographerQuests(photographer)
                    .call()
                    .await
            })
            .await?;
        quest_ids_from_contract(raw)
    }

    async fn get_selected_submissions(
        &self,
        quest_id: QuestId,
    ) -> Result<Vec<Submission>, BlockchainError> {
        let raw = self
            .read("getSelectedSubmissions", || async {
                self.contract
                    .getSelectedSubmissions(quest_id.to_u256())
                    .call()
                    .await
            })
            .await?;
        submissions_from_contract(quest_id, raw)
    }

    async fn create_quest(
        &self,
        sender: Address,
        quest: &NewQuest,
    ) -> Result<CreatedQuest, BlockchainError> {
        self.ensure_sender("createQuest", sender)?;

        let receipt = self
            .send_transaction("createQuest", || {
                self.contract
                    .createQuest(
                        quest.title.clone(),
                        quest.description.clone(),
                        quest.category.as_u8(),
                        U256::from(quest.deadline),
                        U256::from(quest.max_submissions),
                    )
                    .value(quest.reward)
            })
            .await?;

        let created = self
            .receipt_event::<PhotoQuest::QuestCreated>(&receipt)
            .ok_or_else(|| BlockchainError::MissingEvent {
                event: "QuestCreated",
                transaction_hash: receipt.transaction_hash.to_string(),
            })?;

        Ok(CreatedQuest {
            quest_id: quest_id_field(created.questId)?,
            transaction: outcome(&receipt),
        })
    }

    async fn submit_photo(
        &self,
        sender: Address,
        quest_id: QuestId,
        watermarked: &ContentId,
        original: &ContentId,
    ) -> Result<TransactionOutcome, BlockchainError> {
        self.ensure_sender("submitPhoto", sender)?;

        let receipt = self
            .send_transaction("submitPhoto", || {
                self.contract.submitPhoto(
                    quest_id.to_u256(),
                    watermarked.as_str().to_string(),
                    original.as_str().to_string(),
                )
            })
            .await?;
        Ok(outcome(&receipt))
    }

    async fn select_submissions(
        &self,
        sender: Address,
        quest_id: QuestId,
        indices: &[u64],
    ) -> Result<TransactionOutcome, BlockchainError> {
        self.ensure_sender("selectSubmissions", sender)?;

        let indices: Vec<U256> = indices.iter().copied().map(U256::from).collect();
        let receipt = self
            .send_transaction("selectSubmissions", || {
                self.contract
                    .selectSubmissions(quest_id.to_u256(), indices.clone())
            })
            .await?;
        Ok(outcome(&receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_estimate_gets_headroom() {
        assert_eq!(apply_gas_estimate_multiplier(0), 0);
        assert_eq!(apply_gas_estimate_multiplier(100_000), 120_000);
        assert_eq!(apply_gas_estimate_multiplier(u64::MAX), u64::MAX);
    }
}
