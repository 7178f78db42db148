use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use super::{dto::status::StatusResponse, responses};
use crate::{context::Context, indexer::cursor_key};

pub(crate) struct StatusHttpApiController;

impl StatusHttpApiController {
    /// Always answers 200; unreachable dependencies show up as `errors`.
    pub(crate) async fn handle_request(State(context): State<Arc<Context>>) -> impl IntoResponse {
        let chain = context.chain();
        let repository = context.repository_manager();
        let contract_key = cursor_key(chain.contract_address());

        let blockchain_repository = repository.blockchain_repository();
        let (head, indexed, ping) = tokio::join!(
            chain.head_block(),
            blockchain_repository
                .get_last_checked_block(chain.blockchain_id().as_str(), &contract_key),
            repository.ping(),
        );

        let mut errors = Vec::new();
        let head_block = head
            .map_err(|error| errors.push(format!("chain: {error}")))
            .ok();
        let indexed_block = indexed
            .map_err(|error| errors.push(format!("cursor: {error}")))
            .ok()
            .flatten();
        let store_healthy = ping
            .map_err(|error| errors.push(format!("store: {error}")))
            .is_ok();

        let lag_blocks = head_block
            .zip(indexed_block)
            .map(|(head, indexed)| head.saturating_sub(indexed));

        responses::ok(StatusResponse {
            blockchain_id: chain.blockchain_id().to_string(),
            contract_address: contract_key,
            head_block,
            indexed_block,
            lag_blocks,
            store_healthy,
            errors,
        })
    }
}
