use std::{sync::Arc, time::Instant};

use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait, prelude::DateTimeUtc, sea_query::OnConflict};

use crate::{
    codec::{u64_from_db, u64_to_db},
    error::Result,
    models::blockchain::{ActiveModel, Column, Entity},
    observability::observe,
};

const REPOSITORY: &str = "blockchain";

/// Listener cursors: the last block whose events were fully persisted.
#[derive(Clone)]
pub struct BlockchainRepository {
    conn: Arc<DatabaseConnection>,
}

impl BlockchainRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    /// `None` when the contract has never been indexed on this chain.
    pub async fn get_last_checked_block(
        &self,
        blockchain_id: &str,
        contract_address: &str,
    ) -> Result<Option<u64>> {
        let started = Instant::now();
        let result = Entity::find_by_id((blockchain_id.to_owned(), contract_address.to_owned()))
            .one(self.conn.as_ref())
            .await
            .map(|model| model.map(|value| u64_from_db(value.last_checked_block)))
            .map_err(Into::into);

        observe(
            REPOSITORY,
            "get_last_checked_block",
            started,
            result,
            |block| usize::from(block.is_some()),
        )
    }

    pub async fn update_last_checked_block(
        &self,
        blockchain_id: &str,
        contract_address: &str,
        last_checked_block: u64,
        last_checked_timestamp: DateTimeUtc,
    ) -> Result<()> {
        let started = Instant::now();
        let result: Result<()> = async {
            let model = ActiveModel {
                blockchain_id: ActiveValue::Set(blockchain_id.to_owned()),
                contract_address: ActiveValue::Set(contract_address.to_owned()),
                last_checked_block: ActiveValue::Set(u64_to_db(
                    "last_checked_block",
                    last_checked_block,
                )?),
                last_checked_timestamp: ActiveValue::Set(last_checked_timestamp),
            };
            Entity::insert(model)
                .on_conflict(
                    OnConflict::columns([Column::BlockchainId, Column::ContractAddress])
                        .update_columns([Column::LastCheckedBlock, Column::LastCheckedTimestamp])
                        .to_owned(),
                )
                .exec_without_returning(self.conn.as_ref())
                .await?;
            Ok(())
        }
        .await;

        observe(REPOSITORY, "update_last_checked_block", started, result, |_| 1)
    }
}
