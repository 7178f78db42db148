use std::{sync::Arc, time::Instant};

use pq_domain::EventId;
use sea_orm::{
    ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, sea_query::OnConflict,
};

use super::sort_order;
use crate::{
    codec::{amount_from_db, amount_to_db, hash_from_db, hash_to_db, u64_from_db, u64_to_db},
    error::Result,
    models::platform_fee_updated::{ActiveModel, Column, Entity, Model},
    observability::observe,
    types::{EventMeta, OrderDirection, Page, PlatformFeeUpdatedRecord},
};

const REPOSITORY: &str = "platform_fee_updated";

#[derive(Clone)]
pub struct PlatformFeeRepository {
    conn: Arc<DatabaseConnection>,
}

impl PlatformFeeRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    /// Insert-or-ignore keyed by event id. Returns `true` when a new row was written.
    pub async fn insert(&self, record: &PlatformFeeUpdatedRecord) -> Result<bool> {
        let started = Instant::now();
        let result: Result<bool> = async {
            let model = Self::to_active_model(record)?;
            let rows = Entity::insert(model)
                .on_conflict(OnConflict::column(Column::Id).do_nothing().to_owned())
                .exec_without_returning(self.conn.as_ref())
                .await?;
            Ok(rows > 0)
        }
        .await;

        observe(REPOSITORY, "insert", started, result, |inserted| {
            usize::from(*inserted)
        })
    }

    pub async fn find(&self, page: Page) -> Result<Vec<PlatformFeeUpdatedRecord>> {
        let started = Instant::now();
        let result: Result<Vec<PlatformFeeUpdatedRecord>> = async {
            let models = Entity::find()
                .order_by(Column::BlockTimestamp, sort_order(page.order))
                .order_by(Column::BlockNumber, sort_order(page.order))
                .order_by(Column::Id, sort_order(page.order))
                .offset(page.offset)
                .limit(page.limit)
                .all(self.conn.as_ref())
                .await?;
            models.into_iter().map(Self::to_record).collect()
        }
        .await;

        observe(REPOSITORY, "find", started, result, Vec::len)
    }

    /// Most recent fee update, if any was indexed.
    pub async fn latest(&self) -> Result<Option<PlatformFeeUpdatedRecord>> {
        let mut records = self
            .find(Page::new(Some(1), None, Some(OrderDirection::Desc)))
            .await?;
        Ok(records.pop())
    }

    fn to_active_model(record: &PlatformFeeUpdatedRecord) -> Result<ActiveModel> {
        Ok(ActiveModel {
            id: ActiveValue::Set(record.meta.id.to_string()),
            old_fee: ActiveValue::Set(amount_to_db(&record.old_fee)),
            new_fee: ActiveValue::Set(amount_to_db(&record.new_fee)),
            block_number: ActiveValue::Set(u64_to_db("block_number", record.meta.block_number)?),
            block_timestamp: ActiveValue::Set(u64_to_db(
                "block_timestamp",
                record.meta.block_timestamp,
            )?),
            transaction_hash: ActiveValue::Set(hash_to_db(&record.meta.transaction_hash)),
        })
    }

    fn to_record(model: Model) -> Result<PlatformFeeUpdatedRecord> {
        Ok(PlatformFeeUpdatedRecord {
            meta: EventMeta {
                id: EventId::from(model.id),
                block_number: u64_from_db(model.block_number),
                block_timestamp: u64_from_db(model.block_timestamp),
                transaction_hash: hash_from_db("transaction_hash", &model.transaction_hash)?,
            },
            old_fee: amount_from_db("old_fee", &model.old_fee)?,
            new_fee: amount_from_db("new_fee", &model.new_fee)?,
        })
    }
}
