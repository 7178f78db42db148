use std::{sync::Arc, time::Instant};

use pq_domain::EventId;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, sea_query::OnConflict,
};

use super::sort_order;
use crate::{
    codec::{
        address_from_db, address_to_db, amount_from_db, amount_to_db, hash_from_db, hash_to_db,
        quest_id_from_db, quest_id_to_db, quest_ids_to_db, u64_from_db, u64_to_db,
    },
    error::Result,
    models::quest_completed::{ActiveModel, Column, Entity, Model},
    observability::observe,
    types::{EventMeta, Page, QuestCompletedRecord, QuestFilter},
};

const REPOSITORY: &str = "quest_completed";

#[derive(Clone)]
pub struct QuestCompletedRepository {
    conn: Arc<DatabaseConnection>,
}

impl QuestCompletedRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    /// Insert-or-ignore keyed by event id. Returns `true` when a new row was written.
    pub async fn insert(&self, record: &QuestCompletedRecord) -> Result<bool> {
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

    pub async fn find(&self, filter: &QuestFilter, page: Page) -> Result<Vec<QuestCompletedRecord>> {
        let started = Instant::now();
        let result: Result<Vec<QuestCompletedRecord>> = async {
            let models = Entity::find()
                .filter(Self::condition(filter)?)
                .order_by(Column::BlockTimestamp, sort_order(page.order))
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

    pub async fn count(&self, filter: &QuestFilter) -> Result<u64> {
        let started = Instant::now();
        let result: Result<u64> = async {
            Ok(Entity::find()
                .filter(Self::condition(filter)?)
                .count(self.conn.as_ref())
                .await?)
        }
        .await;

        observe(REPOSITORY, "count", started, result, |_| 1)
    }

    /// Number of distinct quest ids among the matching records.
    pub async fn count_distinct_quests(&self, filter: &QuestFilter) -> Result<u64> {
        let started = Instant::now();
        let result: Result<u64> = async {
            Ok(Entity::find()
                .select_only()
                .column(Column::QuestId)
                .distinct()
                .filter(Self::condition(filter)?)
                .count(self.conn.as_ref())
                .await?)
        }
        .await;

        observe(REPOSITORY, "count_distinct", started, result, |_| 1)
    }

    fn condition(filter: &QuestFilter) -> Result<Condition> {
        let mut condition = Condition::all();
        if let Some(quest_ids) = &filter.quest_ids {
            condition = condition.add(Column::QuestId.is_in(quest_ids_to_db(quest_ids)?));
        }
        if let Some(requester) = &filter.requester {
            condition = condition.add(Column::Requester.eq(address_to_db(requester)));
        }
        Ok(condition)
    }

    fn to_active_model(record: &QuestCompletedRecord) -> Result<ActiveModel> {
        Ok(ActiveModel {
            id: ActiveValue::Set(record.meta.id.to_string()),
            quest_id: ActiveValue::Set(quest_id_to_db(record.quest_id)?),
            requester: ActiveValue::Set(address_to_db(&record.requester)),
            total_selected_submissions: ActiveValue::Set(amount_to_db(
                &record.total_selected_submissions,
            )),
            total_reward_distributed: ActiveValue::Set(amount_to_db(
                &record.total_reward_distributed,
            )),
            platform_fee: ActiveValue::Set(amount_to_db(&record.platform_fee)),
            block_number: ActiveValue::Set(u64_to_db("block_number", record.meta.block_number)?),
            block_timestamp: ActiveValue::Set(u64_to_db(
                "block_timestamp",
                record.meta.block_timestamp,
            )?),
            transaction_hash: ActiveValue::Set(hash_to_db(&record.meta.transaction_hash)),
        })
    }

    fn to_record(model: Model) -> Result<QuestCompletedRecord> {
        Ok(QuestCompletedRecord {
            meta: EventMeta {
                id: EventId::from(model.id),
                block_number: u64_from_db(model.block_number),
                block_timestamp: u64_from_db(model.block_timestamp),
                transaction_hash: hash_from_db("transaction_hash", &model.transaction_hash)?,
            },
            quest_id: quest_id_from_db(model.quest_id),
            requester: address_from_db("requester", &model.requester)?,
            total_selected_submissions: amount_from_db(
                "total_selected_submissions",
                &model.total_selected_submissions,
            )?,
            total_reward_distributed: amount_from_db(
                "total_reward_distributed",
                &model.total_reward_distributed,
            )?,
            platform_fee: amount_from_db("platform_fee", &model.platform_fee)?,
        })
    }
}
