use std::{sync::Arc, time::Instant};

use pq_domain::EventId;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::OnConflict,
};

use super::sort_order;
use crate::{
    codec::{
        address_from_db, address_to_db, addresses_from_db, addresses_to_db, amount_from_db,
        amount_to_db, hash_from_db, hash_to_db, quest_id_from_db, quest_id_to_db,
        quest_ids_to_db, u64_from_db, u64_to_db,
    },
    error::Result,
    models::submissions_selected::{ActiveModel, Column, Entity, Model},
    observability::observe,
    types::{EventMeta, Page, QuestFilter, SubmissionsSelectedRecord},
};

const REPOSITORY: &str = "submissions_selected";

#[derive(Clone)]
pub struct SubmissionsSelectedRepository {
    conn: Arc<DatabaseConnection>,
}

impl SubmissionsSelectedRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    /// Insert-or-ignore keyed by event id. Returns `true` when a new row was written.
    pub async fn insert(&self, record: &SubmissionsSelectedRecord) -> Result<bool> {
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

    pub async fn find(
        &self,
        filter: &QuestFilter,
        page: Page,
    ) -> Result<Vec<SubmissionsSelectedRecord>> {
        let started = Instant::now();
        let result: Result<Vec<SubmissionsSelectedRecord>> = async {
            let mut condition = Condition::all();
            if let Some(quest_ids) = &filter.quest_ids {
                condition = condition.add(Column::QuestId.is_in(quest_ids_to_db(quest_ids)?));
            }
            if let Some(requester) = &filter.requester {
                condition = condition.add(Column::Requester.eq(address_to_db(requester)));
            }

            let models = Entity::find()
                .filter(condition)
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

    fn to_active_model(record: &SubmissionsSelectedRecord) -> Result<ActiveModel> {
        Ok(ActiveModel {
            id: ActiveValue::Set(record.meta.id.to_string()),
            quest_id: ActiveValue::Set(quest_id_to_db(record.quest_id)?),
            requester: ActiveValue::Set(address_to_db(&record.requester)),
            selected_photographers: ActiveValue::Set(addresses_to_db(
                &record.selected_photographers,
            )),
            reward_per_winner: ActiveValue::Set(amount_to_db(&record.reward_per_winner)),
            timestamp: ActiveValue::Set(amount_to_db(&record.timestamp)),
            block_number: ActiveValue::Set(u64_to_db("block_number", record.meta.block_number)?),
            block_timestamp: ActiveValue::Set(u64_to_db(
                "block_timestamp",
                record.meta.block_timestamp,
            )?),
            transaction_hash: ActiveValue::Set(hash_to_db(&record.meta.transaction_hash)),
        })
    }

    fn to_record(model: Model) -> Result<SubmissionsSelectedRecord> {
        Ok(SubmissionsSelectedRecord {
            meta: EventMeta {
                id: EventId::from(model.id),
                block_number: u64_from_db(model.block_number),
                block_timestamp: u64_from_db(model.block_timestamp),
                transaction_hash: hash_from_db("transaction_hash", &model.transaction_hash)?,
            },
            quest_id: quest_id_from_db(model.quest_id),
            requester: address_from_db("requester", &model.requester)?,
            selected_photographers: addresses_from_db(
                "selected_photographers",
                &model.selected_photographers,
            )?,
            reward_per_winner: amount_from_db("reward_per_winner", &model.reward_per_winner)?,
            timestamp: amount_from_db("timestamp", &model.timestamp)?,
        })
    }
}
