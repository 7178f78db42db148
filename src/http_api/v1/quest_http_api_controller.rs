use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use hyper::StatusCode;
use pq_repository::{QuestFilter, SubmissionFilter};
use validator::Validate;

use super::{
    dto::{
        list::ListQuery,
        quest::{PendingQuestResponse, SubmissionResponse},
    },
    responses,
};
use crate::{context::Context, read_model::QuestViewState};

pub(crate) struct QuestHttpApiController;

impl QuestHttpApiController {
    /// Indexed `QuestCreated` events.
    pub(crate) async fn handle_list(
        State(context): State<Arc<Context>>,
        Query(query): Query<ListQuery>,
    ) -> Response {
        if let Err(errors) = query.validate() {
            return responses::invalid_query(&errors);
        }

        match context
            .repository_manager()
            .quest_created_repository()
            .find(&query.quest_filter(), query.page())
            .await
        {
            Ok(records) => responses::ok(records),
            Err(error) => responses::internal_error("list_quests", error),
        }
    }

    pub(crate) async fn handle_active(
        State(context): State<Arc<Context>>,
        Query(query): Query<ListQuery>,
    ) -> Response {
        if let Err(errors) = query.validate() {
            return responses::invalid_query(&errors);
        }

        match context.read_model().active_quests(query.page()).await {
            Ok(quests) => responses::ok(quests),
            Err(error) => responses::internal_error("active_quests", error),
        }
    }

    pub(crate) async fn handle_counts(State(context): State<Arc<Context>>) -> Response {
        match context.read_model().quest_counts().await {
            Ok(counts) => responses::ok(counts),
            Err(error) => responses::internal_error("quest_counts", error),
        }
    }

    pub(crate) async fn handle_completed(
        State(context): State<Arc<Context>>,
        Query(query): Query<ListQuery>,
    ) -> Response {
        if let Err(errors) = query.validate() {
            return responses::invalid_query(&errors);
        }

        match context
            .repository_manager()
            .quest_completed_repository()
            .find(&query.quest_filter(), query.page())
            .await
        {
            Ok(records) => responses::ok(records),
            Err(error) => responses::internal_error("list_completed", error),
        }
    }

    pub(crate) async fn handle_cancelled(
        State(context): State<Arc<Context>>,
        Query(query): Query<ListQuery>,
    ) -> Response {
        if let Err(errors) = query.validate() {
            return responses::invalid_query(&errors);
        }

        match context
            .repository_manager()
            .quest_cancelled_repository()
            .find(&query.quest_filter(), query.page())
            .await
        {
            Ok(records) => responses::ok(records),
            Err(error) => responses::internal_error("list_cancelled", error),
        }
    }

    /// Reconciled view: 200 ready, 202 indexed but not yet readable, 404, or
    /// 503 while the contract cannot be reached.
    pub(crate) async fn handle_get(
        State(context): State<Arc<Context>>,
        Path(quest_id): Path<String>,
    ) -> Response {
        let quest_id = match responses::parse_quest_id(&quest_id) {
            Ok(quest_id) => quest_id,
            Err(response) => return response,
        };

        match context.read_model().quest_view(quest_id).await {
            Ok(QuestViewState::Ready(view)) => responses::ok(view.as_ref()),
            Ok(QuestViewState::Pending(record)) => (
                StatusCode::ACCEPTED,
                Json(PendingQuestResponse::new(record)),
            )
                .into_response(),
            Ok(QuestViewState::NotFound) => {
                responses::not_found(format!("Quest {quest_id} does not exist"))
            }
            Ok(QuestViewState::Unavailable { reason }) => {
                tracing::warn!(quest_id = %quest_id, reason = %reason, "Quest view unavailable");
                responses::error(
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("Quest {quest_id} cannot be read right now: {reason}"),
                )
            }
            Err(error) => responses::internal_error("quest_view", error),
        }
    }

    pub(crate) async fn handle_submissions(
        State(context): State<Arc<Context>>,
        Path(quest_id): Path<String>,
        Query(query): Query<ListQuery>,
    ) -> Response {
        let quest_id = match responses::parse_quest_id(&quest_id) {
            Ok(quest_id) => quest_id,
            Err(response) => return response,
        };

        match context
            .repository_manager()
            .photo_submitted_repository()
            .find(&SubmissionFilter::quest(quest_id), query.page())
            .await
        {
            Ok(records) => responses::ok(
                records
                    .into_iter()
                    .map(|record| SubmissionResponse::new(record, context.file_store()))
                    .collect::<Vec<_>>(),
            ),
            Err(error) => responses::internal_error("quest_submissions", error),
        }
    }

    pub(crate) async fn handle_selections(
        State(context): State<Arc<Context>>,
        Path(quest_id): Path<String>,
        Query(query): Query<ListQuery>,
    ) -> Response {
        let quest_id = match responses::parse_quest_id(&quest_id) {
            Ok(quest_id) => quest_id,
            Err(response) => return response,
        };

        match context
            .repository_manager()
            .submissions_selected_repository()
            .find(&QuestFilter::quest(quest_id), query.page())
            .await
        {
            Ok(records) => responses::ok(records),
            Err(error) => responses::internal_error("quest_selections", error),
        }
    }
}
