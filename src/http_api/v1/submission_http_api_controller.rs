use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use validator::Validate;

use super::{
    dto::{list::ListQuery, quest::SubmissionResponse},
    responses,
};
use crate::context::Context;

pub(crate) struct SubmissionHttpApiController;

impl SubmissionHttpApiController {
    /// Photo submissions, optionally narrowed by `photographer` and `questId`.
    pub(crate) async fn handle_request(
        State(context): State<Arc<Context>>,
        Query(query): Query<ListQuery>,
    ) -> impl IntoResponse {
        if let Err(errors) = query.validate() {
            return responses::invalid_query(&errors);
        }

        match context
            .repository_manager()
            .photo_submitted_repository()
            .find(&query.submission_filter(), query.page())
            .await
        {
            Ok(records) => responses::ok(
                records
                    .into_iter()
                    .map(|record| SubmissionResponse::new(record, context.file_store()))
                    .collect::<Vec<_>>(),
            ),
            Err(error) => responses::internal_error("list_submissions", error),
        }
    }
}
