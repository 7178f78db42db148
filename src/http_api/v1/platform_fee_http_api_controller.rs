use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use super::{dto::list::ListQuery, responses};
use crate::context::Context;

pub(crate) struct PlatformFeeHttpApiController;

impl PlatformFeeHttpApiController {
    pub(crate) async fn handle_request(
        State(context): State<Arc<Context>>,
        Query(query): Query<ListQuery>,
    ) -> impl IntoResponse {
        match context
            .repository_manager()
            .platform_fee_repository()
            .find(query.page())
            .await
        {
            Ok(updates) => responses::ok(updates),
            Err(error) => responses::internal_error("list_platform_fees", error),
        }
    }
}
