use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};

use super::{
    dto::user::{ActiveSubmissionResponse, GalleryResponse},
    responses,
};
use crate::context::Context;

pub(crate) struct UserHttpApiController;

impl UserHttpApiController {
    pub(crate) async fn handle_stats(
        State(context): State<Arc<Context>>,
        Path(address): Path<String>,
    ) -> Response {
        let user = match responses::parse_address(&address) {
            Ok(user) => user,
            Err(response) => return response,
        };

        match context.read_model().user_stats(user).await {
            Ok(stats) => responses::ok(stats),
            Err(error) => responses::internal_error("user_stats", error),
        }
    }

    pub(crate) async fn handle_active_submissions(
        State(context): State<Arc<Context>>,
        Path(address): Path<String>,
    ) -> Response {
        let photographer = match responses::parse_address(&address) {
            Ok(photographer) => photographer,
            Err(response) => return response,
        };

        match context.read_model().active_submissions(photographer).await {
            Ok(submissions) => responses::ok(
                submissions
                    .into_iter()
                    .map(|submission| {
                        ActiveSubmissionResponse::new(submission, context.file_store())
                    })
                    .collect::<Vec<_>>(),
            ),
            Err(error) => responses::internal_error("active_submissions", error),
        }
    }

    pub(crate) async fn handle_gallery(
        State(context): State<Arc<Context>>,
        Path(address): Path<String>,
    ) -> Response {
        let requester = match responses::parse_address(&address) {
            Ok(requester) => requester,
            Err(response) => return response,
        };

        match context.read_model().gallery(requester).await {
            Ok(gallery) => responses::ok(GalleryResponse::new(gallery, context.file_store())),
            Err(error) => responses::internal_error("gallery", error),
        }
    }
}
