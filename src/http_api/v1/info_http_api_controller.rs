use axum::Json;

use super::dto::info::InfoResponse;

pub(crate) struct InfoHttpApiController;

impl InfoHttpApiController {
    pub(crate) async fn handle_request() -> Json<InfoResponse> {
        Json(InfoResponse::current())
    }
}
