use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use super::{
    HttpApiConfig,
    v1::{
        info_http_api_controller::InfoHttpApiController,
        platform_fee_http_api_controller::PlatformFeeHttpApiController,
        quest_http_api_controller::QuestHttpApiController,
        status_http_api_controller::StatusHttpApiController,
        submission_http_api_controller::SubmissionHttpApiController,
        user_http_api_controller::UserHttpApiController,
    },
};
use crate::{context::Context, error::NodeError};

/// Maximum request body size in bytes (64 KB). Every route is a GET.
const MAX_BODY_SIZE: usize = 64 * 1024;

pub(crate) struct HttpApiRouter {
    config: HttpApiConfig,
    router: Router,
}

impl HttpApiRouter {
    pub(crate) fn new(config: &HttpApiConfig, context: &Arc<Context>) -> Self {
        HttpApiRouter {
            config: config.to_owned(),
            router: routes(Arc::clone(context)),
        }
    }

    pub(crate) async fn listen_and_handle_http_requests(
        self,
        shutdown_rx: oneshot::Receiver<()>,
    ) -> Result<(), NodeError> {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, self.config.port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(address = %addr, "HTTP API listening");

        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .await?;

        Ok(())
    }
}

pub(super) fn routes(context: Arc<Context>) -> Router {
    Router::new()
        .route("/v1/info", get(InfoHttpApiController::handle_request))
        .route("/v1/status", get(StatusHttpApiController::handle_request))
        .route("/v1/quests", get(QuestHttpApiController::handle_list))
        .route("/v1/quests/active", get(QuestHttpApiController::handle_active))
        .route("/v1/quests/counts", get(QuestHttpApiController::handle_counts))
        .route(
            "/v1/quests/completed",
            get(QuestHttpApiController::handle_completed),
        )
        .route(
            "/v1/quests/cancelled",
            get(QuestHttpApiController::handle_cancelled),
        )
        .route("/v1/quests/{quest_id}", get(QuestHttpApiController::handle_get))
        .route(
            "/v1/quests/{quest_id}/submissions",
            get(QuestHttpApiController::handle_submissions),
        )
        .route(
            "/v1/quests/{quest_id}/selections",
            get(QuestHttpApiController::handle_selections),
        )
        .route(
            "/v1/submissions",
            get(SubmissionHttpApiController::handle_request),
        )
        .route(
            "/v1/users/{address}/stats",
            get(UserHttpApiController::handle_stats),
        )
        .route(
            "/v1/users/{address}/active-submissions",
            get(UserHttpApiController::handle_active_submissions),
        )
        .route(
            "/v1/users/{address}/gallery",
            get(UserHttpApiController::handle_gallery),
        )
        .route(
            "/v1/platform-fees",
            get(PlatformFeeHttpApiController::handle_request),
        )
        .with_state(context)
        // Layer order (last added runs first): body limit, tracing, CORS outermost.
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
