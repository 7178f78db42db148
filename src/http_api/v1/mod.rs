pub(crate) mod dto;
pub(crate) mod info_http_api_controller;
pub(crate) mod platform_fee_http_api_controller;
pub(crate) mod quest_http_api_controller;
mod responses;
pub(crate) mod status_http_api_controller;
pub(crate) mod submission_http_api_controller;
pub(crate) mod user_http_api_controller;
