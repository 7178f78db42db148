use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
}

impl InfoResponse {
    pub(crate) fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
