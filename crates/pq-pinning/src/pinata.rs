use std::time::{Duration, Instant};

use async_trait::async_trait;
use pq_domain::ContentId;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;

use crate::{
    PinningConfig,
    error::{PinningError, Result},
    file_store::{FileStore, UploadOptions, UploadedFile},
    gateway::{gateway_urls, ipfs_url},
    validation::{PhotoFile, validate_file},
};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadedData,
}

#[derive(Debug, Deserialize)]
struct UploadedData {
    cid: String,
    size: u64,
    #[serde(default)]
    created_at: String,
}

/// Pinata v3 client: JWT-authenticated uploads, gateway fallback for reads.
pub struct PinataClient {
    client: Client,
    config: PinningConfig,
}

impl PinataClient {
    pub fn new(config: PinningConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &PinningConfig {
        &self.config
    }

    fn uploaded(&self, data: UploadedData) -> Result<UploadedFile> {
        let cid = ContentId::parse(&data.cid).ok_or_else(|| PinningError::InvalidResponse {
            reason: "upload response has an empty cid".to_string(),
        })?;

        Ok(UploadedFile {
            url: ipfs_url(&cid, Some("https://ipfs.io"), None),
            gateway_url: ipfs_url(&cid, None, self.config.gateway.as_deref()),
            size: data.size,
            created_at: data.created_at,
            cid,
        })
    }

    async fn pin(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> Result<UploadedFile> {
        let jwt = self.config.jwt.as_deref().ok_or(PinningError::MissingJwt)?;
        let size = bytes.len();
        let started = Instant::now();

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let mut form = Form::new().part("file", part).text("network", "public");
        if let Some(name) = &options.name {
            form = form.text("name", name.clone());
        }
        if !options.key_values.is_empty() {
            let key_values = serde_json::to_string(&options.key_values).map_err(|e| {
                PinningError::InvalidResponse {
                    reason: format!("failed to encode keyvalues: {e}"),
                }
            })?;
            form = form.text("keyvalues", key_values);
        }

        let result = self.send_upload(jwt, form).await;
        let status = if result.is_ok() { "ok" } else { "error" };
        pq_observability::record_pinning_upload(status, started.elapsed(), size);

        match &result {
            Ok(uploaded) => tracing::info!(
                cid = %uploaded.cid,
                size = uploaded.size,
                "Pinned file to IPFS"
            ),
            Err(err) => tracing::error!(error = %err, file_name, "Error uploading to IPFS"),
        }
        result
    }

    async fn send_upload(&self, jwt: &str, form: Form) -> Result<UploadedFile> {
        let response = self
            .client
            .post(&self.config.upload_url)
            .bearer_auth(jwt)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PinningError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse =
            response
                .json()
                .await
                .map_err(|e| PinningError::InvalidResponse {
                    reason: e.to_string(),
                })?;
        self.uploaded(body.data)
    }

    /// Downloads `cid`, trying the configured gateway and then the fallbacks.
    pub async fn fetch(&self, cid: &ContentId) -> Result<Vec<u8>> {
        let urls = gateway_urls(
            cid,
            self.config.gateway.as_deref(),
            &self.config.fallback_gateways,
        );
        let attempts = urls.len();

        for url in urls {
            let gateway = url.split("/ipfs/").next().unwrap_or(url.as_str()).to_string();
            match self.client.get(&url).send().await {
                Ok(response) if response.status().is_success() => match response.bytes().await {
                    Ok(bytes) => {
                        pq_observability::record_gateway_fetch(&gateway, "ok");
                        return Ok(bytes.to_vec());
                    }
                    Err(err) => {
                        pq_observability::record_gateway_fetch(&gateway, "error");
                        tracing::debug!(%url, error = %err, "Gateway body read failed");
                    }
                },
                Ok(response) => {
                    pq_observability::record_gateway_fetch(&gateway, "error");
                    tracing::debug!(%url, status = %response.status(), "Gateway returned an error");
                }
                Err(err) => {
                    pq_observability::record_gateway_fetch(&gateway, "error");
                    tracing::debug!(%url, error = %err, "Gateway request failed");
                }
            }
        }

        Err(PinningError::AllGatewaysFailed {
            cid: cid.to_string(),
            attempts,
        })
    }
}

#[async_trait]
impl FileStore for PinataClient {
    async fn upload(&self, file: &PhotoFile, options: &UploadOptions) -> Result<UploadedFile> {
        validate_file(file, &self.config.file_rules)?;
        self.pin(&file.name, &file.content_type, file.bytes.clone(), options)
            .await
    }

    fn url_for(&self, cid: &ContentId) -> String {
        ipfs_url(cid, None, self.config.gateway.as_deref())
    }
}
