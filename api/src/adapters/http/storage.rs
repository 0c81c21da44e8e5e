//! Object storage client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{encode_path, handle_empty_response, handle_response};
use crate::domain::ports::ObjectStorage;
use crate::error::ExternalError;

pub struct SupabaseStorage {
    http: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStorage {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        }
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            encode_path(bucket),
            encode_path(path)
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest {
    expires_in: u64,
}

#[derive(Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: String,
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ExternalError> {
        let response = self
            .http
            .post(self.object_url(bucket, path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("content-type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;

        handle_empty_response(response).await
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            encode_path(bucket),
            encode_path(path)
        )
    }

    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: u64,
    ) -> Result<String, ExternalError> {
        let response = self
            .http
            .post(format!(
                "{}/storage/v1/object/sign/{}/{}",
                self.base_url,
                encode_path(bucket),
                encode_path(path)
            ))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&SignRequest { expires_in })
            .send()
            .await?;

        let signed: SignResponse = handle_response(response).await?;
        // The provider answers with a path relative to /storage/v1
        Ok(format!("{}/storage/v1{}", self.base_url, signed.signed_url))
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), ExternalError> {
        let response = self
            .http
            .delete(self.object_url(bucket, path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await?;

        handle_empty_response(response).await
    }
}
