/*
[INPUT]:  Publication metadata document
[OUTPUT]: Content URI of the stored document
[POS]:    HTTP layer - metadata storage upload
[UPDATE]: When the storage endpoint or its response shape changes
*/

use tracing::debug;

use crate::http::{LensClient, LensError, Result};
use crate::types::{MetadataUploadResponse, PublicationMetadata};

impl LensClient {
    /// Store `metadata` and return the `contentURI` that references it
    ///
    /// Uploads are never retried: a repeated upload would store a second copy.
    pub async fn upload_metadata(&self, metadata: &PublicationMetadata) -> Result<String> {
        let headers = self.build_headers(None)?;

        let response = self
            .http()
            .post(self.metadata_url().clone())
            .headers(headers)
            .json(metadata)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            return Err(LensError::http_status(status, &bytes));
        }

        let uploaded: MetadataUploadResponse = serde_json::from_slice(&bytes)
            .map_err(|e| LensError::Protocol(format!("unexpected metadata upload response: {e}")))?;
        if uploaded.id.is_empty() {
            return Err(LensError::Protocol("metadata upload returned an empty id".to_string()));
        }

        let content_uri = format!(
            "{}/{}",
            self.config().metadata.content_gateway.trim_end_matches('/'),
            uploaded.id
        );
        debug!(metadata_id = %metadata.metadata_id, %content_uri, "metadata stored");
        Ok(content_uri)
    }
}
