use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use super::*;

impl DeviceClient {
    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Execute a GET request and return the response body.
    pub(super) async fn get(&self, path: &str) -> Result<String> {
        let url = self.endpoint(path)?;
        let resp = self.http.get(url).send().await?;
        Self::read_body(path, resp).await
    }

    /// Execute a POST request with a JSON body.
    pub(super) async fn post_json(&self, path: &str, body: &impl Serialize) -> Result<String> {
        let url = self.endpoint(path)?;
        let resp = self.http.post(url).json(body).send().await?;
        Self::read_body(path, resp).await
    }

    /// Execute a POST request with a raw binary body.
    pub(super) async fn post_bytes(&self, path: &str, body: Vec<u8>) -> Result<String> {
        let url = self.endpoint(path)?;
        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;
        Self::read_body(path, resp).await
    }

    async fn read_body(path: &str, resp: reqwest::Response) -> Result<String> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "Device rejected request");
            return Err(DeviceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}
