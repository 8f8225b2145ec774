use std::time::Duration;

use anyhow::Context as _;
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_JSONSTORE_BASE_URL: &str = "https://www.jsonstore.io";

#[derive(Debug, Deserialize)]
struct JsonStoreResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    ok: bool,
}

#[derive(Clone, Debug)]
pub struct JsonStoreClient {
    http: reqwest::Client,
    endpoint: String,
}

impl JsonStoreClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> anyhow::Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            anyhow::bail!("jsonstore token must not be empty");
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build jsonstore http client: {e}"))?;

        Ok(Self {
            http,
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), token),
        })
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        if path.is_empty() {
            self.endpoint.clone()
        } else {
            format!("{}/{}", self.endpoint, path)
        }
    }

    pub async fn read(&self, path: &str) -> anyhow::Result<Option<Value>> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("jsonstore GET failed for `{path}`"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("jsonstore GET `{path}` returned HTTP {status}: {body}");
        }

        let payload: JsonStoreResponse = response
            .json()
            .await
            .with_context(|| format!("jsonstore GET `{path}` returned an unreadable body"))?;

        if !payload.ok {
            anyhow::bail!("jsonstore GET `{path}` was rejected by the store");
        }

        Ok(payload.result.filter(|value| !value.is_null()))
    }

    pub async fn write(&self, path: &str, value: Value) -> anyhow::Result<()> {
        let response = self
            .http
            .post(self.url(path))
            .json(&value)
            .send()
            .await
            .with_context(|| format!("jsonstore POST failed for `{path}`"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("jsonstore POST `{path}` returned HTTP {status}: {body}");
        }

        Ok(())
    }

    pub async fn delete(&self, path: &str) -> anyhow::Result<()> {
        let response = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .with_context(|| format!("jsonstore DELETE failed for `{path}`"))?;

        let status = response.status();
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("jsonstore DELETE `{path}` returned HTTP {status}: {body}");
        }

        Ok(())
    }
}
