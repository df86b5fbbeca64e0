use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::RepoRef;
use crate::error::{DueError, Result};

const USER_AGENT: &str = "due-reminder";
const ACCEPT: &str = "application/vnd.github+json";

pub struct GithubClient {
    http: Client,
    base: Url,
    token: String,
    repo: RepoRef,
}

impl GithubClient {
    pub fn new(base: Url, token: String, repo: RepoRef) -> Self {
        Self {
            http: Client::new(),
            base,
            token,
            repo,
        }
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    /// `{base}/repos/{owner}/{name}/{segments...}`, each segment percent-encoded.
    pub fn repo_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DueError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(["repos", self.repo.owner.as_str(), self.repo.name.as_str()])
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(Method::GET, url, None).await?;
        Ok(response.json().await?)
    }

    pub async fn post(&self, url: Url, body: &serde_json::Value) -> Result<()> {
        self.send(Method::POST, url, Some(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, url: Url) -> Result<()> {
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<Response> {
        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(DueError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response)
    }
}
