//! The issue operations the reminder run depends on.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde_json::json;

use crate::client::GithubClient;
use crate::error::Result;
use crate::types::IssueRecord;

const PAGE_SIZE: usize = 100;

#[async_trait]
pub trait IssueRepository {
    /// All open issues, pull requests excluded.
    async fn list_open_issues(&self) -> Result<Vec<IssueRecord>>;

    async fn set_labels(
        &self,
        issue: &IssueRecord,
        remove: &BTreeSet<String>,
        add: &BTreeSet<String>,
    ) -> Result<()>;

    async fn post_comment(&self, issue_number: u64, text: &str) -> Result<()>;
}

#[async_trait]
impl IssueRepository for GithubClient {
    async fn list_open_issues(&self) -> Result<Vec<IssueRecord>> {
        let mut issues = Vec::new();
        let mut page = 1;

        loop {
            let mut url = self.repo_url(&["issues"])?;
            url.query_pairs_mut()
                .append_pair("state", "open")
                .append_pair("per_page", &PAGE_SIZE.to_string())
                .append_pair("page", &page.to_string());

            let batch: Vec<IssueRecord> = self.get(url).await?;
            let fetched = batch.len();
            issues.extend(batch.into_iter().filter(|issue| !issue.is_pull_request()));

            if fetched < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        log::debug!(
            "Fetched {} open issues from {}/{}",
            issues.len(),
            self.repo().owner,
            self.repo().name
        );

        Ok(issues)
    }

    async fn set_labels(
        &self,
        issue: &IssueRecord,
        remove: &BTreeSet<String>,
        add: &BTreeSet<String>,
    ) -> Result<()> {
        let number = issue.number.to_string();

        for label in remove {
            let url = self.repo_url(&["issues", number.as_str(), "labels", label.as_str()])?;
            self.delete(url).await?;
        }

        if !add.is_empty() {
            let url = self.repo_url(&["issues", number.as_str(), "labels"])?;
            self.post(url, &json!({ "labels": add })).await?;
        }

        Ok(())
    }

    async fn post_comment(&self, issue_number: u64, text: &str) -> Result<()> {
        let number = issue_number.to_string();
        let url = self.repo_url(&["issues", number.as_str(), "comments"])?;
        self.post(url, &json!({ "body": text })).await
    }
}
