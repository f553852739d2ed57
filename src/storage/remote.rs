//! Cloud copy of the league document (Firebase Realtime Database REST API)

use crate::error::Result;
use crate::{SOFTBALL_FIREBASE_AUTH, SOFTBALL_FIREBASE_URL};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Path of the league document under the database root.
pub const DOCUMENT_PATH: &str = "softball40";

#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: String,
    auth: Option<String>,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>, auth: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            auth: auth.filter(|a| !a.trim().is_empty()),
        }
    }

    /// Configure from `SOFTBALL_FIREBASE_URL` / `SOFTBALL_FIREBASE_AUTH`.
    /// `None` when no URL is set, which means local-only operation.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(SOFTBALL_FIREBASE_URL)
            .ok()
            .filter(|u| !u.trim().is_empty())?;
        Some(Self::new(url, std::env::var(SOFTBALL_FIREBASE_AUTH).ok()))
    }

    /// `{base}/softball40.json`, with `?auth=` when a token is set.
    pub fn document_url(&self) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        match &self.auth {
            Some(token) => format!("{}/{}.json?auth={}", base, DOCUMENT_PATH, token),
            None => format!("{}/{}.json", base, DOCUMENT_PATH),
        }
    }

    /// Fetch the document. An empty database answers `null`, returned as `None`.
    pub async fn fetch(&self) -> Result<Option<Value>> {
        let value = self
            .client
            .get(self.document_url())
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        debug!(empty = value.is_null(), "remote document fetched");
        Ok(Some(value).filter(|v| !v.is_null()))
    }

    /// Overwrite the whole document.
    pub async fn put(&self, doc: &Value) -> Result<()> {
        self.client
            .put(self.document_url())
            .json(doc)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn delete(&self) -> Result<()> {
        self.client
            .delete(self.document_url())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_url() {
        let store = RemoteStore::new("https://liga.firebaseio.com/", None);
        assert_eq!(
            store.document_url(),
            "https://liga.firebaseio.com/softball40.json"
        );

        let store = RemoteStore::new("https://liga.firebaseio.com", Some("tok".to_string()));
        assert_eq!(
            store.document_url(),
            "https://liga.firebaseio.com/softball40.json?auth=tok"
        );
    }

    #[test]
    fn test_blank_auth_ignored() {
        let store = RemoteStore::new("http://localhost:9000", Some("  ".to_string()));
        assert_eq!(store.document_url(), "http://localhost:9000/softball40.json");
    }
}
