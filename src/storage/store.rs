//! Load/save facade over the remote document, the local cache and the seed file.

use super::local::LocalCache;
use super::migrate::{has_roster, league_from_document};
use super::remote::RemoteStore;
use crate::league::models::League;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Cache key of the league document.
pub const STORAGE_KEY: &str = "softball40_data";

/// Seed file read when neither store has a document.
pub const DEFAULT_SEED_PATH: &str = "data/players.json";

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Local,
    Seed,
    Empty,
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadSource::Remote => "remote",
            LoadSource::Local => "local cache",
            LoadSource::Seed => "seed file",
            LoadSource::Empty => "empty",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of reading the remote document at load time.
#[derive(Debug, PartialEq)]
pub enum RemoteState {
    /// No remote is configured
    Disabled,
    Loaded(League),
    /// The remote answered with no document, or one without a roster
    Missing,
    /// The fetch failed or the document did not parse
    Unreadable,
}

impl RemoteState {
    /// Whether a locally loaded document may be written over the remote.
    pub fn accepts_push(&self) -> bool {
        matches!(self, RemoteState::Missing)
    }
}

/// Sort a remote fetch result into a [`RemoteState`].
pub fn classify_remote(fetched: crate::error::Result<Option<Value>>) -> RemoteState {
    let doc = match fetched {
        Ok(Some(doc)) => doc,
        Ok(None) => return RemoteState::Missing,
        Err(err) => {
            error!(%err, "remote load failed");
            return RemoteState::Unreadable;
        }
    };
    if !has_roster(&doc) {
        return RemoteState::Missing;
    }
    match league_from_document(doc) {
        Ok(league) => RemoteState::Loaded(league),
        Err(err) => {
            error!(error = %format!("{:#}", err), "remote document unreadable");
            RemoteState::Unreadable
        }
    }
}

/// Whole-document persistence: the last save wins everywhere.
pub struct AppStore {
    local: Option<LocalCache>,
    remote: Option<RemoteStore>,
    seed_path: Option<PathBuf>,
}

impl AppStore {
    pub fn new(
        local: Option<LocalCache>,
        remote: Option<RemoteStore>,
        seed_path: Option<PathBuf>,
    ) -> Self {
        Self {
            local,
            remote,
            seed_path,
        }
    }

    /// Default cache location plus the remote configured in the environment.
    /// A cache that cannot be opened is skipped with a warning.
    pub fn from_env(seed_path: Option<PathBuf>) -> Self {
        let local = match LocalCache::new() {
            Ok(cache) => Some(cache),
            Err(err) => {
                warn!(%err, "local cache unavailable");
                None
            }
        };
        Self::new(local, RemoteStore::from_env(), seed_path)
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    async fn load_remote(&self) -> RemoteState {
        match self.remote.as_ref() {
            Some(remote) => classify_remote(remote.fetch().await),
            None => RemoteState::Disabled,
        }
    }

    fn load_local(&self) -> Option<League> {
        let local = self.local.as_ref()?;
        let text = match local.load(STORAGE_KEY) {
            Ok(text) => text?,
            Err(err) => {
                error!(%err, "local cache read failed");
                return None;
            }
        };
        let doc: Value = match serde_json::from_str(&text) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(%err, "local cache is corrupt, ignoring it");
                return None;
            }
        };
        if !has_roster(&doc) {
            return None;
        }
        league_from_document(doc)
            .map_err(|err| warn!(error = %format!("{:#}", err), "local document unreadable"))
            .ok()
    }

    fn load_seed(&self) -> Option<League> {
        let path = self.seed_path.as_ref()?;
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), %err, "seed file not read");
                return None;
            }
        };
        let result = serde_json::from_str::<Value>(&text)
            .map_err(anyhow::Error::from)
            .and_then(league_from_document);
        match result {
            Ok(league) => Some(league),
            Err(err) => {
                error!(path = %path.display(), error = %format!("{:#}", err), "seed failed");
                None
            }
        }
    }

    /// Load the league: remote first, then the local cache, then the seed
    /// file, then an empty document. Never fails.
    ///
    /// A remote document refreshes the cache. A cached or seeded document is
    /// pushed to the remote only when the remote holds no roster; a remote
    /// that failed to fetch or parse is left untouched.
    pub async fn load(&mut self) -> (League, LoadSource) {
        let remote = match self.load_remote().await {
            RemoteState::Loaded(league) => {
                info!(source = %LoadSource::Remote, "league loaded");
                self.save_local(&league);
                return (league, LoadSource::Remote);
            }
            other => other,
        };
        if let Some(league) = self.load_local() {
            info!(source = %LoadSource::Local, "league loaded");
            self.push_if_missing(&remote, &league).await;
            return (league, LoadSource::Local);
        }
        if let Some(league) = self.load_seed() {
            info!(source = %LoadSource::Seed, "league loaded");
            self.save_local(&league);
            self.push_if_missing(&remote, &league).await;
            return (league, LoadSource::Seed);
        }
        let mut league = League::default();
        league.ensure_default_admin();
        info!(source = %LoadSource::Empty, "starting with an empty league");
        (league, LoadSource::Empty)
    }

    async fn push_if_missing(&self, remote: &RemoteState, league: &League) {
        if remote.accepts_push() {
            self.save_remote(league).await;
        } else if matches!(remote, RemoteState::Unreadable) {
            warn!("remote document left as is until it loads again");
        }
    }

    fn save_local(&mut self, league: &League) {
        let Some(local) = self.local.as_mut() else {
            return;
        };
        let result = serde_json::to_string(league)
            .map_err(anyhow::Error::from)
            .and_then(|text| local.save(STORAGE_KEY, &text));
        if let Err(err) = result {
            error!(%err, "local save failed");
        }
    }

    async fn save_remote(&self, league: &League) {
        let Some(remote) = self.remote.as_ref() else {
            return;
        };
        let doc = match serde_json::to_value(league) {
            Ok(doc) => doc,
            Err(err) => {
                error!(%err, "league serialization failed");
                return;
            }
        };
        match remote.put(&doc).await {
            Ok(()) => info!("remote saved"),
            Err(err) => error!(%err, "remote save failed"),
        }
    }

    /// Write the whole document to the cache and the remote. Failures are
    /// logged, never returned.
    pub async fn save(&mut self, league: &League) {
        self.save_local(league);
        self.save_remote(league).await;
    }

    /// Remove the document from the cache and the remote.
    pub async fn reset(&mut self) {
        if let Some(local) = self.local.as_mut() {
            if let Err(err) = local.remove(STORAGE_KEY) {
                error!(%err, "local reset failed");
            }
        }
        if let Some(remote) = self.remote.as_ref() {
            match remote.delete().await {
                Ok(()) => info!("remote document removed"),
                Err(err) => error!(%err, "remote reset failed"),
            }
        }
    }

    /// The cached document as stored, if any.
    pub fn cached_document(&self) -> Option<String> {
        self.local.as_ref()?.load(STORAGE_KEY).ok()?
    }
}
