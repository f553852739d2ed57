//! Shared context for command handlers.
//!
//! One context lives for one CLI invocation: it loads the league once, hands
//! it to the handler by `&mut`, and saves the whole document after a change.

use serde::Serialize;

use crate::{
    cli::SessionArgs,
    league::{League, User},
    storage::{AppStore, LoadSource},
    Result,
};

use super::resolve_credentials;

/// Context containing the loaded league and where to save it
pub struct CommandContext {
    pub store: AppStore,
    pub league: League,
    pub source: LoadSource,
    pub session: SessionArgs,
}

impl CommandContext {
    /// Load the league from the stores configured in the environment
    pub async fn open(session: SessionArgs) -> Self {
        let store = AppStore::from_env(Some(session.seed.clone()));
        Self::with_store(store, session).await
    }

    /// Load the league from an explicit store
    pub async fn with_store(mut store: AppStore, session: SessionArgs) -> Self {
        let (league, source) = store.load().await;
        Self {
            store,
            league,
            source,
            session,
        }
    }

    /// The logged-in account, from `--user/--pass` or the environment
    pub fn current_user(&self) -> Result<User> {
        let (user, pass) =
            resolve_credentials(self.session.user.as_deref(), self.session.pass.as_deref())?;
        self.league.authenticate(&user, &pass).cloned()
    }

    /// The logged-in account, which must be an admin
    pub fn admin(&self, action: &str) -> Result<User> {
        let user = self.current_user()?;
        user.require_manage_league(action)?;
        Ok(user)
    }

    /// Persist the whole league document
    pub async fn commit(&mut self) {
        self.store.save(&self.league).await;
    }

    /// Print a value as pretty JSON when `--json` was given; returns whether it did
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<bool> {
        if !self.session.json {
            return Ok(false);
        }
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(true)
    }
}
