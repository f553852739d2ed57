//! Role checks for admin panel accounts.
//!
//! `admin` may do everything. `delegado` edits the lineup of their own team,
//! `anotador` edits any lineup, and both may post match messages. `invitado`
//! is read-only.

use crate::cli::types::{Role, TeamId};
use crate::error::{LeagueError, Result};
use crate::league::models::{League, User};
use tracing::debug;

impl League {
    /// Make sure at least one admin account exists.
    pub fn ensure_default_admin(&mut self) {
        if !self.users.iter().any(|u| u.rol == Role::Admin) {
            self.users.push(User::default_admin());
        }
    }

    /// Find the account matching a username and password.
    pub fn authenticate(&self, user: &str, pass: &str) -> Result<&User> {
        let user = user.trim();
        self.users
            .iter()
            .find(|u| u.user == user && u.pass == pass)
            .ok_or_else(|| {
                debug!(user, "login rejected");
                LeagueError::InvalidCredentials
            })
    }
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.rol == Role::Admin
    }

    /// Team CRUD, roster, calendar, standings overrides and data resets.
    pub fn can_manage_league(&self) -> bool {
        self.is_admin()
    }

    pub fn can_edit_lineup(&self, team_id: &TeamId) -> bool {
        match self.rol {
            Role::Admin | Role::Anotador => true,
            Role::Delegado => self.equipo.as_ref() == Some(team_id),
            Role::Invitado => false,
        }
    }

    pub fn can_post_message(&self) -> bool {
        matches!(self.rol, Role::Admin | Role::Delegado | Role::Anotador)
    }

    pub fn require_manage_league(&self, action: &str) -> Result<()> {
        require(self.can_manage_league(), action)
    }

    pub fn require_edit_lineup(&self, team_id: &TeamId) -> Result<()> {
        require(
            self.can_edit_lineup(team_id),
            &format!("edit lineup of {}", team_id),
        )
    }

    pub fn require_post_message(&self) -> Result<()> {
        require(self.can_post_message(), "post messages")
    }
}

fn require(allowed: bool, action: &str) -> Result<()> {
    if allowed {
        Ok(())
    } else {
        Err(LeagueError::PermissionDenied {
            action: action.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::UserId;

    fn user(rol: Role, equipo: Option<&str>) -> User {
        User {
            id: UserId::new("u1"),
            nombre: "Usuario".to_string(),
            user: "usuario".to_string(),
            pass: "secreto".to_string(),
            rol,
            equipo: equipo.map(TeamId::new),
        }
    }

    #[test]
    fn test_ensure_default_admin() {
        let mut league = League::default();
        league.ensure_default_admin();
        league.ensure_default_admin();
        assert_eq!(league.users.len(), 1);
        assert!(league.authenticate("admin", "1234").is_ok());
    }

    #[test]
    fn test_authenticate() {
        let mut league = League::default();
        league.users.push(user(Role::Anotador, None));
        assert_eq!(
            league.authenticate(" usuario ", "secreto").unwrap().rol,
            Role::Anotador
        );
        assert!(matches!(
            league.authenticate("usuario", "mal"),
            Err(LeagueError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_lineup_permissions_by_role() {
        let tigres = TeamId::new("tigres");
        let leones = TeamId::new("leones");

        assert!(user(Role::Admin, None).can_edit_lineup(&leones));
        assert!(user(Role::Anotador, None).can_edit_lineup(&leones));

        let delegado = user(Role::Delegado, Some("tigres"));
        assert!(delegado.can_edit_lineup(&tigres));
        assert!(!delegado.can_edit_lineup(&leones));
        assert!(matches!(
            delegado.require_edit_lineup(&leones),
            Err(LeagueError::PermissionDenied { .. })
        ));

        assert!(!user(Role::Invitado, None).can_edit_lineup(&tigres));
    }

    #[test]
    fn test_manage_and_message_permissions() {
        assert!(user(Role::Admin, None).require_manage_league("add team").is_ok());
        assert!(user(Role::Delegado, Some("tigres"))
            .require_manage_league("add team")
            .is_err());
        assert!(user(Role::Delegado, Some("tigres")).can_post_message());
        assert!(!user(Role::Invitado, None).can_post_message());
    }
}
