//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod league_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let league_error = LeagueError::from(json_error);

        match league_error {
            LeagueError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let league_error = LeagueError::from(io_error);

        match league_error {
            LeagueError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_anyhow_error_becomes_storage() {
        let err = anyhow::anyhow!("disk full");
        let league_error = LeagueError::from(err);

        match league_error {
            LeagueError::Storage { message } => assert_eq!(message, "disk full"),
            _ => panic!("Expected Storage error variant"),
        }
    }

    #[test]
    fn test_sqlite_error_becomes_storage() {
        let err = rusqlite::Error::QueryReturnedNoRows;
        let league_error = LeagueError::from(err);

        assert!(matches!(league_error, LeagueError::Storage { .. }));
    }

    #[test]
    fn test_missing_credentials_error() {
        let error = LeagueError::MissingCredentials {
            env_var: "SOFTBALL_USER".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("Credentials not provided"));
        assert!(error_string.contains("SOFTBALL_USER"));
    }

    #[test]
    fn test_validation_shorthand() {
        let error = LeagueError::validation("Elige dos equipos diferentes.");
        assert_eq!(error.to_string(), "Elige dos equipos diferentes.");
    }

    #[test]
    fn test_duplicate_team_message() {
        let error = LeagueError::DuplicateTeamName {
            name: "Tigres".to_string(),
        };
        assert_eq!(error.to_string(), "A team named 'Tigres' already exists");
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            LeagueError::TeamNotFound {
                id: "tigres".to_string()
            }
            .to_string(),
            "Team not found: tigres"
        );
        assert_eq!(
            LeagueError::MatchNotFound {
                id: "p1".to_string()
            }
            .to_string(),
            "Match not found: p1"
        );
    }

    #[test]
    fn test_error_debug_format() {
        let error = LeagueError::InvalidCredentials;
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("InvalidCredentials"));
    }
}
