//! Fixed demo payloads
//!
//! Not backed by the database; the frontend uses them as placeholders.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TeamRecord {
    pub id: u32,
    pub name: &'static str,
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Serialize)]
pub struct PlayerStats {
    pub points: u32,
    pub assists: u32,
}

#[derive(Debug, Serialize)]
pub struct PlayerSummary {
    pub id: u32,
    pub name: &'static str,
    pub stats: PlayerStats,
}

pub const TEAM_STATS: &[TeamRecord] = &[
    TeamRecord {
        id: 1,
        name: "Team A",
        wins: 10,
        losses: 5,
    },
    TeamRecord {
        id: 2,
        name: "Team B",
        wins: 8,
        losses: 7,
    },
];

pub const PLAYERS: &[PlayerSummary] = &[
    PlayerSummary {
        id: 1,
        name: "Luka Doncic",
        stats: PlayerStats {
            points: 33,
            assists: 9,
        },
    },
    PlayerSummary {
        id: 2,
        name: "Stephen Curry",
        stats: PlayerStats {
            points: 30,
            assists: 6,
        },
    },
];

/// GET /api/team_stats
pub async fn get_team_stats() -> Json<&'static [TeamRecord]> {
    Json(TEAM_STATS)
}

/// GET /api/players
pub async fn get_players() -> Json<&'static [PlayerSummary]> {
    Json(PLAYERS)
}

pub fn fixed_routes() -> Router<AppState> {
    Router::new()
        .route("/api/team_stats", get(get_team_stats))
        .route("/api/players", get(get_players))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_team_ids_are_distinct() {
        assert_ne!(TEAM_STATS[0].id, TEAM_STATS[1].id);
    }

    #[test]
    fn test_players_serialization() {
        let value = serde_json::to_value(PLAYERS).unwrap();
        assert_eq!(
            value[1],
            json!({"id": 2, "name": "Stephen Curry", "stats": {"points": 30, "assists": 6}})
        );
    }
}
