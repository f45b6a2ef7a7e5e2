//! HTTP API handlers for calvary-api

pub mod fixed;
pub mod frontend;
pub mod health;
pub mod stats;

pub use fixed::{fixed_routes, get_players, get_team_stats};
pub use frontend::frontend_service;
pub use health::health_routes;
pub use stats::{get_season_averages, get_season_totals, stats_routes};
