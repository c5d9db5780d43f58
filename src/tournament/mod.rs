//! Турнирный слой: конфигурация и прогон раздач до победителя.

pub mod config;
pub mod runtime;

pub use config::TournamentConfig;
pub use runtime::{Tournament, TournamentResult};
