//! Инфраструктура: источники случайности, деривация seed'ов и журналы.

pub mod logging;
pub mod rng;
pub mod rng_seed;

pub use logging::{ActionTuple, BotEventEntry, EngineLogs, IllegalMoveEntry, JsonlLog};
pub use rng::{DeterministicRng, SystemRng};
pub use rng_seed::RngSeed;
