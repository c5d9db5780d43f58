//! Покерный движок: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Основная операция — [`play_hand`]: прогоняет одну раздачу через машину
//! состояний SETUP → улицы → SHOWDOWN → FINALIZE, опрашивая ботов через
//! харнесы и прогоняя каждое объявление через валидатор.

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod positions;
pub mod side_pots;
pub mod validation;

pub use actions::BotAction;
pub use betting::BettingState;
pub use errors::{ConfigError, EngineError};
pub use game_loop::play_hand;
pub use side_pots::{compute_pots, reconcile_bets_to_pots, refund_uncalled_bet};
pub use validation::{legal_actions, validate_action, LegalActions, ValidatedAction, Validation};

/// RNG интерфейс для engine. Реализации живут в infra
/// (обёртки над `rand` + sha2-деривация seed'ов).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
