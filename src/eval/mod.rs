//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate_best_hand(hole, board) -> HandRank`
//!   `determine_winners(hole_cards, board, eligible) -> Vec<PlayerIndex>`

pub mod evaluator;
pub mod hand_rank;
pub mod masks;

pub use evaluator::{determine_winners, evaluate_best_hand};
pub use hand_rank::HandCategory;
