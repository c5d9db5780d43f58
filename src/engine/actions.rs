use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::RecordedActionKind;

/// Действие, которое объявляет бот.
///
/// Семантика сумм:
/// - `Bet(n)` — итоговая ставка на улице (абсолютная);
/// - `Raise(n)` — приращение над текущей ставкой стола
///   (итоговая ставка агрессора = current_bet + n);
/// - у остальных вариантов сумма не нужна, движок её вычислит сам.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BotAction {
    Fold,
    Check,
    Call,
    Bet(Chips),
    Raise(Chips),
    AllIn,
}

impl BotAction {
    /// Тип действия для истории/логов (без суммы).
    pub fn kind(&self) -> RecordedActionKind {
        match self {
            BotAction::Fold => RecordedActionKind::Fold,
            BotAction::Check => RecordedActionKind::Check,
            BotAction::Call => RecordedActionKind::Call,
            BotAction::Bet(_) => RecordedActionKind::Bet,
            BotAction::Raise(_) => RecordedActionKind::Raise,
            BotAction::AllIn => RecordedActionKind::AllIn,
        }
    }

    /// Объявленная сумма (для логов некорректных действий).
    pub fn declared_amount(&self) -> Chips {
        match self {
            BotAction::Bet(n) | BotAction::Raise(n) => *n,
            _ => Chips::ZERO,
        }
    }
}
