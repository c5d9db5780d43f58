use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::RecordedActionKind;
use crate::domain::player::SeatState;
use crate::engine::actions::BotAction;
use crate::engine::betting::BettingState;

/// Действие после валидации — то, что движок реально применит.
///
/// Суммы уже вычислены: для call/all-in это фишки из стека,
/// для bet — итоговая ставка улицы, для raise — приращение над
/// текущей ставкой стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidatedAction {
    pub kind: RecordedActionKind,
    pub amount: Chips,
}

impl ValidatedAction {
    fn new(kind: RecordedActionKind, amount: Chips) -> Self {
        Self { kind, amount }
    }
}

/// Результат валидации: действие плюс причина коррекции, если
/// объявленное пришлось поправить. Валидатор никогда не отклоняет ход —
/// любое объявление сводится к какому-то легальному действию.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validation {
    pub action: ValidatedAction,
    pub correction: Option<&'static str>,
}

impl Validation {
    fn ok(action: ValidatedAction) -> Self {
        Self {
            action,
            correction: None,
        }
    }

    fn corrected(action: ValidatedAction, reason: &'static str) -> Self {
        Self {
            action,
            correction: Some(reason),
        }
    }
}

/// Набор легальных действий для текущего контекста — ботам для
/// самопроверки перед объявлением хода.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalActions {
    pub can_fold: bool,
    pub can_check: bool,
    /// Сколько стоит call (None, если уравнивать нечего).
    pub call_amount: Option<Chips>,
    /// (минимальная, максимальная) ставка, когда ставки ещё нет.
    /// Максимум = весь стек (олл-ин).
    pub bet_range: Option<(Chips, Chips)>,
    /// (минимальное, максимальное) приращение рейза поверх текущей ставки.
    pub raise_range: Option<(Chips, Chips)>,
}

/// Перечислить легальные действия игрока в текущем состоянии торговли.
pub fn legal_actions(seat: &SeatState, betting: &BettingState) -> LegalActions {
    let to_call = betting.current_bet.saturating_sub(seat.street_bet);
    let stack = seat.stack;

    let bet_range = if betting.current_bet.is_zero() && !stack.is_zero() {
        Some((betting.min_raise.min(stack), stack))
    } else {
        None
    };

    let raise_range = if !betting.current_bet.is_zero() && seat.can_raise && stack > to_call {
        let max_increment = stack - to_call;
        Some((betting.min_raise.min(max_increment), max_increment))
    } else {
        None
    };

    LegalActions {
        can_fold: true,
        can_check: to_call.is_zero(),
        call_amount: if to_call.is_zero() {
            None
        } else {
            Some(to_call.min(stack))
        },
        bet_range,
        raise_range,
    }
}

/// Валидация и коррекция объявленного действия.
///
/// Порядок правил повторяет судейскую лесенку:
/// fold без ставки → check; check против ставки → fold;
/// call без фишек → олл-ин; bet против ставки ↔ raise без ставки
/// переинтерпретируются; недобор до min_raise добивается до минимума;
/// перебор стека сводится в олл-ин.
pub fn validate_action(declared: &BotAction, seat: &SeatState, betting: &BettingState) -> Validation {
    let to_call = betting.current_bet.saturating_sub(seat.street_bet);
    let stack = seat.stack;

    match *declared {
        BotAction::Fold => {
            if to_call.is_zero() {
                // Анти-ошибка: фолдить, когда можно бесплатно чекнуть, нет смысла.
                Validation::corrected(
                    ValidatedAction::new(RecordedActionKind::Check, Chips::ZERO),
                    "fold_with_nothing_to_call",
                )
            } else {
                Validation::ok(ValidatedAction::new(RecordedActionKind::Fold, Chips::ZERO))
            }
        }

        BotAction::Check => {
            if to_call.is_zero() {
                Validation::ok(ValidatedAction::new(RecordedActionKind::Check, Chips::ZERO))
            } else {
                Validation::corrected(
                    ValidatedAction::new(RecordedActionKind::Fold, Chips::ZERO),
                    "check_facing_a_bet",
                )
            }
        }

        BotAction::Call => {
            if to_call.is_zero() {
                Validation::corrected(
                    ValidatedAction::new(RecordedActionKind::Check, Chips::ZERO),
                    "call_with_nothing_to_call",
                )
            } else if stack <= to_call {
                Validation::corrected(
                    ValidatedAction::new(RecordedActionKind::AllIn, stack),
                    "call_for_more_than_stack",
                )
            } else {
                Validation::ok(ValidatedAction::new(RecordedActionKind::Call, to_call))
            }
        }

        BotAction::Bet(amount) => {
            if !betting.current_bet.is_zero() {
                // Ставка уже есть: bet переинтерпретируется как raise.
                if stack <= to_call {
                    return Validation::corrected(
                        ValidatedAction::new(RecordedActionKind::Fold, Chips::ZERO),
                        "bet_facing_a_bet_without_raise_stack",
                    );
                }
                if !seat.can_raise {
                    return Validation::corrected(
                        ValidatedAction::new(RecordedActionKind::Call, to_call),
                        "raise_rights_closed",
                    );
                }
                return validate_raise(amount, seat, betting, "bet_facing_a_bet");
            }

            if amount < betting.min_raise {
                let bumped = betting.min_raise;
                if bumped >= stack {
                    Validation::corrected(
                        ValidatedAction::new(RecordedActionKind::AllIn, stack),
                        "bet_below_minimum",
                    )
                } else {
                    Validation::corrected(
                        ValidatedAction::new(RecordedActionKind::Bet, bumped),
                        "bet_below_minimum",
                    )
                }
            } else if amount >= stack {
                let reason = if amount == stack {
                    // Ставка ровно в стек — это и есть олл-ин, просто переименуем.
                    "bet_of_entire_stack"
                } else {
                    "bet_over_stack"
                };
                Validation::corrected(ValidatedAction::new(RecordedActionKind::AllIn, stack), reason)
            } else {
                Validation::ok(ValidatedAction::new(RecordedActionKind::Bet, amount))
            }
        }

        BotAction::Raise(amount) => {
            if betting.current_bet.is_zero() {
                // Рейзить нечего: переинтерпретируем как bet.
                let declared_bet = BotAction::Bet(amount);
                let v = validate_action(&declared_bet, seat, betting);
                return Validation::corrected(v.action, "raise_with_no_bet_standing");
            }
            if !seat.can_raise {
                // Короткий олл-ин не открыл торговлю заново: только call/fold.
                return if stack <= to_call {
                    Validation::corrected(
                        ValidatedAction::new(RecordedActionKind::AllIn, stack),
                        "raise_rights_closed",
                    )
                } else {
                    Validation::corrected(
                        ValidatedAction::new(RecordedActionKind::Call, to_call),
                        "raise_rights_closed",
                    )
                };
            }
            validate_raise(amount, seat, betting, "")
        }

        BotAction::AllIn => Validation::ok(ValidatedAction::new(RecordedActionKind::AllIn, stack)),
    }
}

/// Общая ветка для raise (и bet, переинтерпретированного в raise).
/// amount — объявленное приращение над текущей ставкой стола.
fn validate_raise(
    amount: Chips,
    seat: &SeatState,
    betting: &BettingState,
    reinterpret_reason: &'static str,
) -> Validation {
    let to_call = betting.current_bet.saturating_sub(seat.street_bet);
    let stack = seat.stack;

    let (increment, mut reason) = if amount < betting.min_raise {
        (betting.min_raise, "raise_below_minimum")
    } else {
        (amount, "")
    };
    if reason.is_empty() {
        reason = reinterpret_reason;
    }

    let cost = to_call + increment;
    if cost >= stack {
        let all_in_reason = if reason.is_empty() {
            "raise_over_stack"
        } else {
            reason
        };
        Validation::corrected(
            ValidatedAction::new(RecordedActionKind::AllIn, stack),
            all_in_reason,
        )
    } else if reason.is_empty() {
        Validation::ok(ValidatedAction::new(RecordedActionKind::Raise, increment))
    } else {
        Validation::corrected(ValidatedAction::new(RecordedActionKind::Raise, increment), reason)
    }
}
