//! Тесты валидатора действий: судейская лесенка коррекций,
//! перечисление легальных действий, правило минимального рейза.

use poker_arena::domain::chips::Chips;
use poker_arena::domain::hand::{RecordedActionKind as Kind, Street};
use poker_arena::domain::player::SeatState;
use poker_arena::engine::actions::BotAction;
use poker_arena::engine::betting::BettingState;
use poker_arena::engine::{legal_actions, validate_action};

/// Место с заданным стеком и ставкой на улице.
fn seat(stack: u64, street_bet: u64) -> SeatState {
    let mut s = SeatState::new(Chips(stack));
    s.street_bet = Chips(street_bet);
    s
}

/// Состояние торговли с заданной целевой ставкой и min_raise.
fn betting(current_bet: u64, min_raise: u64) -> BettingState {
    BettingState::new(Street::Flop, Chips(current_bet), Chips(min_raise), vec![])
}

//
// ====================== ЛЕСЕНКА КОРРЕКЦИЙ ======================
//

#[test]
fn fold_with_nothing_to_call_becomes_check() {
    let v = validate_action(&BotAction::Fold, &seat(1000, 0), &betting(0, 20));
    assert_eq!(v.action.kind, Kind::Check);
    assert!(v.correction.is_some(), "Анти-ошибка обязана логироваться");
}

#[test]
fn fold_facing_a_bet_stays_fold() {
    let v = validate_action(&BotAction::Fold, &seat(1000, 0), &betting(50, 20));
    assert_eq!(v.action.kind, Kind::Fold);
    assert!(v.correction.is_none());
}

#[test]
fn check_facing_a_bet_becomes_fold() {
    let v = validate_action(&BotAction::Check, &seat(1000, 0), &betting(50, 20));
    assert_eq!(v.action.kind, Kind::Fold);
    assert!(v.correction.is_some());
}

#[test]
fn legal_check_passes_through() {
    let v = validate_action(&BotAction::Check, &seat(1000, 0), &betting(0, 20));
    assert_eq!(v.action.kind, Kind::Check);
    assert!(v.correction.is_none());
}

#[test]
fn call_computes_amount_from_context() {
    let v = validate_action(&BotAction::Call, &seat(1000, 10), &betting(50, 20));
    assert_eq!(v.action.kind, Kind::Call);
    assert_eq!(v.action.amount, Chips(40), "Доплата до целевой ставки");
    assert!(v.correction.is_none());
}

#[test]
fn call_with_nothing_to_call_becomes_check() {
    let v = validate_action(&BotAction::Call, &seat(1000, 50), &betting(50, 20));
    assert_eq!(v.action.kind, Kind::Check);
    assert!(v.correction.is_some());
}

#[test]
fn call_for_more_than_stack_becomes_all_in() {
    let v = validate_action(&BotAction::Call, &seat(30, 0), &betting(50, 20));
    assert_eq!(v.action.kind, Kind::AllIn);
    assert_eq!(v.action.amount, Chips(30));
}

#[test]
fn bet_below_minimum_is_bumped() {
    let v = validate_action(&BotAction::Bet(Chips(5)), &seat(1000, 0), &betting(0, 20));
    assert_eq!(v.action.kind, Kind::Bet);
    assert_eq!(v.action.amount, Chips(20), "Ставка добивается до min_raise");
    assert!(v.correction.is_some());
}

#[test]
fn bet_over_stack_becomes_all_in() {
    let v = validate_action(&BotAction::Bet(Chips(5000)), &seat(300, 0), &betting(0, 20));
    assert_eq!(v.action.kind, Kind::AllIn);
    assert_eq!(v.action.amount, Chips(300));
}

#[test]
fn bet_facing_a_bet_is_reinterpreted_as_raise() {
    let v = validate_action(&BotAction::Bet(Chips(60)), &seat(1000, 0), &betting(50, 20));
    assert_eq!(v.action.kind, Kind::Raise);
    assert_eq!(v.action.amount, Chips(60), "Сумма читается как приращение");
    assert!(v.correction.is_some());
}

#[test]
fn bet_facing_a_bet_without_raise_stack_folds() {
    // Стек не покрывает даже call — рейз невозможен в принципе.
    let v = validate_action(&BotAction::Bet(Chips(60)), &seat(40, 0), &betting(50, 20));
    assert_eq!(v.action.kind, Kind::Fold);
}

#[test]
fn raise_with_no_bet_standing_is_reinterpreted_as_bet() {
    let v = validate_action(&BotAction::Raise(Chips(60)), &seat(1000, 0), &betting(0, 20));
    assert_eq!(v.action.kind, Kind::Bet);
    assert_eq!(v.action.amount, Chips(60));
    assert!(v.correction.is_some());
}

/// Литеральный сценарий коррекции минимального рейза:
/// ставка 50, min_raise 20, бот объявляет raise 5.
#[test]
fn minimum_raise_correction_scenario() {
    // Стека хватает: raise 5 → raise 20 (цена хода 70).
    let v = validate_action(&BotAction::Raise(Chips(5)), &seat(100, 0), &betting(50, 20));
    assert_eq!(v.action.kind, Kind::Raise);
    assert_eq!(v.action.amount, Chips(20));
    assert!(v.correction.is_some());

    // Стек меньше 70 → олл-ин на весь стек.
    let v = validate_action(&BotAction::Raise(Chips(5)), &seat(60, 0), &betting(50, 20));
    assert_eq!(v.action.kind, Kind::AllIn);
    assert_eq!(v.action.amount, Chips(60));

    // Ровно 70 — тоже олл-ин (цена хода достигает стека).
    let v = validate_action(&BotAction::Raise(Chips(5)), &seat(70, 0), &betting(50, 20));
    assert_eq!(v.action.kind, Kind::AllIn);
    assert_eq!(v.action.amount, Chips(70));
}

#[test]
fn raise_when_rights_closed_becomes_call() {
    let mut s = seat(1000, 0);
    s.can_raise = false;
    let v = validate_action(&BotAction::Raise(Chips(100)), &s, &betting(50, 20));
    assert_eq!(v.action.kind, Kind::Call);
    assert_eq!(v.action.amount, Chips(50));
    assert!(v.correction.is_some());
}

#[test]
fn all_in_always_for_entire_stack() {
    let v = validate_action(&BotAction::AllIn, &seat(777, 10), &betting(50, 20));
    assert_eq!(v.action.kind, Kind::AllIn);
    assert_eq!(v.action.amount, Chips(777));
    assert!(v.correction.is_none());
}

//
// ====================== ЛЕГАЛЬНЫЕ ДЕЙСТВИЯ ======================
//

#[test]
fn legal_actions_without_standing_bet() {
    let la = legal_actions(&seat(1000, 0), &betting(0, 20));
    assert!(la.can_fold);
    assert!(la.can_check);
    assert_eq!(la.call_amount, None);
    assert_eq!(la.bet_range, Some((Chips(20), Chips(1000))));
    assert_eq!(la.raise_range, None);
}

#[test]
fn legal_actions_facing_a_bet() {
    let la = legal_actions(&seat(1000, 10), &betting(50, 20));
    assert!(!la.can_check);
    assert_eq!(la.call_amount, Some(Chips(40)));
    assert_eq!(la.bet_range, None);
    // Приращение: минимум min_raise, максимум — остаток стека после call.
    assert_eq!(la.raise_range, Some((Chips(20), Chips(960))));
}

#[test]
fn legal_actions_short_stack() {
    let la = legal_actions(&seat(25, 0), &betting(50, 20));
    assert!(!la.can_check);
    assert_eq!(la.call_amount, Some(Chips(25)), "Call ограничен стеком");
    assert_eq!(la.raise_range, None, "На рейз стека нет");
}

#[test]
fn legal_actions_after_short_all_in() {
    let mut s = seat(1000, 0);
    s.can_raise = false;
    let la = legal_actions(&s, &betting(50, 20));
    assert_eq!(la.raise_range, None, "Право на рейз закрыто коротким олл-ином");
    assert_eq!(la.call_amount, Some(Chips(50)));
}
