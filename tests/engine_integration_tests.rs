//! Интеграционные тесты движка: сохранение фишек на длинной дистанции,
//! воспроизводимость по seed, отсутствие утечки карманных карт.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use poker_arena::domain::blinds::{Blinds, BlindsSchedule};
use poker_arena::domain::card::Card;
use poker_arena::domain::chips::Chips;
use poker_arena::domain::gamestate::PublicGameState;
use poker_arena::engine::BotAction;
use poker_arena::harness::Bot;
use poker_arena::tournament::{Tournament, TournamentConfig};

/// Детерминированный "агрессивный" бот: гоняет по кругу фиксированный
/// набор действий, половина из которых нелегальна и чинится валидатором.
struct CyclingBot {
    step: usize,
}

impl CyclingBot {
    const SCRIPT: [BotAction; 6] = [
        BotAction::Call,
        BotAction::Raise(Chips(40)),
        BotAction::Check,
        BotAction::Call,
        BotAction::Bet(Chips(5)),
        BotAction::Fold,
    ];
}

impl Bot for CyclingBot {
    fn get_action(&mut self, _state: &PublicGameState, _hole: [Card; 2]) -> BotAction {
        let action = Self::SCRIPT[self.step % Self::SCRIPT.len()];
        self.step += 1;
        action
    }
}

fn cycling_bots(n: usize) -> Vec<Box<dyn Bot>> {
    (0..n)
        .map(|i| Box::new(CyclingBot { step: i }) as Box<dyn Bot>)
        .collect()
}

fn config(stack: u64, seed: u64, max_rounds: u32) -> TournamentConfig {
    TournamentConfig::new(
        Chips(stack),
        BlindsSchedule::flat(Blinds::new(Chips(10), Chips(20))),
    )
    .unrestricted()
    .with_seed(seed)
    .with_max_rounds(max_rounds)
}

//
// ====================== СОХРАНЕНИЕ ФИШЕК ======================
//

/// После каждой раздачи сумма стеков равна N * стартовый стек
/// (движок проверяет это сам, тест — внешняя страховка).
#[test]
fn chips_are_conserved_across_many_hands() {
    let mut tournament = Tournament::new(cycling_bots(4), config(2000, 99, 40)).unwrap();

    let mut hands = 0;
    while !tournament.is_finished() {
        let outcome = tournament.play_hand().expect("раздача должна пройти");
        hands += 1;

        let total: u64 = tournament.table().seats.iter().map(|s| s.stack.0).sum();
        assert_eq!(total, 8000, "Раздача {hands}: фишки разъехались");

        let won: u64 = outcome.winners.values().map(|w| w.chips_won.0).sum();
        assert_eq!(
            won, outcome.total_pot.0,
            "Раздача {hands}: банк разыгран не полностью"
        );
    }

    assert!(hands > 0);
}

//
// ====================== ВОСПРОИЗВОДИМОСТЬ ======================
//

/// Одинаковый seed и одинаковые боты → побайтово одинаковая история.
#[test]
fn same_seed_reproduces_identical_history() {
    let run = || {
        let mut tournament = Tournament::new(cycling_bots(3), config(1500, 777, 12)).unwrap();
        let result = tournament.run().expect("турнир должен доиграться");
        (
            result,
            tournament.table().previous_hands.clone(),
            tournament.table().current_hand.clone(),
        )
    };

    let (result_a, histories_a, current_a) = run();
    let (result_b, histories_b, current_b) = run();

    assert_eq!(result_a, result_b);
    assert_eq!(histories_a, histories_b);
    assert_eq!(current_a, current_b);
}

/// Разные seed дают разные раздачи (с подавляющей вероятностью).
#[test]
fn different_seeds_diverge() {
    let run = |seed| {
        let mut tournament = Tournament::new(cycling_bots(3), config(1500, seed, 5)).unwrap();
        tournament.run().unwrap();
        tournament.table().previous_hands.clone()
    };

    assert_ne!(run(1), run(2));
}

//
// ====================== ИНФОРМАЦИОННАЯ ГИГИЕНА ======================
//

/// Бот никогда не видит деталей шоудауна ТЕКУЩЕЙ раздачи и видит
/// завершённые раздачи только целиком, из архива.
#[test]
fn snapshots_never_leak_current_hole_cards() {
    struct SpyBot {
        violation: Arc<AtomicBool>,
    }
    impl Bot for SpyBot {
        fn get_action(&mut self, state: &PublicGameState, _hole: [Card; 2]) -> BotAction {
            // Текущая раздача обязана быть без вскрытия.
            if state.current_hand.showdown_details.is_some() {
                self.violation.store(true, Ordering::SeqCst);
            }
            // И в сериализованном виде тоже: ключ showdown_details
            // текущей раздачи — всегда null.
            let json = serde_json::to_value(state).expect("снапшот сериализуем");
            if json["current_hand"]["showdown_details"] != serde_json::Value::Null {
                self.violation.store(true, Ordering::SeqCst);
            }
            BotAction::Call
        }
    }

    let violation = Arc::new(AtomicBool::new(false));
    let bots: Vec<Box<dyn Bot>> = (0..3)
        .map(|_| {
            Box::new(SpyBot {
                violation: violation.clone(),
            }) as Box<dyn Bot>
        })
        .collect();

    let mut tournament = Tournament::new(bots, config(1000, 5, 8)).unwrap();
    tournament.run().unwrap();

    assert!(
        !violation.load(Ordering::SeqCst),
        "Снапшот слил информацию текущей раздачи"
    );
}

/// Прошлые раздачи попадают в архив вместе с деталями шоудауна.
#[test]
fn previous_hands_reveal_showdowns_after_the_fact() {
    struct CheckCallBot;
    impl Bot for CheckCallBot {
        fn get_action(&mut self, _state: &PublicGameState, _hole: [Card; 2]) -> BotAction {
            BotAction::Call
        }
    }

    let bots: Vec<Box<dyn Bot>> = (0..2)
        .map(|_| Box::new(CheckCallBot) as Box<dyn Bot>)
        .collect();

    let mut tournament = Tournament::new(bots, config(1000, 6, 3)).unwrap();
    tournament.run().unwrap();

    let archived = &tournament.table().previous_hands;
    assert!(!archived.is_empty(), "Сыгранные раздачи должны архивироваться");
    for record in archived {
        assert!(
            record.showdown_details.is_some(),
            "Чек-дауны доходят до вскрытия, детали должны быть в архиве"
        );
    }
}
