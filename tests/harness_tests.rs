//! Тесты харнеса: дедлайн, паники, потолок памяти, fallback-действие,
//! идентичность исходов в restricted/unrestricted режимах.

use std::time::Duration;

use poker_arena::domain::blinds::{Blinds, BlindsSchedule};
use poker_arena::domain::card::Card;
use poker_arena::domain::chips::Chips;
use poker_arena::domain::gamestate::PublicGameState;
use poker_arena::domain::table::Table;
use poker_arena::engine::BotAction;
use poker_arena::harness::{Bot, BotHarness, BotIncident, ResourceLimits};
use poker_arena::tournament::{Tournament, TournamentConfig};

struct AlwaysBot(BotAction);

impl Bot for AlwaysBot {
    fn get_action(&mut self, _state: &PublicGameState, _hole: [Card; 2]) -> BotAction {
        self.0
    }
}

/// Бот, который спит дольше дедлайна.
struct SleepyBot {
    delay: Duration,
}

impl Bot for SleepyBot {
    fn get_action(&mut self, _state: &PublicGameState, _hole: [Card; 2]) -> BotAction {
        std::thread::sleep(self.delay);
        BotAction::AllIn
    }
}

/// Бот, который падает с паникой.
struct PanickyBot;

impl Bot for PanickyBot {
    fn get_action(&mut self, _state: &PublicGameState, _hole: [Card; 2]) -> BotAction {
        panic!("бот сломался");
    }
}

fn snapshot_and_hole() -> (PublicGameState, [Card; 2]) {
    let schedule = BlindsSchedule::flat(Blinds::new(Chips(10), Chips(20)));
    let table = Table::new(2, Chips(1000), schedule);
    let hole = [
        "Ah".parse::<Card>().unwrap(),
        "Kd".parse::<Card>().unwrap(),
    ];
    (table.public_snapshot(), hole)
}

fn tight_limits(time_ms: u64) -> ResourceLimits {
    ResourceLimits {
        time_limit: Duration::from_millis(time_ms),
        memory_limit_bytes: 64 * 1024 * 1024 * 1024, // память не мешает
    }
}

//
// ====================== ИЗОЛЯЦИЯ ======================
//

#[test]
fn timeout_produces_fallback_check() {
    let bot = Box::new(SleepyBot {
        delay: Duration::from_millis(200),
    });
    let mut harness = BotHarness::restricted(bot, tight_limits(20));

    let (state, hole) = snapshot_and_hole();
    let decision = harness.decide(state, hole);

    assert_eq!(decision.incident, Some(BotIncident::Timeout));
    assert!(
        matches!(decision.action, BotAction::Check),
        "Fallback — check (валидатор превратит в fold против ставки)"
    );
}

#[test]
fn late_answer_is_discarded_next_turn() {
    let bot = Box::new(SleepyBot {
        delay: Duration::from_millis(100),
    });
    let mut harness = BotHarness::restricted(bot, tight_limits(20));
    let (state, hole) = snapshot_and_hole();

    // Первый ход: таймаут, бот остаётся жить и досчитывает ответ.
    let first = harness.decide(state.clone(), hole);
    assert_eq!(first.incident, Some(BotIncident::Timeout));

    // Даём опоздавшему ответу дойти до канала.
    std::thread::sleep(Duration::from_millis(150));

    // Второй ход: устаревший AllIn с прошлого запроса обязан быть отброшен,
    // свежий ответ снова не успевает → снова таймаут.
    let second = harness.decide(state, hole);
    assert_eq!(second.incident, Some(BotIncident::Timeout));
    assert!(matches!(second.action, BotAction::Check));
}

#[test]
fn panic_inside_bot_becomes_crash_fallback() {
    let mut harness = BotHarness::restricted(Box::new(PanickyBot), tight_limits(500));

    let (state, hole) = snapshot_and_hole();
    let decision = harness.decide(state.clone(), hole);

    assert_eq!(decision.incident, Some(BotIncident::Crash));
    assert!(matches!(decision.action, BotAction::Check));

    // Паника не убивает харнес: следующий запрос тоже обслуживается.
    let again = harness.decide(state, hole);
    assert_eq!(again.incident, Some(BotIncident::Crash));
}

#[cfg(target_os = "linux")]
#[test]
fn memory_ceiling_breach_is_detected() {
    // Потолок в 1 байт: RSS процесса заведомо больше.
    let limits = ResourceLimits {
        time_limit: Duration::from_millis(500),
        memory_limit_bytes: 1,
    };
    let mut harness = BotHarness::restricted(Box::new(AlwaysBot(BotAction::Call)), limits);

    let (state, hole) = snapshot_and_hole();
    let decision = harness.decide(state, hole);

    assert_eq!(decision.incident, Some(BotIncident::MemoryExceeded));
    assert!(matches!(decision.action, BotAction::Check));
}

#[test]
fn unrestricted_mode_calls_straight_through() {
    let mut harness = BotHarness::unrestricted(Box::new(AlwaysBot(BotAction::AllIn)));

    let (state, hole) = snapshot_and_hole();
    let decision = harness.decide(state, hole);

    assert!(decision.incident.is_none());
    assert!(matches!(decision.action, BotAction::AllIn));
}

//
// ====================== СЦЕНАРИЙ: ТАЙМАУТ ПРОТИВ СТАВКИ ======================
//

/// Литеральный сценарий: бот засыпает на префлопе против рейза.
/// Fallback check превращается валидатором в fold; потеря — только блайнд.
#[test]
fn sleeping_bot_facing_raise_loses_only_blind() {
    /// Кнопка: первый ход — рейз, дальше коллы.
    struct OpeningRaiser {
        opened: bool,
    }
    impl Bot for OpeningRaiser {
        fn get_action(&mut self, _state: &PublicGameState, _hole: [Card; 2]) -> BotAction {
            if self.opened {
                BotAction::Call
            } else {
                self.opened = true;
                BotAction::Raise(Chips(40))
            }
        }
    }

    let mut config = TournamentConfig::new(
        Chips(1000),
        BlindsSchedule::flat(Blinds::new(Chips(10), Chips(20))),
    )
    .with_seed(5);
    config.time_limit_ms = 30;

    let bots: Vec<Box<dyn Bot>> = vec![
        Box::new(OpeningRaiser { opened: false }),
        Box::new(SleepyBot {
            delay: Duration::from_millis(120),
        }),
    ];
    let mut tournament = Tournament::new(bots, config).unwrap();

    let outcome = tournament.play_hand().expect("раздача должна пройти");

    assert!(!outcome.showdown, "Фолд по таймауту заканчивает раздачу");
    let stacks: Vec<u64> = tournament.table().seats.iter().map(|s| s.stack.0).collect();
    assert_eq!(
        stacks,
        vec![1020, 980],
        "Спящий BB теряет ровно большой блайнд"
    );

    tournament.close();
}

//
// ====================== ИДЕНТИЧНОСТЬ РЕЖИМОВ ======================
//

/// При одинаковом поведении ботов restricted и unrestricted дают
/// побайтово одинаковые исходы.
#[test]
fn restricted_and_unrestricted_produce_identical_games() {
    let run = |restricted: bool| {
        let mut config = TournamentConfig::new(
            Chips(500),
            BlindsSchedule::flat(Blinds::new(Chips(10), Chips(20))),
        )
        .with_seed(314159)
        .with_max_rounds(6);
        config.restricted = restricted;

        let bots: Vec<Box<dyn Bot>> = vec![
            Box::new(AlwaysBot(BotAction::Call)),
            Box::new(AlwaysBot(BotAction::Call)),
            Box::new(AlwaysBot(BotAction::AllIn)),
        ];
        let mut tournament = Tournament::new(bots, config).unwrap();
        let result = tournament.run().expect("турнир должен доиграться");
        let histories = tournament.table().previous_hands.clone();
        let current = tournament.table().current_hand.clone();
        (result, histories, current)
    };

    let (result_r, histories_r, current_r) = run(true);
    let (result_u, histories_u, current_u) = run(false);

    assert_eq!(result_r, result_u, "Итоги турнира обязаны совпасть");
    assert_eq!(histories_r, histories_u, "Истории раздач обязаны совпасть");
    assert_eq!(current_r, current_u);
}
