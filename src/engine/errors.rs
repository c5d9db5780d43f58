use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::deck::DeckExhausted;
use crate::domain::PlayerIndex;

/// Фатальные ошибки движка — нарушения инвариантов.
///
/// В корректном коде недостижимы; любое такое состояние означает баг
/// движка, турнир останавливается с полным диагнозом.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Нарушено сохранение фишек: ожидалось {expected}, по факту {actual} (раунд {round})")]
    ChipConservation {
        expected: Chips,
        actual: Chips,
        round: u32,
    },

    #[error("Колода исчерпана: {0}")]
    DeckExhausted(#[from] DeckExhausted),

    #[error("Банк без претендентов (раунд {round})")]
    EmptyPotEligibility { round: u32 },

    #[error("Отрицательное или невозможное состояние места {player}: {details}")]
    CorruptSeat {
        player: PlayerIndex,
        details: &'static str,
    },

    #[error("Недостижимое состояние раздачи: {0}")]
    Internal(&'static str),
}

/// Ошибки конфигурации турнира. Всплывают из конструктора до первой
/// раздачи — движок с плохим конфигом не стартует.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Нужно минимум 2 игрока, передано {0}")]
    NotEnoughPlayers(usize),

    #[error("Стартовый стек должен быть положительным")]
    ZeroStartingStack,

    #[error("Расписание блайндов пустое или не содержит уровня для раунда 1")]
    MissingFirstBlindLevel,

    #[error("Некорректный уровень блайндов для раунда {round}: SB {small_blind} / BB {big_blind}")]
    BadBlindLevel {
        round: u32,
        small_blind: Chips,
        big_blind: Chips,
    },

    #[error("Лимит времени на ход должен быть положительным")]
    ZeroTimeLimit,
}
