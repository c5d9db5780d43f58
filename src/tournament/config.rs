use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::blinds::BlindsSchedule;
use crate::domain::chips::Chips;
use crate::engine::errors::ConfigError;

/// Конфигурация турнира.
///
/// Жёсткая валидация выполняется в конструкторе турнира — движок с плохим
/// конфигом не сыграет ни одной раздачи.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Стартовый стек каждого игрока.
    pub starting_stack: Chips,

    /// Расписание блайндов: раунд → (SB, BB), действует наибольший
    /// ключ, не превышающий текущий раунд.
    pub blinds_schedule: BlindsSchedule,

    /// Ограничение на количество раздач (None = играть до победителя).
    pub max_rounds: Option<u32>,

    /// Seed турнира. None → случайный (раздачи не воспроизводятся).
    pub seed: Option<u64>,

    /// Песочница для ботов: true — изоляция с лимитами (соревнование),
    /// false — прямые вызовы (доверенный self-play).
    pub restricted: bool,

    /// Дедлайн на одно решение бота, миллисекунды.
    pub time_limit_ms: u64,

    /// Потолок памяти для ботов, МиБ.
    pub memory_limit_mb: u64,

    /// Каталог журналов (illegal_moves.log, bot_events.log).
    /// None — журналирование выключено.
    pub log_dir: Option<PathBuf>,
}

impl TournamentConfig {
    pub fn new(starting_stack: Chips, blinds_schedule: BlindsSchedule) -> Self {
        Self {
            starting_stack,
            blinds_schedule,
            max_rounds: None,
            seed: None,
            restricted: true,
            time_limit_ms: 1000,
            memory_limit_mb: 500,
            log_dir: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    pub fn unrestricted(mut self) -> Self {
        self.restricted = false;
        self
    }

    /// Проверка конфига для num_players участников.
    pub fn validate(&self, num_players: usize) -> Result<(), ConfigError> {
        if num_players < 2 {
            return Err(ConfigError::NotEnoughPlayers(num_players));
        }

        if self.starting_stack.is_zero() {
            return Err(ConfigError::ZeroStartingStack);
        }

        if self.blinds_schedule.blinds_for_round(1).is_none() {
            return Err(ConfigError::MissingFirstBlindLevel);
        }

        for (&round, blinds) in &self.blinds_schedule.levels {
            if blinds.small_blind.is_zero()
                || blinds.big_blind.is_zero()
                || blinds.small_blind > blinds.big_blind
            {
                return Err(ConfigError::BadBlindLevel {
                    round,
                    small_blind: blinds.small_blind,
                    big_blind: blinds.big_blind,
                });
            }
        }

        if self.time_limit_ms == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }

        Ok(())
    }
}
