use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::HandOutcome;
use crate::domain::player::SeatStatus;
use crate::domain::table::Table;
use crate::domain::PlayerIndex;
use crate::engine::errors::{ConfigError, EngineError};
use crate::engine::game_loop::play_hand;
use crate::harness::{Bot, BotHarness, ResourceLimits};
use crate::infra::logging::EngineLogs;
use crate::infra::rng_seed::RngSeed;
use crate::tournament::config::TournamentConfig;

/// Итог турнира.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentResult {
    pub hands_played: u32,
    /// Финальные стеки по местам.
    pub final_stacks: Vec<Chips>,
    /// Кто вылетал и в каком порядке (первый элемент — первый вылет).
    pub elimination_order: Vec<PlayerIndex>,
    /// Победитель, если он определился (единственный не вылетевший).
    pub winner: Option<PlayerIndex>,
    /// Места от лучшего к худшему: выжившие по стеку, затем вылетевшие
    /// в обратном порядке вылета.
    pub standings: Vec<PlayerIndex>,
}

/// Турнир: один стол, N ботов, раздачи до победителя или лимита раундов.
///
/// Владеет столом, харнесами и журналами. Seed турнира фиксируется при
/// создании; колода каждой раздачи пересеивается хэш-деривацией от него
/// и номера раунда, так что при одинаковом seed и одинаковых решениях
/// ботов история турнира воспроизводится побайтово.
pub struct Tournament {
    table: Table,
    harnesses: Vec<BotHarness>,
    seed: RngSeed,
    max_rounds: Option<u32>,
    logs: EngineLogs,
    hands_played: u32,
    elimination_order: Vec<PlayerIndex>,
    closed: bool,
}

impl Tournament {
    /// Собрать турнир. Валидация конфига — здесь, до первой раздачи.
    pub fn new(bots: Vec<Box<dyn Bot>>, config: TournamentConfig) -> Result<Self, ConfigError> {
        config.validate(bots.len())?;

        let limits = ResourceLimits {
            time_limit: Duration::from_millis(config.time_limit_ms),
            memory_limit_bytes: config.memory_limit_mb * 1024 * 1024,
        };

        let harnesses: Vec<BotHarness> = bots
            .into_iter()
            .map(|bot| {
                if config.restricted {
                    BotHarness::restricted(bot, limits)
                } else {
                    BotHarness::unrestricted(bot)
                }
            })
            .collect();

        let seed = match config.seed {
            Some(s) => RngSeed::from_u64(s),
            None => RngSeed::from_u64(rand::random()),
        };

        let logs = match &config.log_dir {
            Some(dir) => EngineLogs::in_dir(dir),
            None => EngineLogs::disabled(),
        };

        let table = Table::new(
            harnesses.len(),
            config.starting_stack,
            config.blinds_schedule.clone(),
        );

        Ok(Self {
            table,
            harnesses,
            seed,
            max_rounds: config.max_rounds,
            logs,
            hands_played: 0,
            elimination_order: Vec::new(),
            closed: false,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    /// Турнир окончен: остался один игрок либо упёрлись в лимит раундов.
    pub fn is_finished(&self) -> bool {
        if self.table.non_busted_count() <= 1 {
            return true;
        }
        match self.max_rounds {
            Some(max) => self.hands_played >= max,
            None => false,
        }
    }

    /// Сыграть одну раздачу.
    pub fn play_hand(&mut self) -> Result<HandOutcome, EngineError> {
        let mut rng = self
            .seed
            .derive_for_hand(self.table.round_number)
            .to_rng();

        let outcome = play_hand(&mut self.table, &mut self.harnesses, &mut rng, &mut self.logs)?;

        self.hands_played += 1;
        self.elimination_order.extend(outcome.eliminated.iter());
        Ok(outcome)
    }

    /// Прогнать турнир до конца и закрыть ботов.
    pub fn run(&mut self) -> Result<TournamentResult, EngineError> {
        while !self.is_finished() {
            self.play_hand()?;
        }
        self.close();
        Ok(self.result())
    }

    /// Текущий итог (валиден и до окончания — для обрезанных турниров).
    pub fn result(&self) -> TournamentResult {
        let final_stacks: Vec<Chips> = self.table.seats.iter().map(|s| s.stack).collect();

        // Выжившие по стеку (при равенстве — по месту), затем вылетевшие
        // в обратном порядке вылета.
        let mut survivors: Vec<PlayerIndex> = (0..self.table.num_players())
            .filter(|&i| self.table.seats[i].status != SeatStatus::Busted)
            .collect();
        survivors.sort_by(|&a, &b| final_stacks[b].cmp(&final_stacks[a]).then(a.cmp(&b)));

        let mut standings = survivors.clone();
        standings.extend(self.elimination_order.iter().rev());

        let winner = if survivors.len() == 1 {
            Some(survivors[0])
        } else {
            None
        };

        TournamentResult {
            hands_played: self.hands_played,
            final_stacks,
            elimination_order: self.elimination_order.clone(),
            winner,
            standings,
        }
    }

    /// Дать каждому боту хук завершения. Повторный вызов — no-op.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        for harness in self.harnesses.iter_mut() {
            harness.close();
        }
    }
}
