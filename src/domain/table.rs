use serde::{Deserialize, Serialize};

use crate::domain::blinds::{Blinds, BlindsSchedule};
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::gamestate::PublicGameState;
use crate::domain::hand::HandRecord;
use crate::domain::player::{PlayerPublicInfo, SeatState, SeatStatus};
use crate::domain::PlayerIndex;

/// Банк (главный или сайд-пот).
///
/// eligible хранится в порядке обхода по часовой от кнопки:
/// при делёжке нечётная фишка достаётся первому в списке.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<PlayerIndex>,
}

/// Стол — единственный корень состояния турнира.
/// Владеет колодой, местами (вместе с карманными картами), банками
/// и историей раздач. Боты видят только снапшот [`PublicGameState`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    /// Номер текущего раунда (раздачи), с единицы.
    pub round_number: u32,
    /// Места за столом; индекс = PlayerIndex бота.
    pub seats: Vec<SeatState>,
    /// Позиция дилерской кнопки.
    pub button: PlayerIndex,
    /// Общие карты борда (0-5).
    pub board: Vec<Card>,
    /// Сверенные банки (index 0 — главный, дальше сайд-поты).
    pub pots: Vec<Pot>,
    /// Действующие блайнды.
    pub blinds: Blinds,
    pub blinds_schedule: BlindsSchedule,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Сколько всего фишек внёс каждый игрок в текущую раздачу
    /// (по всем улицам; основа расчёта сайд-потов).
    pub contributions: Vec<Chips>,
    pub deck: Deck,
    pub current_hand: HandRecord,
    pub previous_hands: Vec<HandRecord>,
    /// Ожидаемая сумма фишек в игре (N * стартовый стек) для самопроверки.
    pub expected_total: Chips,
}

impl Table {
    pub fn new(num_players: usize, starting_stack: Chips, schedule: BlindsSchedule) -> Self {
        let blinds = schedule
            .blinds_for_round(1)
            .unwrap_or(Blinds::new(Chips::ZERO, Chips::ZERO));
        Self {
            round_number: 1,
            seats: (0..num_players).map(|_| SeatState::new(starting_stack)).collect(),
            button: 0,
            board: Vec::new(),
            pots: Vec::new(),
            blinds,
            blinds_schedule: schedule,
            min_raise: blinds.big_blind,
            contributions: vec![Chips::ZERO; num_players],
            deck: Deck::standard_52(),
            current_hand: HandRecord::default(),
            previous_hands: Vec::new(),
            expected_total: Chips(starting_stack.0 * num_players as u64),
        }
    }

    pub fn num_players(&self) -> usize {
        self.seats.len()
    }

    /// Сколько игроков ещё в турнире.
    pub fn non_busted_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.status != SeatStatus::Busted)
            .count()
    }

    /// Сколько игроков в текущей раздаче (активные + олл-ины).
    pub fn in_hand_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_in_hand()).count()
    }

    /// Сколько игроков ещё может делать ставки.
    pub fn can_act_count(&self) -> usize {
        self.seats.iter().filter(|s| s.can_act()).count()
    }

    /// Суммарный сверенный банк.
    pub fn total_pot(&self) -> Chips {
        self.pots.iter().map(|p| p.amount).sum()
    }

    /// Текущая целевая ставка улицы — максимум street_bet по местам.
    pub fn current_bet(&self) -> Chips {
        self.seats
            .iter()
            .map(|s| s.street_bet)
            .max()
            .unwrap_or(Chips::ZERO)
    }

    /// Снапшот для бота: только публичная информация, всё по значению.
    /// Бот не получает ни одной ссылки внутрь стола.
    pub fn public_snapshot(&self) -> PublicGameState {
        PublicGameState {
            round_number: self.round_number,
            players: self.seats.iter().map(PlayerPublicInfo::from_seat).collect(),
            button: self.button,
            community_cards: self.board.clone(),
            total_pot: self.total_pot(),
            pots: self.pots.clone(),
            blinds: self.blinds,
            blinds_schedule: self.blinds_schedule.clone(),
            min_raise: self.min_raise,
            current_hand: self.current_hand.clone(),
            previous_hands: self.previous_hands.clone(),
        }
    }

    /// Проверка сохранения фишек: стеки + ставки на улице + банки
    /// должны давать ровно N * стартовый стек.
    pub fn chips_in_play(&self) -> Chips {
        let stacks: Chips = self.seats.iter().map(|s| s.stack).sum();
        let bets: Chips = self.seats.iter().map(|s| s.street_bet).sum();
        stacks + bets + self.total_pot()
    }
}
