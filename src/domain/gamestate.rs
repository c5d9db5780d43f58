use serde::{Deserialize, Serialize};

use crate::domain::blinds::{Blinds, BlindsSchedule};
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandRecord, Street};
use crate::domain::player::PlayerPublicInfo;
use crate::domain::table::Pot;
use crate::domain::PlayerIndex;

/// Публичное состояние игры — всё, что видит бот перед ходом.
///
/// Это полностью владеющая структура: стол собирает её клонированием,
/// так что бот не может дотянуться до приватного состояния даже через
/// ссылку. Карманные карты соперников здесь не встречаются нигде,
/// кроме `showdown_details` уже завершённых раздач.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicGameState {
    pub round_number: u32,
    pub players: Vec<PlayerPublicInfo>,
    pub button: PlayerIndex,
    pub community_cards: Vec<Card>,
    pub total_pot: Chips,
    pub pots: Vec<Pot>,
    pub blinds: Blinds,
    pub blinds_schedule: BlindsSchedule,
    pub min_raise: Chips,
    pub current_hand: HandRecord,
    pub previous_hands: Vec<HandRecord>,
}

impl PublicGameState {
    /// Сколько игроков участвует в текущей раздаче.
    pub fn active_players_count(&self) -> usize {
        self.players.iter().filter(|p| p.active).count()
    }

    /// Сколько игроков ещё не вылетело из турнира.
    pub fn non_busted_count(&self) -> usize {
        self.players.iter().filter(|p| !p.busted).count()
    }

    /// Улица по количеству открытых карт борда.
    pub fn current_street(&self) -> Street {
        match self.community_cards.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    /// Текущая целевая ставка улицы.
    pub fn current_bet(&self) -> Chips {
        self.players
            .iter()
            .map(|p| p.current_bet)
            .max()
            .unwrap_or(Chips::ZERO)
    }

    /// Сколько фишек не хватает игроку до уравнивания.
    pub fn to_call(&self, player: PlayerIndex) -> Chips {
        self.current_bet()
            .saturating_sub(self.players[player].current_bet)
    }
}
