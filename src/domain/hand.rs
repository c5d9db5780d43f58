use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerIndex;

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

/// Ранг руки — упакованный u32, который заполняет eval.
/// Сравнение рангов = сравнение чисел, поэтому Ord достаточно.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandRank(pub u32);

/// Тип действия в истории раздачи. Блайнды встречаются только здесь:
/// боты их не объявляют, их постит движок.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordedActionKind {
    #[serde(rename = "fold")]
    Fold,
    #[serde(rename = "check")]
    Check,
    #[serde(rename = "call")]
    Call,
    #[serde(rename = "bet")]
    Bet,
    #[serde(rename = "raise")]
    Raise,
    #[serde(rename = "all-in")]
    AllIn,
    #[serde(rename = "small_blind")]
    SmallBlind,
    #[serde(rename = "big_blind")]
    BigBlind,
}

/// Одно действие в истории раздачи.
///
/// Семантика amount:
/// - call / all-in / блайнды — сколько фишек реально ушло из стека;
/// - bet — итоговая ставка на улице;
/// - raise — приращение над текущей ставкой стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedAction {
    pub player_index: PlayerIndex,
    pub kind: RecordedActionKind,
    pub amount: Chips,
}

/// История одной улицы: борд, открытый к этой улице, и действия по порядку.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StreetHistory {
    pub community_cards: Vec<Card>,
    pub actions: Vec<RecordedAction>,
}

/// Детали шоудауна: карты и комбинации ВСЕХ дошедших до вскрытия игроков,
/// а не только победителей.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownDetails {
    /// Кто вскрывался (в порядке мест).
    pub players: Vec<PlayerIndex>,
    /// Название комбинации каждого вскрывшегося.
    pub hands: BTreeMap<PlayerIndex, String>,
    /// Карманные карты каждого вскрывшегося.
    pub hole_cards: BTreeMap<PlayerIndex, [Card; 2]>,
}

/// Полная запись раздачи: история по улицам плюс детали вскрытия.
/// Детали появляются только после завершения раздачи, поэтому
/// в снапшотах текущей раздачи карты соперников не светятся.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HandRecord {
    pub preflop: StreetHistory,
    pub flop: StreetHistory,
    pub turn: StreetHistory,
    pub river: StreetHistory,
    pub showdown_details: Option<ShowdownDetails>,
}

impl HandRecord {
    pub fn street(&self, street: Street) -> &StreetHistory {
        match street {
            Street::Preflop => &self.preflop,
            Street::Flop => &self.flop,
            Street::Turn => &self.turn,
            Street::River | Street::Showdown => &self.river,
        }
    }

    pub fn street_mut(&mut self, street: Street) -> &mut StreetHistory {
        match street {
            Street::Preflop => &mut self.preflop,
            Street::Flop => &mut self.flop,
            Street::Turn => &mut self.turn,
            Street::River | Street::Showdown => &mut self.river,
        }
    }

    /// Есть ли в записи хоть одно действие (для архивации пустых раздач).
    pub fn is_empty(&self) -> bool {
        self.preflop.actions.is_empty()
            && self.flop.actions.is_empty()
            && self.turn.actions.is_empty()
            && self.river.actions.is_empty()
    }
}

/// Выигрыш одного игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnerEntry {
    /// Название выигравшей комбинации ("one_pair", "flush", ...)
    /// или "uncontested", если все остальные сфолдили.
    pub hand_name: String,
    pub chips_won: Chips,
}

/// Итог одной раздачи — то, что турнирный слой отдаёт наружу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandOutcome {
    /// Победители: игрок → (комбинация, сколько выиграл).
    pub winners: BTreeMap<PlayerIndex, WinnerEntry>,
    /// Кто дошёл до вскрытия (пусто, если раздача закончилась фолдами).
    pub eligible_for_showdown: Vec<PlayerIndex>,
    /// Дошла ли раздача до шоудауна.
    pub showdown: bool,
    pub showdown_details: Option<ShowdownDetails>,
    /// Кто вылетел по итогам раздачи.
    pub eliminated: Vec<PlayerIndex>,
    /// До какой улицы дошла раздача.
    pub final_street: Street,
    /// Суммарный банк раздачи (после возврата неуравненных ставок).
    pub total_pot: Chips,
}
