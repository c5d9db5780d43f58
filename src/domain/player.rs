use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;

/// Статус места в контексте текущей раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SeatStatus {
    /// Игрок активен в текущей раздаче и может делать ставки.
    Active,
    /// Игрок сфолдил и больше не претендует на банк.
    Folded,
    /// Игрок в олл-ине: ставить больше не может, но участвует в шоудауне.
    AllIn,
    /// Игрок вылетел из турнира (нулевой стек).
    Busted,
}

/// Состояние одного места за столом. Карманные карты лежат здесь,
/// но наружу (в снапшот для ботов) никогда не попадают.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatState {
    /// Текущий стек.
    pub stack: Chips,
    /// Ставка на текущей улице. У сфолдившего замораживается до конца улицы
    /// и сметается в банк при сверке.
    pub street_bet: Chips,
    pub status: SeatStatus,
    /// Карманные карты (None до раздачи и у вылетевших).
    pub hole_cards: Option<[Card; 2]>,
    /// Право на рейз на текущей улице. Снимается правилом короткого олл-ина:
    /// неполный рейз не открывает торговлю заново для уже ходивших.
    pub can_raise: bool,
    /// Ходил ли игрок на текущей улице хотя бы раз.
    pub acted_this_street: bool,
}

impl SeatState {
    pub fn new(stack: Chips) -> Self {
        Self {
            stack,
            street_bet: Chips::ZERO,
            status: SeatStatus::Active,
            hole_cards: None,
            can_raise: true,
            acted_this_street: false,
        }
    }

    /// Участвует ли место в раздаче (не сфолдил и не вылетел).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, SeatStatus::Active | SeatStatus::AllIn)
    }

    /// Может ли место ещё делать ставки.
    pub fn can_act(&self) -> bool {
        self.status == SeatStatus::Active
    }

    /// Списать из стека не более amount; вернуть, сколько реально списано.
    /// Стек, ушедший в ноль, означает олл-ин.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.stack);
        self.stack -= real;
        self.street_bet += real;
        if self.stack.is_zero() && self.status == SeatStatus::Active {
            self.status = SeatStatus::AllIn;
        }
        real
    }
}

/// Публичная информация об игроке — ровно то, что видит любой бот.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicInfo {
    pub stack: Chips,
    pub current_bet: Chips,
    /// Участвует ли в текущей раздаче (олл-ин тоже считается участием).
    pub active: bool,
    pub busted: bool,
    pub is_all_in: bool,
}

impl PlayerPublicInfo {
    pub fn from_seat(seat: &SeatState) -> Self {
        Self {
            stack: seat.stack,
            current_bet: seat.street_bet,
            active: seat.is_in_hand(),
            busted: seat.status == SeatStatus::Busted,
            is_all_in: seat.status == SeatStatus::AllIn,
        }
    }
}
