use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::PlayerIndex;

/// Состояние раунда ставок на конкретной улице.
///
/// Раунд управляется очередью to_act: ход снимает игрока с головы очереди,
/// полный рейз пересобирает её заново, неполный олл-ин лишь дополняет
/// неуравненными. Пустая очередь = раунд ставок завершён.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Последний полный агрессор (bet/raise не меньше min_raise).
    pub last_aggressor: Option<PlayerIndex>,
    /// Очередь ходящих (по кругу), кто ещё должен сделать действие.
    pub to_act: Vec<PlayerIndex>,
}

impl BettingState {
    pub fn new(street: Street, current_bet: Chips, min_raise: Chips, to_act: Vec<PlayerIndex>) -> Self {
        Self {
            street,
            current_bet,
            min_raise,
            last_aggressor: None,
            to_act,
        }
    }

    /// Следующий по очереди актёр.
    pub fn next_actor(&self) -> Option<PlayerIndex> {
        self.to_act.first().copied()
    }

    /// Игрок сходил — убрать его из очереди, где бы он ни стоял.
    pub fn mark_acted(&mut self, player: PlayerIndex) {
        self.to_act.retain(|p| *p != player);
    }

    /// Полный рейз: новая целевая ставка, новый min_raise, торговля
    /// открывается заново — очередь пересобирает движок.
    pub fn on_full_raise(
        &mut self,
        player: PlayerIndex,
        new_bet: Chips,
        raise_size: Chips,
        new_to_act: Vec<PlayerIndex>,
    ) {
        self.current_bet = new_bet;
        self.min_raise = raise_size;
        self.last_aggressor = Some(player);
        self.to_act = new_to_act;
    }

    /// Неполный олл-ин поверх текущей ставки: целевая ставка растёт,
    /// но min_raise и агрессор не меняются. В очередь добираются только
    /// неуравненные игроки (им нужно хотя бы уравнять или сфолдить).
    pub fn on_short_all_in(&mut self, new_bet: Chips, unmatched: Vec<PlayerIndex>) {
        self.current_bet = new_bet;
        for p in unmatched {
            if !self.to_act.contains(&p) {
                self.to_act.push(p);
            }
        }
    }

    /// Раунд ставок завершён, когда очередь пуста.
    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }
}
