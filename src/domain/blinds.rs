use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Текущие блайнды стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Blinds {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl Blinds {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }
}

/// Расписание роста блайндов: раунд → (SB, BB).
///
/// Действующий уровень — запись с наибольшим ключом, не превышающим
/// текущий раунд. Ключи — номера раундов начиная с 1.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BlindsSchedule {
    pub levels: BTreeMap<u32, Blinds>,
}

impl BlindsSchedule {
    pub fn new(levels: BTreeMap<u32, Blinds>) -> Self {
        Self { levels }
    }

    /// Расписание из одного уровня, действующего с первого раунда.
    pub fn flat(blinds: Blinds) -> Self {
        let mut levels = BTreeMap::new();
        levels.insert(1, blinds);
        Self { levels }
    }

    /// Блайнды для указанного раунда: наибольший ключ ≤ round.
    pub fn blinds_for_round(&self, round: u32) -> Option<Blinds> {
        self.levels
            .range(..=round)
            .next_back()
            .map(|(_, blinds)| *blinds)
    }
}
