//! Битовые маски рангов для поиска стритов.
//!
//! Вместо перечисления всех десяти стритов держим одно окно из пяти
//! подряд идущих бит и сдвигаем его по маске от бродвея вниз. Wheel
//! (A-2-3-4-5) в эту схему не укладывается — туз там играет снизу,
//! поэтому его маска собрана отдельно.

use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// 13 бит: бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Окно из пяти подряд идущих рангов, прижатое к двойке (23456).
const RUN_OF_FIVE: RankMask = 0b1_1111;

/// Бит туза.
const ACE_BIT: RankMask = 1 << (Rank::Ace as u8 - 2);

/// Wheel A-2-3-4-5: четыре младших ранга плюс туз сверху маски.
const WHEEL: RankMask = (RUN_OF_FIVE >> 1) | ACE_BIT;

/// Бит одного ранга.
pub fn rank_bit(rank: Rank) -> RankMask {
    1 << (rank as u8 - 2)
}

/// Найти стрит в маске рангов. Возвращает старшую карту стрита.
///
/// Окно сдвигается от бродвея (старшая — туз) вниз до 23456,
/// так что находится всегда самый сильный стрит. Wheel проверяется
/// последним и отдаёт пятёрку: это слабейший стрит.
pub fn detect_straight(mask: RankMask) -> Option<Rank> {
    for &high in Rank::ALL.iter().rev() {
        if high < Rank::Six {
            break;
        }
        let window = RUN_OF_FIVE << (high as u8 - Rank::Six as u8);
        if mask & window == window {
            return Some(high);
        }
    }

    if mask & WHEEL == WHEEL {
        return Some(Rank::Five);
    }

    None
}
