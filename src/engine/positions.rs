use crate::domain::player::SeatStatus;
use crate::domain::table::Table;
use crate::domain::PlayerIndex;

/// Следующее не вылетевшее место по кругу, исключая start.
pub fn next_non_busted(table: &Table, start: PlayerIndex) -> Option<PlayerIndex> {
    let n = table.num_players();
    let mut idx = (start + 1) % n;
    for _ in 0..n {
        if table.seats[idx].status != SeatStatus::Busted {
            return Some(idx);
        }
        idx = (idx + 1) % n;
    }
    None
}

/// Все не вылетевшие места по кругу начиная с start (включая его,
/// если он в игре).
pub fn non_busted_from(table: &Table, start: PlayerIndex) -> Vec<PlayerIndex> {
    let n = table.num_players();
    let mut seats = Vec::new();
    let mut idx = start % n;
    for _ in 0..n {
        if table.seats[idx].status != SeatStatus::Busted {
            seats.push(idx);
        }
        idx = (idx + 1) % n;
    }
    seats
}

/// Активные (способные ставить) места по кругу начиная с start.
pub fn active_from(table: &Table, start: PlayerIndex) -> Vec<PlayerIndex> {
    let n = table.num_players();
    let mut seats = Vec::new();
    let mut idx = start % n;
    for _ in 0..n {
        if table.seats[idx].can_act() {
            seats.push(idx);
        }
        idx = (idx + 1) % n;
    }
    seats
}

/// Позиции блайндов для раздачи.
///
/// Хедз-ап правило: кнопка постит SB, второй игрок — BB.
/// В остальных случаях SB — первый не вылетевший после кнопки,
/// BB — следующий за ним.
pub fn blind_positions(table: &Table) -> Option<(PlayerIndex, PlayerIndex)> {
    if table.non_busted_count() == 2 {
        let sb = if table.seats[table.button].status != SeatStatus::Busted {
            table.button
        } else {
            next_non_busted(table, table.button)?
        };
        let bb = next_non_busted(table, sb)?;
        Some((sb, bb))
    } else {
        let sb = next_non_busted(table, table.button)?;
        let bb = next_non_busted(table, sb)?;
        Some((sb, bb))
    }
}
