use crate::domain::chips::Chips;
use crate::domain::player::SeatStatus;
use crate::domain::table::{Pot, Table};
use crate::domain::PlayerIndex;
use crate::engine::positions::non_busted_from;

/// Вернуть неуравненную часть ставки.
///
/// Если ровно один не сфолдивший игрок поставил на этой улице больше всех,
/// излишек сверх второй по величине ставки возвращается ему в стек и
/// вычитается из его вклада в раздачу. Так банк из одного участника
/// (олл-ин, вокруг которого все сфолдили) не возникает вовсе.
///
/// Возвращает (игрок, сумма), если возврат был.
pub fn refund_uncalled_bet(table: &mut Table) -> Option<(PlayerIndex, Chips)> {
    // Вторую по величине ставку ищем среди ВСЕХ мест: сфолдившие тоже
    // "уравнивали" до своего фолда, их фишки остаются в банке.
    let mut top: Option<PlayerIndex> = None;
    let mut top_bet = Chips::ZERO;
    let mut second = Chips::ZERO;

    for (idx, seat) in table.seats.iter().enumerate() {
        if seat.street_bet > top_bet {
            second = top_bet;
            top_bet = seat.street_bet;
            top = Some(idx);
        } else if seat.street_bet > second {
            second = seat.street_bet;
        }
    }

    let idx = top?;
    if !table.seats[idx].is_in_hand() {
        return None;
    }
    let excess = top_bet.saturating_sub(second);
    if excess.is_zero() {
        return None;
    }

    let seat = &mut table.seats[idx];
    seat.street_bet -= excess;
    seat.stack += excess;
    table.contributions[idx] -= excess;
    // Олл-ин, которому вернули излишек, снова может ставить.
    if seat.status == SeatStatus::AllIn && !seat.stack.is_zero() {
        seat.status = SeatStatus::Active;
    }

    Some((idx, excess))
}

/// Разложить суммарные вклады раздачи на упорядоченные банки.
///
/// Уровни — различные суммарные вклады не сфолдивших игроков по
/// возрастанию. Сумма слоя набирается из вкладов ВСЕХ игроков
/// (сфолдившие оплачивают слои, но не претендуют на них); право на слой
/// имеют не сфолдившие с вкладом не меньше уровня. Список eligible идёт
/// в порядке обхода от кнопки — первый в списке получает нечётную фишку.
pub fn compute_pots(contributions: &[Chips], in_hand: &[bool], order: &[PlayerIndex]) -> Vec<Pot> {
    // Уровни по вкладам тех, кто ещё претендует на банк.
    let mut levels: Vec<Chips> = order
        .iter()
        .copied()
        .filter(|&i| in_hand[i] && !contributions[i].is_zero())
        .map(|i| contributions[i])
        .collect();
    levels.sort_unstable();
    levels.dedup();

    if levels.is_empty() {
        return Vec::new();
    }

    let mut pots = Vec::with_capacity(levels.len());
    let mut prev = Chips::ZERO;

    for &level in &levels {
        // Слой оплачивают все, чей вклад выше prev, — не более ширины слоя.
        let amount: Chips = contributions
            .iter()
            .map(|&c| c.min(level).saturating_sub(c.min(prev)))
            .sum();

        let eligible: Vec<PlayerIndex> = order
            .iter()
            .copied()
            .filter(|&i| in_hand[i] && contributions[i] >= level)
            .collect();

        if !amount.is_zero() && !eligible.is_empty() {
            pots.push(Pot { amount, eligible });
        }
        prev = level;
    }

    // Вклады сфолдивших сверх верхнего уровня доливаются в последний банк,
    // чтобы сумма банков всегда равнялась сумме вкладов.
    let assigned: Chips = pots.iter().map(|p| p.amount).sum();
    let total: Chips = contributions.iter().copied().sum();
    if let Some(last) = pots.last_mut() {
        last.amount += total - assigned;
    }

    pots
}

/// Свести ставки улицы в банки: вернуть неуравненное, обнулить ставки
/// улицы и пересобрать список банков из накопленных вкладов.
pub fn reconcile_bets_to_pots(table: &mut Table) {
    refund_uncalled_bet(table);

    for seat in table.seats.iter_mut() {
        seat.street_bet = Chips::ZERO;
    }

    let order = non_busted_from(table, (table.button + 1) % table.num_players());
    let in_hand: Vec<bool> = table.seats.iter().map(|s| s.is_in_hand()).collect();
    table.pots = compute_pots(&table.contributions, &in_hand, &order);
}
