use crate::domain::card::{Card, Rank, Suit};
use crate::domain::hand::HandRank;
use crate::domain::PlayerIndex;

use super::hand_rank::HandCategory;
use super::masks::{detect_straight, rank_bit, RankMask};

/// Главная функция: вычислить лучшую руку из hole + board.
///
/// Всего карт может быть от 2 (префлоп, только карманные) до 7
/// (ривер). При 5+ картах перебираются все 5-карточные комбинации;
/// при 2-4 картах оценивается неполная рука (стриты и флеши в ней
/// невозможны, остаются пары/сеты/каре и старшая карта).
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> HandRank {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);

    assert!(
        (2..=7).contains(&all_cards.len()),
        "evaluate_best_hand ожидает от 2 до 7 карт"
    );

    if all_cards.len() < 5 {
        return evaluate_partial_hand(&all_cards);
    }

    best_of_all_5card_combinations(&all_cards)
}

/// Перебираем все комбинации 5 карт из N (N=5-7) и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> HandRank {
    let n = cards.len();

    let mut best: Option<HandRank> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let r = evaluate_5card_hand(&five);
                        if best.map_or(true, |best_r| r > best_r) {
                            best = Some(r);
                        }
                    }
                }
            }
        }
    }

    best.expect("хотя бы одна 5-карточная комбинация обязана существовать")
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    // Подсчёт мастей.
    let mut suit_counts = [0u8; 4]; // 0:clubs, 1:diamonds, 2:hearts, 3:spades

    // Подсчёт рангов.
    let mut rank_counts = [0u8; 15]; // индексы 2..14
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        let suit_idx = match card.suit {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        };
        suit_counts[suit_idx] += 1;

        rank_counts[card.rank as usize] += 1;
        rank_mask |= rank_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high_rank = detect_straight(rank_mask);

    // Straight flush / royal flush.
    if is_flush {
        if let Some(high) = straight_high_rank {
            let ranks = straight_rank_array(high);
            let category = if high == Rank::Ace {
                HandCategory::RoyalFlush
            } else {
                HandCategory::StraightFlush
            };
            return HandRank::from_category_and_ranks(category, ranks);
        }
    }

    let rc_list = ranks_by_multiplicity(&rank_counts);
    let pattern: Vec<u8> = rc_list.iter().map(|rc| rc.count).collect();

    // Four of a kind.
    if pattern == [4, 1] {
        let four = rc_list[0].rank;
        let kicker = rc_list[1].rank;
        // Хвостовые ранги — мусор, в сравнении внутри категории не участвуют.
        let ranks = [four, kicker, Rank::Two, Rank::Two, Rank::Two];
        return HandRank::from_category_and_ranks(HandCategory::FourOfAKind, ranks);
    }

    // Full house: 3+2.
    if pattern == [3, 2] {
        let trips = rc_list[0].rank;
        let pair = rc_list[1].rank;
        let ranks = [trips, pair, Rank::Two, Rank::Two, Rank::Two];
        return HandRank::from_category_and_ranks(HandCategory::FullHouse, ranks);
    }

    // Flush.
    if is_flush {
        let mut flush_cards: Vec<Card> = cards.to_vec();
        flush_cards.sort_by(|a, b| b.rank.cmp(&a.rank));
        let ranks = [
            flush_cards[0].rank,
            flush_cards[1].rank,
            flush_cards[2].rank,
            flush_cards[3].rank,
            flush_cards[4].rank,
        ];
        return HandRank::from_category_and_ranks(HandCategory::Flush, ranks);
    }

    // Straight.
    if let Some(high) = straight_high_rank {
        let ranks = straight_rank_array(high);
        return HandRank::from_category_and_ranks(HandCategory::Straight, ranks);
    }

    finish_by_pattern(&rc_list, &pattern)
}

/// Неполная рука из 2-4 карт: только пары/сеты/каре и кикеры.
fn evaluate_partial_hand(cards: &[Card]) -> HandRank {
    let mut rank_counts = [0u8; 15];
    for card in cards.iter() {
        rank_counts[card.rank as usize] += 1;
    }

    let rc_list = ranks_by_multiplicity(&rank_counts);
    let pattern: Vec<u8> = rc_list.iter().map(|rc| rc.count).collect();

    if pattern.first() == Some(&4) {
        let ranks = [rc_list[0].rank, Rank::Two, Rank::Two, Rank::Two, Rank::Two];
        return HandRank::from_category_and_ranks(HandCategory::FourOfAKind, ranks);
    }

    finish_by_pattern(&rc_list, &pattern)
}

#[derive(Clone, Copy)]
struct RankCount {
    rank: Rank,
    count: u8,
}

/// Список (ранг, количество), отсортированный по количеству (desc),
/// затем по рангу (desc).
fn ranks_by_multiplicity(rank_counts: &[u8; 15]) -> Vec<RankCount> {
    let mut rc_list: Vec<RankCount> = Vec::with_capacity(5);
    for r_val in (2usize..=14usize).rev() {
        let c = rank_counts[r_val];
        if c > 0 {
            if let Some(rank) = Rank::ALL.into_iter().find(|r| *r as usize == r_val) {
                rc_list.push(RankCount { rank, count: c });
            }
        }
    }

    rc_list.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| b.rank.cmp(&a.rank)));
    rc_list
}

/// Общий хвост оценки: сет / две пары / пара / старшая карта.
/// Недостающие кикеры (у неполных рук) добиваются двойками.
fn finish_by_pattern(rc_list: &[RankCount], pattern: &[u8]) -> HandRank {
    if pattern.first() == Some(&3) {
        let trips = rc_list[0].rank;
        let kicker1 = rc_list.get(1).map(|rc| rc.rank).unwrap_or(Rank::Two);
        let kicker2 = rc_list.get(2).map(|rc| rc.rank).unwrap_or(Rank::Two);
        let ranks = [trips, kicker1, kicker2, Rank::Two, Rank::Two];
        return HandRank::from_category_and_ranks(HandCategory::ThreeOfAKind, ranks);
    }

    if pattern.len() >= 2 && pattern[0] == 2 && pattern[1] == 2 {
        let pair1 = rc_list[0].rank;
        let pair2 = rc_list[1].rank;
        let kicker = rc_list.get(2).map(|rc| rc.rank).unwrap_or(Rank::Two);
        let ranks = [pair1, pair2, kicker, Rank::Two, Rank::Two];
        return HandRank::from_category_and_ranks(HandCategory::TwoPair, ranks);
    }

    if pattern.first() == Some(&2) {
        let pair = rc_list[0].rank;
        let mut ranks = [pair, Rank::Two, Rank::Two, Rank::Two, Rank::Two];
        for (i, slot) in ranks.iter_mut().skip(1).enumerate() {
            if let Some(rc) = rc_list.get(i + 1) {
                *slot = rc.rank;
            }
        }
        return HandRank::from_category_and_ranks(HandCategory::OnePair, ranks);
    }

    // High card: топ-5 рангов по убыванию.
    let mut ranks = [Rank::Two; 5];
    for (i, slot) in ranks.iter_mut().enumerate() {
        if let Some(rc) = rc_list.get(i) {
            *slot = rc.rank;
        }
    }
    HandRank::from_category_and_ranks(HandCategory::HighCard, ranks)
}

/// Массив рангов [r0..r4] для стрита с заданной старшей картой.
fn straight_rank_array(high: Rank) -> [Rank; 5] {
    match high {
        Rank::Five => [
            Rank::Five,
            Rank::Four,
            Rank::Three,
            Rank::Two,
            Rank::Ace, // wheel: A2345
        ],
        Rank::Six => [Rank::Six, Rank::Five, Rank::Four, Rank::Three, Rank::Two],
        Rank::Seven => [Rank::Seven, Rank::Six, Rank::Five, Rank::Four, Rank::Three],
        Rank::Eight => [Rank::Eight, Rank::Seven, Rank::Six, Rank::Five, Rank::Four],
        Rank::Nine => [Rank::Nine, Rank::Eight, Rank::Seven, Rank::Six, Rank::Five],
        Rank::Ten => [Rank::Ten, Rank::Nine, Rank::Eight, Rank::Seven, Rank::Six],
        Rank::Jack => [Rank::Jack, Rank::Ten, Rank::Nine, Rank::Eight, Rank::Seven],
        Rank::Queen => [Rank::Queen, Rank::Jack, Rank::Ten, Rank::Nine, Rank::Eight],
        Rank::King => [Rank::King, Rank::Queen, Rank::Jack, Rank::Ten, Rank::Nine],
        Rank::Ace => [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten],
        _ => [high, Rank::Four, Rank::Three, Rank::Two, Rank::Two],
    }
}

/// Определить победителей банка среди претендентов.
///
/// Возвращает ВСЕХ, чья рука делит максимум, сохраняя порядок из
/// `eligible` (он идёт по часовой от кнопки — при сплите нечётная фишка
/// достанется первому).
pub fn determine_winners(
    hole_cards: &[Option<[Card; 2]>],
    board: &[Card],
    eligible: &[PlayerIndex],
) -> Vec<PlayerIndex> {
    let mut best: Option<HandRank> = None;
    let mut winners: Vec<PlayerIndex> = Vec::new();

    for &idx in eligible {
        let Some(hole) = hole_cards.get(idx).copied().flatten() else {
            continue;
        };
        let rank = evaluate_best_hand(&hole, board);

        match best {
            None => {
                best = Some(rank);
                winners.push(idx);
            }
            Some(b) if rank > b => {
                best = Some(rank);
                winners.clear();
                winners.push(idx);
            }
            Some(b) if rank == b => winners.push(idx),
            Some(_) => {}
        }
    }

    winners
}
