//! Тесты доменного слоя: карты, фишки, колода, расписание блайндов,
//! публичный снапшот.

use std::collections::BTreeMap;
use std::str::FromStr;

use poker_arena::domain::blinds::{Blinds, BlindsSchedule};
use poker_arena::domain::card::{Card, Rank, Suit};
use poker_arena::domain::chips::Chips;
use poker_arena::domain::deck::Deck;
use poker_arena::domain::table::Table;
use poker_arena::engine::RandomSource;
use poker_arena::infra::DeterministicRng;

//
// ====================== КАРТЫ ======================
//

#[test]
fn card_display_and_parse_roundtrip() {
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            let card = Card::new(rank, suit);
            let code = card.to_string();
            assert_eq!(code.len(), 2, "Код карты всегда из двух символов");
            let parsed = Card::from_str(&code).expect("обратный парсинг");
            assert_eq!(parsed, card);
        }
    }
}

#[test]
fn card_parse_rejects_garbage() {
    assert!(Card::from_str("").is_err());
    assert!(Card::from_str("A").is_err());
    assert!(Card::from_str("Ahh").is_err());
    assert!(Card::from_str("Xh").is_err());
    assert!(Card::from_str("Az").is_err());
}

#[test]
fn card_notation_examples() {
    let ah = Card::from_str("Ah").unwrap();
    assert_eq!(ah.rank, Rank::Ace);
    assert_eq!(ah.suit, Suit::Hearts);

    let ts = Card::from_str("Ts").unwrap();
    assert_eq!(ts.rank, Rank::Ten);
    assert_eq!(ts.to_string(), "Ts");

    assert_eq!(Card::from_str("2c").unwrap().to_string(), "2c");
}

//
// ====================== ФИШКИ ======================
//

#[test]
fn chips_arithmetic_saturates() {
    let a = Chips(100);
    let b = Chips(150);
    assert_eq!(a - b, Chips::ZERO, "Вычитание не уходит в минус");
    assert_eq!(a + b, Chips(250));
    assert_eq!(Chips(5).min(Chips(3)), Chips(3));

    let total: Chips = [Chips(10), Chips(20), Chips(30)].into_iter().sum();
    assert_eq!(total, Chips(60));
}

#[test]
fn chips_split_returns_share_and_odd_remainder() {
    assert_eq!(Chips(73).split(3), (Chips(24), Chips(1)));
    assert_eq!(Chips(40).split(2), (Chips(20), Chips::ZERO));
    assert_eq!(Chips(5).split(0), (Chips::ZERO, Chips(5)));
}

//
// ====================== КОЛОДА ======================
//

#[test]
fn deck_has_52_unique_cards() {
    let mut deck = Deck::standard_52();
    assert_eq!(deck.remaining(), 52);

    let mut seen = std::collections::HashSet::new();
    while deck.remaining() > 0 {
        let card = deck.deal_one().expect("карты ещё есть");
        assert!(seen.insert(card), "Карта {card} встретилась дважды");
    }
    assert_eq!(seen.len(), 52);
}

#[test]
fn deck_burn_consumes_without_returning() {
    let mut deck = Deck::standard_52();
    deck.burn().unwrap();
    assert_eq!(deck.remaining(), 51);

    // Раздача: 2 * 9 карманных + 3 burn + 5 борда = 26 ≤ 52.
    let dealt = deck.deal_n(25).unwrap();
    assert_eq!(dealt.len(), 25);
    assert_eq!(deck.remaining(), 26);
}

#[test]
fn deck_exhaustion_is_an_error() {
    let mut deck = Deck::standard_52();
    deck.deal_n(52).unwrap();
    assert!(deck.deal_one().is_err(), "53-я карта — ошибка DeckExhausted");
    assert!(deck.burn().is_err());
}

#[test]
fn shuffle_is_deterministic_for_same_seed() {
    let deal_with_seed = |seed: u64| {
        let mut deck = Deck::standard_52();
        let mut rng = DeterministicRng::from_u64(seed);
        rng.shuffle(deck.cards_mut());
        deck.deal_n(10).unwrap()
    };

    assert_eq!(deal_with_seed(42), deal_with_seed(42));
    assert_ne!(
        deal_with_seed(42),
        deal_with_seed(43),
        "Разные seed — разный порядок (с подавляющей вероятностью)"
    );
}

//
// ====================== РАСПИСАНИЕ БЛАЙНДОВ ======================
//

#[test]
fn blinds_schedule_uses_greatest_key_not_above_round() {
    let mut levels = BTreeMap::new();
    levels.insert(1, Blinds::new(Chips(10), Chips(20)));
    levels.insert(5, Blinds::new(Chips(25), Chips(50)));
    levels.insert(10, Blinds::new(Chips(50), Chips(100)));
    let schedule = BlindsSchedule::new(levels);

    assert_eq!(schedule.blinds_for_round(1).unwrap().big_blind, Chips(20));
    assert_eq!(schedule.blinds_for_round(4).unwrap().big_blind, Chips(20));
    assert_eq!(schedule.blinds_for_round(5).unwrap().big_blind, Chips(50));
    assert_eq!(schedule.blinds_for_round(9).unwrap().big_blind, Chips(50));
    assert_eq!(schedule.blinds_for_round(10).unwrap().big_blind, Chips(100));
    assert_eq!(schedule.blinds_for_round(999).unwrap().big_blind, Chips(100));
    assert!(
        schedule.blinds_for_round(0).is_none(),
        "Раунда 0 не бывает, уровня для него нет"
    );
}

//
// ====================== СНАПШОТ ======================
//

#[test]
fn public_snapshot_hides_hole_cards() {
    let schedule = BlindsSchedule::flat(Blinds::new(Chips(10), Chips(20)));
    let table = Table::new(4, Chips(1000), schedule);

    let snapshot = table.public_snapshot();
    assert_eq!(snapshot.players.len(), 4);
    assert_eq!(snapshot.round_number, 1);
    assert!(snapshot.current_hand.showdown_details.is_none());

    // Снапшот сериализуется; в JSON не должно быть поля hole_cards
    // нигде, кроме (пустых) деталей шоудауна прошлых раздач.
    let json = serde_json::to_string(&snapshot).expect("сериализация снапшота");
    assert!(
        !json.contains("hole_cards"),
        "Снапшот текущей раздачи не должен содержать карманные карты"
    );
}

#[test]
fn chips_in_play_counts_stacks_bets_and_pots() {
    let schedule = BlindsSchedule::flat(Blinds::new(Chips(10), Chips(20)));
    let table = Table::new(3, Chips(500), schedule);
    assert_eq!(table.chips_in_play(), Chips(1500));
    assert_eq!(table.expected_total, Chips(1500));
}
