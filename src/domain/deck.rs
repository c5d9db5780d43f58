use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};

/// Колода исчерпана: за раздачу запросили больше 52 карт.
/// В корректном движке недостижимо (2N карманных + 3 burn + 5 борда ≤ 52).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("В колоде не осталось карт (раздано {dealt}, сожжено {burned})")]
pub struct DeckExhausted {
    pub dealt: usize,
    pub burned: usize,
}

/// Колода карт. Раздача идёт по указателю сверху вниз;
/// сожжённые карты двигают указатель и обратно не возвращаются.
/// Перемешивание делает engine через RandomSource, НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    /// Сколько карт уже вышло из колоды (разданных + сожжённых).
    position: usize,
    /// Сколько из вышедших карт были сожжены.
    burned: usize,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck {
            cards,
            position: 0,
            burned: 0,
        }
    }

    /// Доступ к картам для перемешивания (до начала раздачи).
    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    /// Сколько карт ещё можно раздать.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.position
    }

    /// Взять одну карту сверху колоды.
    pub fn deal_one(&mut self) -> Result<Card, DeckExhausted> {
        if self.position >= self.cards.len() {
            return Err(DeckExhausted {
                dealt: self.position - self.burned,
                burned: self.burned,
            });
        }
        let card = self.cards[self.position];
        self.position += 1;
        Ok(card)
    }

    /// Взять n карт сверху.
    pub fn deal_n(&mut self, n: usize) -> Result<Vec<Card>, DeckExhausted> {
        let mut taken = Vec::with_capacity(n);
        for _ in 0..n {
            taken.push(self.deal_one()?);
        }
        Ok(taken)
    }

    /// Сжечь карту: указатель двигается, карта никому не показывается.
    pub fn burn(&mut self) -> Result<(), DeckExhausted> {
        self.deal_one()?;
        self.burned += 1;
        Ok(())
    }
}
