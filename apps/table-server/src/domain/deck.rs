//! Deck model: a fixed master set of cards split into draw and discard piles.
//!
//! Cards not in either pile are "in play" (dealt to hands or exposed as
//! trump). `reset` collects everything back into a freshly permuted draw pile.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// Deck compositions the engine knows how to build.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum DeckKind {
    /// Standard 52-card deck.
    #[default]
    Standard52,
    /// Nine through Ace in each suit.
    Short24,
}

impl DeckKind {
    /// Lowest rank present in every suit.
    pub fn lowest_rank(self) -> Rank {
        match self {
            DeckKind::Standard52 => Rank::Two,
            DeckKind::Short24 => Rank::Nine,
        }
    }

    pub fn ranks_per_suit(self) -> usize {
        self.size() / Suit::ALL.len()
    }

    pub fn cards(self) -> Vec<Card> {
        let lowest = self.lowest_rank();
        let mut cards = Vec::with_capacity(self.size());
        for suit in Suit::ALL {
            for rank in Rank::ALL.iter().copied().filter(|r| *r >= lowest) {
                cards.push(Card::new(suit, rank));
            }
        }
        cards
    }

    pub fn size(self) -> usize {
        match self {
            DeckKind::Standard52 => 52,
            DeckKind::Short24 => 24,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standard52" | "52" => Some(DeckKind::Standard52),
            "short24" | "24" => Some(DeckKind::Short24),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Deck {
    kind: DeckKind,
    master: Vec<Card>,
    draw: VecDeque<Card>,
    discard: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Deck {
    /// Build a deck with every card in the draw pile, unshuffled.
    pub fn new(kind: DeckKind, seed: u64) -> Self {
        let master = kind.cards();
        Self {
            kind,
            draw: master.iter().copied().collect(),
            master,
            discard: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.master.len()
    }

    pub fn draw_len(&self) -> usize {
        self.draw.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn in_play(&self) -> usize {
        self.master.len() - self.draw.len() - self.discard.len()
    }

    pub fn master(&self) -> &[Card] {
        &self.master
    }

    /// Collect every card back and lay them into the draw pile in a uniformly
    /// random order. The discard pile ends up empty.
    pub fn reset(&mut self) {
        let mut cards = self.master.clone();
        cards.shuffle(&mut self.rng);
        self.draw = cards.into();
        self.discard.clear();
    }

    pub fn shuffle_draw_pile(&mut self) {
        self.draw.make_contiguous().shuffle(&mut self.rng);
    }

    /// Move the discard pile under the draw pile and shuffle the combined pile.
    pub fn shuffle_discard_pile(&mut self) {
        self.draw.extend(self.discard.drain(..));
        self.shuffle_draw_pile();
    }

    /// Take the top card of the draw pile, if any.
    pub fn draw(&mut self) -> Option<Card> {
        self.draw.pop_front()
    }

    /// Return a card that is in play to the discard pile.
    pub fn discard(&mut self, card: Card) -> Result<(), DomainError> {
        let owned = self.master.iter().filter(|c| **c == card).count();
        let piled = self.draw.iter().filter(|c| **c == card).count()
            + self.discard.iter().filter(|c| **c == card).count();
        if piled >= owned {
            return Err(DomainError::validation(
                ValidationKind::Other("card not in play".into()),
                format!("{card} is not in play"),
            ));
        }
        self.discard.push(card);
        Ok(())
    }

    /// Deal `count` cards to each of `hands` hands, one card at a time in
    /// rotation. Fails without touching the draw pile when there are not
    /// enough cards.
    pub fn deal(&mut self, hands: usize, count: usize) -> Result<Vec<Vec<Card>>, DomainError> {
        let needed = hands * count;
        if needed > self.draw.len() {
            return Err(DomainError::infra(
                InfraErrorKind::DeckExhausted,
                format!(
                    "cannot deal {count} cards to {hands} hands from {} remaining",
                    self.draw.len()
                ),
            ));
        }
        let mut dealt = vec![Vec::with_capacity(count); hands];
        for _ in 0..count {
            for hand in dealt.iter_mut() {
                // Checked above.
                if let Some(card) = self.draw.pop_front() {
                    hand.push(card);
                }
            }
        }
        Ok(dealt)
    }
}
