//! Core card-related types: Card, Rank, Suit

use std::fmt;

use crate::errors::domain::{DomainError, ValidationKind};

/// Suits in wire order: 1 Diamonds, 2 Clubs, 3 Hearts, 4 Spades.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Diamonds,
    Clubs,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];

    pub fn number(self) -> u8 {
        match self {
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Hearts => 3,
            Suit::Spades => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }
}

impl TryFrom<u8> for Suit {
    type Error = DomainError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Suit::Diamonds),
            2 => Ok(Suit::Clubs),
            3 => Ok(Suit::Hearts),
            4 => Ok(Suit::Spades),
            _ => Err(DomainError::validation(
                ValidationKind::MalformedPayload,
                format!("Invalid suit number {n}"),
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Face number with Ace high (2..=14).
    pub fn number(self) -> u8 {
        self as u8 + 2
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = DomainError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        if (2..=14).contains(&n) {
            Ok(Rank::ALL[(n - 2) as usize])
        } else {
            Err(DomainError::validation(
                ValidationKind::MalformedPayload,
                format!("Invalid card number {n}"),
            ))
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Compact identity in `0..52`, stable across decks.
    pub fn index(self) -> usize {
        (self.suit.number() as usize - 1) * 13 + (self.rank.number() as usize - 2)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank.name(), self.suit.name())
    }
}

// Note: Ord on Card is only for stable sorting (suit then rank).
// Trick resolution goes through `cards_logic::card_beats`.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
