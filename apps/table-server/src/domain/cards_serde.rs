//! Wire format for cards: `{"suit": 1..=4, "number": 2..=14}`

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Rank, Suit};

impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = u8::deserialize(deserializer)?;
        Suit::try_from(n).map_err(|e| serde::de::Error::custom(e.detail().to_string()))
    }
}

#[derive(Serialize, Deserialize)]
struct CardWire {
    suit: u8,
    number: u8,
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CardWire {
            suit: self.suit.number(),
            number: self.rank.number(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = CardWire::deserialize(deserializer)?;
        let suit = Suit::try_from(wire.suit)
            .map_err(|e| serde::de::Error::custom(e.detail().to_string()))?;
        let rank = Rank::try_from(wire.number)
            .map_err(|e| serde::de::Error::custom(e.detail().to_string()))?;
        Ok(Card { suit, rank })
    }
}
