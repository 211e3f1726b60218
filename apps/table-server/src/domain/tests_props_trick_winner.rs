use proptest::prelude::*;

use crate::domain::cards_logic::winning_index;
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: if any trump was played the highest trump wins, otherwise
    /// the highest card of the led suit wins.
    #[test]
    fn prop_trick_winner_matches_oracle(
        trick in test_gens::complete_trick(),
        trump in test_gens::suit(),
    ) {
        let winner = winning_index(&trick, trump).unwrap();
        let lead = trick[0].suit;

        let trumps: Vec<_> = trick.iter().filter(|c| c.suit == trump).collect();
        let oracle = if let Some(best) = trumps.iter().max_by_key(|c| c.rank) {
            **best
        } else {
            *trick.iter().filter(|c| c.suit == lead).max_by_key(|c| c.rank).unwrap()
        };
        prop_assert_eq!(trick[winner], oracle);
    }

    /// Property: the leader's card can only lose to a trump or a higher card of its suit.
    #[test]
    fn prop_leader_loses_only_to_trump_or_higher(
        trick in test_gens::complete_trick(),
        trump in test_gens::suit(),
    ) {
        let winner = winning_index(&trick, trump).unwrap();
        if winner != 0 {
            let w = trick[winner];
            let lead = trick[0];
            prop_assert!(
                (w.suit == trump && lead.suit != trump) || (w.suit == lead.suit && w.rank > lead.rank),
                "winner {w} should outrank leader {lead}"
            );
        }
    }
}
