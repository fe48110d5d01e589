//! Forest evaluation and majority voting.

use crate::point::Point;
use crate::tree::{Class, Tree};
use serde::{Deserialize, Serialize};

/// Per-tree votes (index-aligned with the forest) and the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub votes: Vec<Class>,
    pub majority: Class,
}

impl Ballot {
    /// Aggregates a vote sequence with [`majority_of`].
    pub fn from_votes(votes: Vec<Class>) -> Self {
        let majority = majority_of(&votes);
        Self { votes, majority }
    }

    /// Number of votes for `class`.
    pub fn count(&self, class: Class) -> usize {
        count_votes(&self.votes, class)
    }
}

/// One tree's vote. Deterministic and total.
pub fn evaluate(tree: &Tree, point: &Point) -> Class {
    tree.vote(point)
}

/// Evaluates every tree in order and aggregates the votes.
pub fn evaluate_forest(forest: &[Tree], point: &Point) -> Ballot {
    let votes = forest.iter().map(|tree| evaluate(tree, point)).collect();
    Ballot::from_votes(votes)
}

/// Blue when strictly more than half the votes are Blue, Red otherwise.
///
/// An exact tie (even length) resolves to Red here, matching `2 * ones > n`.
/// Forests are always odd, so ties do not occur in a round.
pub fn majority_of(votes: &[Class]) -> Class {
    let ones = count_votes(votes, Class::Blue);
    if 2 * ones > votes.len() {
        Class::Blue
    } else {
        Class::Red
    }
}

pub(crate) fn count_votes(votes: &[Class], class: Class) -> usize {
    votes.iter().filter(|&&v| v == class).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Feature;
    use proptest::prelude::*;

    fn class_from(bit: bool) -> Class {
        if bit {
            Class::Blue
        } else {
            Class::Red
        }
    }

    #[test]
    fn test_uniform_forest_left_of_split() {
        let forest: Vec<Tree> = (0..5)
            .map(|i| Tree::new(i, Feature::X1, 0.5, Class::Red, Class::Blue))
            .collect();
        let point = Point::new(0.3, 0.8);

        let ballot = evaluate_forest(&forest, &point);
        assert_eq!(ballot.votes, vec![Class::Red; 5]);
        assert_eq!(ballot.majority, Class::Red);
        assert_eq!(ballot.count(Class::Blue), 0);
    }

    #[test]
    fn test_two_of_three_blue() {
        let ballot = Ballot::from_votes(vec![Class::Blue, Class::Blue, Class::Red]);
        assert_eq!(ballot.majority, Class::Blue);
        assert_eq!(ballot.count(Class::Red), 1);
    }

    #[test]
    fn test_even_tie_resolves_by_strict_rule() {
        assert_eq!(majority_of(&[Class::Blue, Class::Red]), Class::Red);
        assert_eq!(majority_of(&[]), Class::Red);
    }

    #[test]
    fn test_votes_index_aligned() {
        let forest = vec![
            Tree::new(0, Feature::X1, 0.2, Class::Red, Class::Blue),
            Tree::new(1, Feature::X2, 0.8, Class::Blue, Class::Red),
            Tree::new(2, Feature::X2, 0.35, Class::Red, Class::Red),
        ];
        let point = Point::new(0.5, 0.5);
        let ballot = evaluate_forest(&forest, &point);
        assert_eq!(ballot.votes, vec![Class::Blue, Class::Blue, Class::Red]);
    }

    proptest! {
        #[test]
        fn prop_majority_matches_count(bits in proptest::collection::vec(any::<bool>(), 0..31)) {
            let votes: Vec<Class> = bits.iter().map(|&b| class_from(b)).collect();
            let ones = bits.iter().filter(|&&b| b).count();
            let expected = if ones * 2 > votes.len() { Class::Blue } else { Class::Red };
            prop_assert_eq!(majority_of(&votes), expected);
        }

        #[test]
        fn prop_odd_forest_majority_has_more_than_half(
            bits in proptest::collection::vec(any::<bool>(), 1..8)
        ) {
            // Force odd length
            let mut bits = bits;
            if bits.len() % 2 == 0 {
                bits.push(true);
            }
            let votes: Vec<Class> = bits.iter().map(|&b| class_from(b)).collect();
            let majority = majority_of(&votes);
            prop_assert!(count_votes(&votes, majority) * 2 > votes.len());
        }

        #[test]
        fn prop_evaluate_is_deterministic(
            use_x1 in any::<bool>(),
            threshold in 0.0f64..1.0,
            left in any::<bool>(),
            right in any::<bool>(),
            x1 in 0.0f64..1.0,
            x2 in 0.0f64..1.0,
        ) {
            let feature = if use_x1 { Feature::X1 } else { Feature::X2 };
            let tree = Tree::new(0, feature, threshold, class_from(left), class_from(right));
            let point = Point::new(x1, x2);
            let first = evaluate(&tree, &point);
            prop_assert_eq!(first, evaluate(&tree, &point));
            let expected = if point.value(feature) <= threshold { tree.left } else { tree.right };
            prop_assert_eq!(first, expected);
        }
    }
}
