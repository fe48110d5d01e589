//! Reference evaluator for scenario checks.
//!
//! The Oracle recomputes votes and majorities from first principles, without
//! going through the core's evaluator, so scenarios can cross-check it.

use forestvote_core::{Class, Feature, Point, Tree};

/// Independent ground truth for a round.
#[derive(Debug, Default, Clone, Copy)]
pub struct Oracle;

impl Oracle {
    pub fn new() -> Self {
        Self
    }

    /// Vote of `tree` on `point`, read straight off the split.
    pub fn vote(&self, tree: &Tree, point: &Point) -> Class {
        let value = match tree.feature {
            Feature::X1 => point.x1,
            Feature::X2 => point.x2,
        };
        if value > tree.threshold {
            tree.right
        } else {
            tree.left
        }
    }

    /// Votes of every tree, in forest order.
    pub fn votes(&self, forest: &[Tree], point: &Point) -> Vec<Class> {
        forest.iter().map(|tree| self.vote(tree, point)).collect()
    }

    /// Blue iff it holds more than `floor(n / 2)` votes.
    pub fn majority(&self, votes: &[Class]) -> Class {
        let blue = votes.iter().filter(|v| **v == Class::Blue).count();
        if blue > votes.len() / 2 {
            Class::Blue
        } else {
            Class::Red
        }
    }

    /// A point sitting exactly on `tree`'s threshold.
    ///
    /// The unused coordinate is set to `other`.
    pub fn point_on_threshold(&self, tree: &Tree, other: f64) -> Point {
        match tree.feature {
            Feature::X1 => Point::new(tree.threshold, other),
            Feature::X2 => Point::new(other, tree.threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forestvote_core::majority_of;

    #[test]
    fn test_oracle_majority_agrees_on_small_cases() {
        let oracle = Oracle::new();
        let cases = [
            vec![Class::Blue, Class::Blue, Class::Red],
            vec![Class::Red, Class::Red, Class::Blue],
            vec![Class::Blue, Class::Red],
            vec![],
        ];
        for votes in &cases {
            assert_eq!(oracle.majority(votes), majority_of(votes));
        }
    }

    #[test]
    fn test_point_on_threshold() {
        let oracle = Oracle::new();
        let tree = Tree::new(0, Feature::X2, 0.65, Class::Blue, Class::Red);
        let point = oracle.point_on_threshold(&tree, 0.1);
        assert_eq!(point, Point::new(0.1, 0.65));
        assert_eq!(oracle.vote(&tree, &point), Class::Blue);
    }
}
