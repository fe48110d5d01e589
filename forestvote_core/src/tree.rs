//! Depth-2 decision trees: one root split, two constant leaves.
//!
//! Trees are generated, never trained. The split threshold comes from a small
//! fixed grid so the learner can route a point in their head, and the leaf
//! classes are biased toward disagreeing (an informative split) without
//! forbidding a tree whose leaves agree.

use crate::config::GeneratorConfig;
use crate::error::QuizError;
use crate::point::Point;
use forestvote_env::EntropySource;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Input feature a tree splits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    X1,
    X2,
}

impl Feature {
    pub fn name(&self) -> &'static str {
        match self {
            Feature::X1 => "x1",
            Feature::X2 => "x2",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x1" => Ok(Feature::X1),
            "x2" => Ok(Feature::X2),
            _ => Err(format!("Unknown feature: {}", s)),
        }
    }
}

/// Binary class label. Serialized as `0` / `1`.
///
/// The display convention is fixed: class 0 is "Red", class 1 is "Blue".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Class {
    Red,
    Blue,
}

impl Class {
    /// Numeric class index (0 or 1).
    pub fn index(&self) -> u8 {
        match self {
            Class::Red => 0,
            Class::Blue => 1,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Class::Red),
            1 => Some(Class::Blue),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Class::Red => "Red",
            Class::Blue => "Blue",
        }
    }

    /// The other class (`1 - c`).
    pub fn flipped(&self) -> Self {
        match self {
            Class::Red => Class::Blue,
            Class::Blue => Class::Red,
        }
    }
}

impl From<Class> for u8 {
    fn from(class: Class) -> u8 {
        class.index()
    }
}

impl TryFrom<u8> for Class {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Class::from_index(value).ok_or_else(|| format!("class must be 0 or 1, got {}", value))
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Class {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "r" | "red" => Ok(Class::Red),
            "1" | "b" | "blue" => Ok(Class::Blue),
            _ => Err(format!("Unknown class: {}", s)),
        }
    }
}

/// A single split: `point[feature] <= threshold` votes `left`, otherwise `right`.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Position in the forest (0-based)
    pub id: usize,

    /// Feature the root splits on
    pub feature: Feature,

    /// Split threshold, drawn from the generator's grid
    pub threshold: f64,

    /// Leaf class when the point routes left (`value <= threshold`)
    pub left: Class,

    /// Leaf class when the point routes right
    pub right: Class,
}

impl Tree {
    pub fn new(id: usize, feature: Feature, threshold: f64, left: Class, right: Class) -> Self {
        Self {
            id,
            feature,
            threshold,
            left,
            right,
        }
    }

    /// True when the point takes the left branch. Ties route left.
    pub fn routes_left(&self, point: &Point) -> bool {
        point.value(self.feature) <= self.threshold
    }

    /// This tree's vote for `point`.
    pub fn vote(&self, point: &Point) -> Class {
        if self.routes_left(point) {
            self.left
        } else {
            self.right
        }
    }

    /// Both leaves predict the same class; the split carries no information.
    pub fn is_degenerate(&self) -> bool {
        self.left == self.right
    }
}

/// Generates one random tree with the given id.
///
/// Draw order: feature coin, threshold choice, left coin, right coin, and a
/// variety draw only when the two leaves agree. With probability
/// `variety_probability` the right leaf is then flipped.
///
/// # Errors
/// * `QuizError::InvalidArgument` - the threshold grid is empty
pub fn generate_tree<E: EntropySource>(
    index: usize,
    config: &GeneratorConfig,
    entropy: &mut E,
) -> Result<Tree, QuizError> {
    let feature = if entropy.coin() { Feature::X1 } else { Feature::X2 };
    let threshold = *entropy.choice(&config.thresholds)?;
    let left = if entropy.coin() { Class::Red } else { Class::Blue };
    let mut right = if entropy.coin() { Class::Red } else { Class::Blue };

    if left == right && entropy.bernoulli(config.variety_probability) {
        right = left.flipped();
    }

    let tree = Tree::new(index, feature, threshold, left, right);
    debug!(
        "  tree {} | {} <= {:.2} -> {} / {}",
        tree.id, tree.feature, tree.threshold, tree.left, tree.right
    );
    Ok(tree)
}
