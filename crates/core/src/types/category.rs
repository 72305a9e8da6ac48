//! Product category set.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Category`] from a string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct CategoryError(String);

/// The fixed set of product categories.
///
/// New products default to [`Category::Electronics`]. The set is closed:
/// forms render it as a select control and the store never holds anything
/// outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Electronics,
    Grocery,
    Clothing,
    Accessories,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [
        Self::Electronics,
        Self::Grocery,
        Self::Clothing,
        Self::Accessories,
    ];

    /// The category's display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Grocery => "Grocery",
            Self::Clothing => "Clothing",
            Self::Accessories => "Accessories",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Electronics" => Ok(Self::Electronics),
            "Grocery" => Ok(Self::Grocery),
            "Clothing" => Ok(Self::Clothing),
            "Accessories" => Ok(Self::Accessories),
            other => Err(CategoryError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_is_electronics() {
        assert_eq!(Category::default(), Category::Electronics);
    }

    #[test]
    fn test_roundtrip_all() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()).unwrap(), category);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!(Category::from_str("Furniture").is_err());
        assert!(Category::from_str("electronics").is_err());
    }
}
