//! Memo category enumeration.
//!
//! # Responsibility
//! - Define the closed set of categories a memo can be filed under.
//! - Map category codes to display labels and badge style classes.
//!
//! # Invariants
//! - Codes are stable lowercase strings and are what storage persists.
//! - `"all"` is a list filter sentinel, never a category.
//! - Unrecognized codes render with `Other` styling and their raw code.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Filter sentinel that disables category filtering.
pub const CATEGORY_FILTER_ALL: &str = "all";

/// Closed category enumeration for memos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Personal,
    Work,
    Study,
    Idea,
    #[default]
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Personal,
        Category::Work,
        Category::Study,
        Category::Idea,
        Category::Other,
    ];

    /// Parses a stored category code. Returns `None` for unknown codes.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "personal" => Some(Self::Personal),
            "work" => Some(Self::Work),
            "study" => Some(Self::Study),
            "idea" => Some(Self::Idea),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Parses a code, falling back to `Other` when unrecognized.
    pub fn from_code_lossy(code: &str) -> Self {
        Self::parse(code).unwrap_or(Self::Other)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Study => "study",
            Self::Idea => "idea",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Study => "Study",
            Self::Idea => "Idea",
            Self::Other => "Other",
        }
    }

    /// Badge style class used by presentational output.
    pub fn style_class(self) -> &'static str {
        match self {
            Self::Personal => "bg-blue-100 text-blue-800",
            Self::Work => "bg-green-100 text-green-800",
            Self::Study => "bg-purple-100 text-purple-800",
            Self::Idea => "bg-yellow-100 text-yellow-800",
            Self::Other => "bg-gray-100 text-gray-800",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Display badge for a raw category code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBadge {
    /// Human-readable label; the raw code when unrecognized.
    pub label: String,
    pub style_class: &'static str,
}

impl CategoryBadge {
    /// Resolves label and style for a raw, possibly unknown, code.
    pub fn for_code(code: &str) -> Self {
        match Category::parse(code) {
            Some(category) => Self {
                label: category.label().to_string(),
                style_class: category.style_class(),
            },
            None => Self {
                label: code.to_string(),
                style_class: Category::Other.style_class(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryBadge};

    #[test]
    fn codes_roundtrip_through_parse() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.code()), Some(category));
        }
        assert_eq!(Category::parse("all"), None);
        assert_eq!(Category::parse("Work"), None);
    }

    #[test]
    fn unknown_code_falls_back_to_other_style_with_raw_label() {
        let badge = CategoryBadge::for_code("recipes");
        assert_eq!(badge.label, "recipes");
        assert_eq!(badge.style_class, Category::Other.style_class());
        assert_eq!(Category::from_code_lossy("recipes"), Category::Other);
    }

    #[test]
    fn known_code_uses_label() {
        let badge = CategoryBadge::for_code("study");
        assert_eq!(badge.label, "Study");
        assert_eq!(badge.style_class, "bg-purple-100 text-purple-800");
    }
}
