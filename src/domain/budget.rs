use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Cents, format_cents};

pub const DEFAULT_BUDGET_NAME: &str = "Default Budget";

/// A named set of per-category spending limits.
///
/// Categories are keyed by the exact string given (no case folding).
/// A category without an entry has limit 0, which means "no limit".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    name: String,
    category_limits: BTreeMap<String, Cents>,
}

impl Budget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category_limits: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Insert or overwrite the limit for a category. Zero or negative
    /// limits are stored as given and behave like an unset limit.
    pub fn set_category_limit(&mut self, category: impl Into<String>, limit_cents: Cents) {
        self.category_limits.insert(category.into(), limit_cents);
    }

    /// The stored limit, or 0 when the category has none.
    pub fn category_limit(&self, category: &str) -> Cents {
        self.category_limits.get(category).copied().unwrap_or(0)
    }

    /// Remove a limit; returns the old value if there was one.
    pub fn remove_category_limit(&mut self, category: &str) -> Option<Cents> {
        self.category_limits.remove(category)
    }

    /// Copy of all limits. Changes to the returned map do not touch the budget.
    pub fn all_category_limits(&self) -> BTreeMap<String, Cents> {
        self.category_limits.clone()
    }

    pub fn has_limits(&self) -> bool {
        !self.category_limits.is_empty()
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET_NAME)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Budget: {}", self.name)?;
        for (category, limit) in &self.category_limits {
            writeln!(f, "  {:<15}: ${}", category, format_cents(*limit))?;
        }
        Ok(())
    }
}
