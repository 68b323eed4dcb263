//! Expense categories
//!
//! The set of categories is fixed. Each one has a stable integer id, which is
//! what gets persisted, and a human-readable label.

use std::fmt;

use crate::error::{GastosError, GastosResult};

/// One of the five fixed expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Alimentos,
    Lazer,
    Transporte,
    Contas,
    Outros,
}

impl Category {
    /// Get all categories in id order
    pub fn all() -> &'static [Self] {
        &[
            Self::Alimentos,
            Self::Lazer,
            Self::Transporte,
            Self::Contas,
            Self::Outros,
        ]
    }

    /// The persisted integer id
    pub fn id(&self) -> i64 {
        match self {
            Self::Alimentos => 1,
            Self::Lazer => 2,
            Self::Transporte => 3,
            Self::Contas => 4,
            Self::Outros => 5,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Alimentos => "Alimentos",
            Self::Lazer => "Lazer",
            Self::Transporte => "Transporte",
            Self::Contas => "Contas",
            Self::Outros => "Outros",
        }
    }

    /// Look up a category by its id, if it exists
    pub fn from_id(id: i64) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.id() == id)
    }

    /// Look up the label for a category id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the id is not one of the defined categories.
    pub fn label_for(id: i64) -> GastosResult<&'static str> {
        Self::from_id(id)
            .map(|c| c.label())
            .ok_or_else(|| GastosError::category_not_found(id.to_string()))
    }

    /// Full id -> label mapping, in id order
    pub fn list_all() -> Vec<(i64, &'static str)> {
        Self::all().iter().map(|c| (c.id(), c.label())).collect()
    }

    /// All valid ids, in order
    pub fn valid_ids() -> Vec<i64> {
        Self::all().iter().map(|c| c.id()).collect()
    }

    /// File-name friendly form of the label
    pub fn slug(&self) -> String {
        self.label().to_lowercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Label to show for a category id that may not exist
pub fn display_label(id: i64) -> &'static str {
    Category::from_id(id).map_or("Desconhecida", |c| c.label())
}
