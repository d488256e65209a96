use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{RecorderError, Result};

/// Whether a category adds to or subtracts from a balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CategoryKind {
    Income,
    #[default]
    Expense,
}

/// One transaction type together with its subtype names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryType {
    pub name: String,
    #[serde(default)]
    pub subtypes: Vec<String>,
    #[serde(default)]
    pub kind: CategoryKind,
}

impl CategoryType {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        kind: CategoryKind,
        subtypes: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            subtypes: subtypes.into_iter().map(Into::into).collect(),
            kind,
        }
    }
}

/// Maps type indices to names, subtype names and balance sign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CategoryTable {
    types: Vec<CategoryType>,
}

impl CategoryTable {
    pub fn new(types: Vec<CategoryType>) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &[CategoryType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn category(&self, type_index: usize) -> Result<&CategoryType> {
        self.types
            .get(type_index)
            .ok_or(RecorderError::InvalidCategoryIndex {
                type_index,
                subtype_index: None,
            })
    }

    pub fn type_name(&self, type_index: usize) -> Result<&str> {
        Ok(&self.category(type_index)?.name)
    }

    pub fn subtype_name(&self, type_index: usize, subtype_index: usize) -> Result<&str> {
        self.category(type_index)?
            .subtypes
            .get(subtype_index)
            .map(String::as_str)
            .ok_or(RecorderError::InvalidCategoryIndex {
                type_index,
                subtype_index: Some(subtype_index),
            })
    }

    pub fn kind(&self, type_index: usize) -> Result<CategoryKind> {
        Ok(self.category(type_index)?.kind)
    }

    pub fn contains(&self, type_index: usize, subtype_index: usize) -> bool {
        self.subtype_name(type_index, subtype_index).is_ok()
    }

    /// `amount` for income categories, `-amount` otherwise.
    pub fn signed_contribution(&self, type_index: usize, amount: Decimal) -> Result<Decimal> {
        Ok(match self.kind(type_index)? {
            CategoryKind::Income => amount,
            CategoryKind::Expense => -amount,
        })
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        use CategoryKind::{Expense, Income};
        Self::new(vec![
            CategoryType::new(
                "Food/Grooming",
                Expense,
                ["Groceries", "Restaurant", "Drugstore", "Other"],
            ),
            CategoryType::new("Clothing", Expense, ["Everyday", "Sports", "Shoes", "Other"]),
            CategoryType::new("Electronics", Expense, ["Devices", "Accessories", "Other"]),
            CategoryType::new("Media", Expense, ["Books", "Games", "Streaming", "Other"]),
            CategoryType::new("Housing", Expense, ["Rent", "Utilities", "Furniture", "Other"]),
            CategoryType::new("Amusement", Expense, ["Events", "Hobbies", "Other"]),
            CategoryType::new("Vacation", Expense, ["Travel", "Lodging", "Other"]),
            CategoryType::new("Locomotion", Expense, ["Public transport", "Fuel", "Other"]),
            CategoryType::new("Education", Expense, ["Courses", "Materials", "Other"]),
            CategoryType::new("Income", Income, ["Salary", "Gift", "Refund", "Other"]),
        ])
    }
}
