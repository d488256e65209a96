//! Money presentation helpers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::transaction::{round_money, MONEY_SCALE};

/// How amounts are rendered in view rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoneyFormat {
    pub symbol: String,
    pub decimal_separator: char,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            symbol: "€".into(),
            decimal_separator: '.',
        }
    }
}

impl MoneyFormat {
    pub fn with_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Two fraction digits followed by the currency symbol, e.g. `-12.50 €`.
    pub fn format(&self, amount: Decimal) -> String {
        let mut body = format!("{:.*}", MONEY_SCALE as usize, round_money(amount));
        if self.decimal_separator != '.' {
            body = body.replace('.', &self.decimal_separator.to_string());
        }
        if self.symbol.is_empty() {
            body
        } else {
            format!("{} {}", body, self.symbol)
        }
    }
}
