use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use colored::Colorize;

use crate::core::error::InvalidInputError;

pub type Amount = Decimal;
pub type TransactionId = i64;

pub const CURRENCY_SYMBOL: &str = "R";

/// Largest accepted magnitude, in whole currency units. Keeps every sum of
/// a ledger, and its two-place rendering, inside `Decimal`'s 28 digits.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

pub fn within_limit(amount: Amount) -> bool {
    amount.abs() <= Decimal::from(MAX_AMOUNT)
}

/// Renders a monetary value with exactly two fraction digits,
/// sign first and currency symbol second: `R12.50`, `-R42.50`.
pub fn format_amount(amount: Amount) -> String {
    let mut magnitude = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    magnitude.rescale(2);

    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-{}{}", CURRENCY_SYMBOL, magnitude)
    } else {
        format!("{}{}", CURRENCY_SYMBOL, magnitude)
    }
}

/// Converts a raw floating point amount, as typed by a user,
/// into a decimal amount.
pub fn parse_amount(amount: f64) -> Result<Amount, InvalidInputError> {
    if !amount.is_finite() {
        return Err(InvalidInputError::NonFiniteAmount(amount));
    }
    match Decimal::from_f64(amount) {
        Some(value) if within_limit(value) => Ok(value),
        _ => Err(InvalidInputError::AmountOutOfRange(amount))
    }
}

/// Trims a description and checks that something is left.
pub fn parse_description(description: &str) -> Result<String, InvalidInputError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(InvalidInputError::EmptyDescription);
    }
    Ok(trimmed.to_owned())
}

/// A single income (positive amount) or expense (negative amount) entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "text")]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Amount,
}

impl Transaction {
    pub fn new(id: TransactionId, description: &str, amount: f64) -> Result<Transaction, InvalidInputError> {
        let description = parse_description(description)?;
        let amount = parse_amount(amount)?;
        Ok(Transaction { id, description, amount })
    }

    /// Zero counts as income for display purposes, though it contributes
    /// to neither the income nor the expense total.
    pub fn is_income(&self) -> bool {
        !self.amount.is_sign_negative() || self.amount.is_zero()
    }

    pub fn formatted_amount(&self) -> String {
        format_amount(self.amount)
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let amount = self.formatted_amount();
        let amount = if self.is_income() { amount.as_str().green() } else { amount.as_str().red() };
        let id = format!("[{}]", self.id);
        write!(f, "{} {}: {}", id.as_str().dimmed(), self.description, amount)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case("3500", "R3500.00")]
    #[case("-1500", "-R1500.00")]
    #[case("-42.5", "-R42.50")]
    #[case("0", "R0.00")]
    #[case("0.005", "R0.01")]
    #[case("-0.005", "-R0.01")]
    #[case("12.344", "R12.34")]
    #[case("1234567.891", "R1234567.89")]
    #[case("1000000000000000", "R1000000000000000.00")]
    #[case("-999999999999999.995", "-R1000000000000000.00")]
    fn formats_amounts(#[case] amount: &str, #[case] expected: &str) {
        assert_eq!(format_amount(dec(amount)), expected);
    }

    #[test]
    fn negative_zero_has_no_sign() {
        let neg_zero = dec("-0.00");
        assert_eq!(format_amount(neg_zero), "R0.00");
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn rejects_non_finite_amounts(#[case] amount: f64) {
        assert!(matches!(parse_amount(amount), Err(InvalidInputError::NonFiniteAmount(_))));
    }

    #[test]
    fn rejects_huge_amounts() {
        assert!(matches!(parse_amount(1e300), Err(InvalidInputError::AmountOutOfRange(_))));
    }

    #[rstest]
    #[case(1e15, true)]
    #[case(-1e15, true)]
    #[case(1.5e15, false)]
    #[case(-7e28, false)]
    #[case(1e27, false)]
    fn caps_amount_magnitude(#[case] amount: f64, #[case] accepted: bool) {
        assert_eq!(parse_amount(amount).is_ok(), accepted);
        if !accepted {
            assert_eq!(parse_amount(amount), Err(InvalidInputError::AmountOutOfRange(amount)));
        }
    }

    #[test]
    fn largest_amount_keeps_two_places() {
        let largest = parse_amount(MAX_AMOUNT as f64).unwrap();
        assert_eq!(format_amount(-largest), "-R1000000000000000.00");
    }

    #[test]
    fn amount_keeps_short_decimal_form() {
        assert_eq!(parse_amount(0.1).unwrap(), dec("0.1"));
        assert_eq!(parse_amount(-1500.0).unwrap(), dec("-1500"));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn rejects_blank_descriptions(#[case] description: &str) {
        assert_eq!(parse_description(description), Err(InvalidInputError::EmptyDescription));
    }

    #[test]
    fn trims_descriptions() {
        let transaction = Transaction::new(1, "  coffee ", -3.5).unwrap();
        assert_eq!(transaction.description, "coffee");
    }

    #[test]
    fn keeps_markup_verbatim() {
        let transaction = Transaction::new(1, "<b>bonus</b> & tips", 10.0).unwrap();
        assert_eq!(transaction.description, "<b>bonus</b> & tips");
    }

    #[rstest]
    #[case(5000.0, true)]
    #[case(0.0, true)]
    #[case(-0.01, false)]
    fn classifies_income(#[case] amount: f64, #[case] income: bool) {
        let transaction = Transaction::new(7, "entry", amount).unwrap();
        assert_eq!(transaction.is_income(), income);
    }

    #[test]
    fn can_print() {
        colored::control::set_override(false);
        let transaction = Transaction::new(42, "rent", -1500.0).unwrap();
        assert_eq!(transaction.to_string(), "[42] rent: -R1500.00");
    }

    #[test]
    fn serializes_with_wire_names() {
        let transaction = Transaction::new(1700000000000, "salary", 5000.25).unwrap();
        let value = serde_json::to_value(&transaction).unwrap();
        assert_eq!(value, json!({"id": 1700000000000i64, "text": "salary", "amount": 5000.25}));
    }

    #[test]
    fn deserializes_integer_amounts() {
        let parsed: Transaction =
            serde_json::from_value(json!({"id": 3, "text": "rent", "amount": -1500})).unwrap();
        assert_eq!(parsed.id, 3);
        assert_eq!(parsed.description, "rent");
        assert_eq!(parsed.amount, dec("-1500"));
    }
}
