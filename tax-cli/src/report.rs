//! Plain-text renderings for the terminal.

use std::fmt::Write;

use rust_decimal::Decimal;
use tax_core::calculations::common::format_currency;
use tax_core::{CalculationSummary, FullTaxCalculationResult};

fn percent(rate: Decimal) -> String {
    format!("{:.2}%", rate * Decimal::ONE_HUNDRED)
}

/// A one-screen summary of a full calculation.
pub fn render_summary(result: &FullTaxCalculationResult) -> String {
    let s = &result.summary;
    let deduction_kind = if result.deductions.used_standard {
        "standard"
    } else {
        "itemized"
    };

    let rows: [(&str, String); 14] = [
        ("Filing status", s.filing_status.to_string()),
        ("Total income", format_currency(s.total_income)),
        ("Adjusted gross income", format_currency(s.agi)),
        (
            "Deduction",
            format!("{} ({})", format_currency(s.deduction_amount), deduction_kind),
        ),
        ("Taxable income", format_currency(s.taxable_income)),
        ("Ordinary tax", format_currency(s.ordinary_tax)),
        ("Qualified dividend tax", format_currency(s.qualified_dividend_tax)),
        ("Capital gains tax", format_currency(s.capital_gains_tax)),
        ("Net investment income tax", format_currency(s.niit)),
        ("Credits", format_currency(s.total_credits)),
        ("FICA", format_currency(s.total_fica)),
        ("Total tax", format_currency(s.total_tax)),
        (
            "Effective / marginal rate",
            format!("{} / {}", percent(s.effective_rate), percent(s.marginal_rate)),
        ),
        ("Payments", format_currency(s.total_payments)),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{:<27}{:>18}", label, value);
    }

    let (label, amount) = if s.refund_or_owed.is_sign_negative() && !s.refund_or_owed.is_zero() {
        ("Refund", -s.refund_or_owed)
    } else {
        ("Amount owed", s.refund_or_owed)
    };
    let _ = writeln!(out, "{:<27}{:>18}", label, format_currency(amount));
    out
}

/// One line per stored calculation.
pub fn render_history(summaries: &[CalculationSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5}  {:<20}  {:<27}  {:>14}  {:>14}  {:>14}",
        "ID", "CREATED", "FILING STATUS", "AGI", "TOTAL TAX", "REFUND/OWED"
    );
    for s in summaries {
        let _ = writeln!(
            out,
            "{:>5}  {:<20}  {:<27}  {:>14}  {:>14}  {:>14}",
            s.id,
            s.created_at.format("%Y-%m-%d %H:%M:%S"),
            s.filing_status.as_str(),
            format_currency(s.agi),
            format_currency(s.total_tax),
            format_currency(s.refund_or_owed),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{FilingStatus, TaxReturnInput, W2Income, calculate_full_tax};

    use super::*;

    fn single_w2() -> FullTaxCalculationResult {
        let mut input = TaxReturnInput::new(FilingStatus::Single);
        input.w2s.push(W2Income {
            wages: dec!(75000.00),
            federal_withholding: dec!(9000.00),
        });
        calculate_full_tax(&input).unwrap()
    }

    #[test]
    fn summary_shows_refund_as_positive_amount() {
        let text = render_summary(&single_w2());

        assert!(text.contains("Taxable income"));
        assert!(text.contains("$60,400.00"));
        assert!(text.contains("$14,078.50"));
        assert!(text.contains("18.77% / 22.00%"));
        assert!(text.lines().last().unwrap().starts_with("Refund"));
        assert!(text.lines().last().unwrap().ends_with("$659.00"));
    }

    #[test]
    fn history_has_one_line_per_row() {
        let summaries = vec![CalculationSummary {
            id: 3,
            created_at: Utc.with_ymd_and_hms(2024, 4, 15, 9, 30, 0).unwrap(),
            filing_status: FilingStatus::HeadOfHousehold,
            total_income: dec!(30000),
            agi: dec!(30000),
            taxable_income: dec!(8100),
            federal_tax: dec!(810),
            total_credits: dec!(4000),
            total_tax: dec!(-895.00),
            effective_rate: dec!(-0.029833),
            marginal_rate: dec!(0.10),
            refund_or_owed: dec!(-3190.00),
        }];

        let text = render_history(&summaries);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("2024-04-15 09:30:00"));
        assert!(lines[1].contains("HEAD_OF_HOUSEHOLD"));
        assert!(lines[1].ends_with("-$3,190.00"));
    }
}
