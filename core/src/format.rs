//! Display formatting for KPI values.
//!
//! Pure presentation helpers: they never fail, a value that cannot be shown
//! becomes [`PLACEHOLDER`].

use salesdash_types::{KpiDisplay, KpiTriple};

pub const PLACEHOLDER: &str = "-";

/// Whole dollars with thousands separators: `$12,346`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("${}", format_amount(value))
}

/// Whole number with thousands separators, used for heatmap cells: `12,346`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    group_thousands(&format!("{value:.0}"))
}

/// One decimal place with thousands separators: `1,234.5`
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    group_thousands(&format!("{value:.1}"))
}

/// Integer count with thousands separators: `1,234`
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

/// Insert `,` every three digits of the integer part of a plain decimal string.
fn group_thousands(s: &str) -> String {
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(s.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push_str(frac_part);
    grouped
}

/// Extension trait producing the display strings for the KPI cards
pub trait KpiTripleExt {
    fn display(&self) -> KpiDisplay;
}

impl KpiTripleExt for KpiTriple {
    fn display(&self) -> KpiDisplay {
        KpiDisplay {
            total_revenue: format_currency(self.total_revenue),
            mean_units: format_number(self.mean_units),
            row_count: format_count(self.row_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1234.0), "$1,234");
        assert_eq!(format_currency(1234567.8), "$1,234,568");
        assert_eq!(format_currency(-2500.0), "$-2,500");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(45_210.6), "45,211");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(10.0), "10.0");
        assert_eq!(format_number(12.34), "12.3");
        assert_eq!(format_number(1234.5), "1,234.5");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(12_345_678), "12,345,678");
    }

    #[test]
    fn test_non_finite_values_use_placeholder() {
        assert_eq!(format_currency(f64::NAN), PLACEHOLDER);
        assert_eq!(format_number(f64::INFINITY), PLACEHOLDER);
    }

    #[test]
    fn test_kpi_display() {
        let kpis = KpiTriple {
            total_revenue: 15_250.0,
            mean_units: 7.26,
            row_count: 1_200,
        };
        let display = kpis.display();
        assert_eq!(display.total_revenue, "$15,250");
        assert_eq!(display.mean_units, "7.3");
        assert_eq!(display.row_count, "1,200");
    }
}
