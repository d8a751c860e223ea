use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fraction digits used for value-axis tick labels.
pub const TICK_LABEL_FRACTION_DIGITS: u32 = 2;
/// Fraction digits used when a value is printed without an explicit limit.
pub const DEFAULT_FRACTION_DIGITS: u32 = 3;

// 2^53: from here on every f64 is an integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Built-in locale used for number labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisLabelLocale {
    #[default]
    EnUs,
    EsEs,
}

impl AxisLabelLocale {
    fn group_separator(self) -> char {
        match self {
            Self::EnUs => ',',
            Self::EsEs => '.',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Self::EnUs => '.',
            Self::EsEs => ',',
        }
    }

    // es-ES leaves four-digit integers ungrouped.
    fn min_grouped_digits(self) -> usize {
        match self {
            Self::EnUs => 4,
            Self::EsEs => 5,
        }
    }
}

/// Formats `value` with at most `max_fraction_digits` (rounded half away
/// from zero, trailing zeros dropped) and locale digit grouping.
#[must_use]
pub fn format_number(value: f64, max_fraction_digits: u32, locale: AxisLabelLocale) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
    }

    let plain = rounded_plain_decimal(value, max_fraction_digits);
    let (negative, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, plain.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(plain.len() + integer.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    push_grouped_integer(&mut out, integer, locale);
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator());
        out.push_str(fraction);
    }
    out
}

fn rounded_plain_decimal(value: f64, max_fraction_digits: u32) -> String {
    if let Some(decimal) = Decimal::from_f64(value) {
        let rounded = decimal
            .round_dp_with_strategy(max_fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            return "0".to_owned();
        }
        return rounded.normalize().to_string();
    }

    // Outside the decimal range. Floats this large carry no fraction, so the
    // shortest round-trip digits are printed as-is.
    if value.abs() >= MAX_EXACT_INTEGER {
        return format!("{value}");
    }
    let precision = max_fraction_digits as usize;
    let text = format!("{value:.precision$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    };
    if text == "-0" { "0".to_owned() } else { text }
}

fn push_grouped_integer(out: &mut String, digits: &str, locale: AxisLabelLocale) {
    if digits.len() < locale.min_grouped_digits() {
        out.push_str(digits);
        return;
    }
    let lead = digits.len() % 3;
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (index + 3 - lead) % 3 == 0 {
            out.push(locale.group_separator());
        }
        out.push(digit);
    }
}
