//! Number formatting for hints and results.
//!
//! Rounding works on the shortest decimal representation of the value, so
//! `72.345` rounds to `72.35` even though the nearest double sits just below.

/// Format `value` with exactly `places` decimals, rounding half away from zero.
pub fn to_fixed(value: f64, places: usize) -> String {
    if let Some(special) = non_finite(value) {
        return special.to_string();
    }
    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .collect();
    if frac_part.as_bytes().get(places).is_some_and(|digit| *digit >= b'5') {
        round_up(&mut digits);
    }

    let split = digits.len() - places;
    let negative = value.is_sign_negative() && digits.iter().any(|digit| *digit != b'0');
    let mut out = String::with_capacity(digits.len() + 2);
    if negative {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|digit| char::from(*digit)));
    if places > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|digit| char::from(*digit)));
    }
    out
}

/// Round to `places` decimals and print in shortest form (`10`, not `10.0`).
pub fn round_to_display(value: f64, places: usize) -> String {
    let fixed = to_fixed(value, places);
    match fixed.parse::<f64>() {
        Ok(rounded) => format_number(rounded),
        Err(_) => fixed,
    }
}

/// Shortest display form of a number; negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if let Some(special) = non_finite(value) {
        return special.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// `Rango sugerido: {min} – {max}` with one-decimal bounds.
pub fn range_hint(min: f64, max: f64) -> String {
    format!(
        "Rango sugerido: {} – {}",
        round_to_display(min, 1),
        round_to_display(max, 1)
    )
}

/// Regression result, e.g. `72.35 años`.
pub fn life_expectancy(value: f64) -> String {
    format!("{} años", to_fixed(value, 2))
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

fn round_up(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
