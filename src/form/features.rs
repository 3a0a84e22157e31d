use crate::prediction_api::{FeaturePayload, FeatureValue};

use super::messages;
use super::view::{Control, FormView};

/// Read every bound control into a payload.
///
/// Selects contribute their value verbatim. Numeric inputs are trimmed: empty
/// text becomes `Null`, anything else is parsed, and text that is not a number
/// is passed through as NaN rather than rejected. A missing or empty `Status`
/// is filled with the default the models were trained with.
pub fn collect_features(view: &FormView) -> FeaturePayload {
    let mut payload = FeaturePayload::new();
    for field in view.fields() {
        let value = match field.control() {
            Control::Select(select) => FeatureValue::Text(select.value().to_string()),
            Control::Number(input) => {
                let text = input.text.trim();
                if text.is_empty() {
                    FeatureValue::Null
                } else {
                    FeatureValue::Number(parse_number(text))
                }
            }
        };
        payload.insert(field.column.clone(), value);
    }

    if !payload.has_value("Status") {
        payload.insert("Status", FeatureValue::Text(messages::DEFAULT_STATUS.to_string()));
    }
    payload
}

/// Numeric conversion of trimmed form text; unparsable text yields NaN.
pub(crate) fn parse_number(text: &str) -> f64 {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if let Some((radix, digits)) = radix_literal(text) {
        return parse_radix(digits, radix);
    }
    // Rust also accepts `inf` and `nan` spellings; form text does not.
    if unsigned
        .bytes()
        .any(|byte| byte.is_ascii_alphabetic() && byte != b'e' && byte != b'E')
    {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// Unsigned `0x`, `0o` or `0b` literal; signed forms are not numbers.
fn radix_literal(text: &str) -> Option<(u32, &str)> {
    let prefix = text.get(..2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, &text[2..]))
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, ch| {
            ch.to_digit(radix)
                .map(|digit| acc * f64::from(radix) + f64::from(digit))
        })
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormLayout;
    use crate::form::fill_country_select;

    fn view() -> FormView {
        FormView::bind(&FormLayout::default()).unwrap()
    }

    #[test]
    fn empty_numeric_input_is_null() {
        let mut view = view();
        view.number_input_mut("gdp").unwrap().text = "   ".to_string();
        let payload = collect_features(&view);
        assert_eq!(payload.get("GDP"), Some(&FeatureValue::Null));
    }

    #[test]
    fn numeric_text_is_trimmed_and_parsed() {
        let mut view = view();
        view.number_input_mut("gdp").unwrap().text = " 1234.5 ".to_string();
        view.number_input_mut("schooling").unwrap().text = "1e1".to_string();
        let payload = collect_features(&view);
        assert_eq!(payload.get("GDP"), Some(&FeatureValue::Number(1234.5)));
        assert_eq!(payload.get("Schooling"), Some(&FeatureValue::Number(10.0)));
        assert_eq!(payload.get("Year"), Some(&FeatureValue::Number(2025.0)));
    }

    #[test]
    fn non_numeric_text_passes_through_as_nan() {
        let mut view = view();
        view.number_input_mut("alcohol").unwrap().text = "mucho".to_string();
        let payload = collect_features(&view);
        match payload.get("Alcohol") {
            Some(FeatureValue::Number(value)) => assert!(value.is_nan()),
            other => panic!("expected NaN number, got {other:?}"),
        }
    }

    #[test]
    fn select_value_is_taken_verbatim() {
        let mut view = view();
        fill_country_select(&mut view, &[" Chile ".to_string()]);
        let payload = collect_features(&view);
        assert_eq!(
            payload.get("Country"),
            Some(&FeatureValue::Text(" Chile ".to_string()))
        );
    }

    #[test]
    fn status_defaults_to_developing() {
        let payload = collect_features(&view());
        assert_eq!(
            payload.get("Status"),
            Some(&FeatureValue::Text("Developing".to_string()))
        );
        let columns: Vec<&str> = payload.iter().map(|(column, _)| column).collect();
        assert_eq!(columns.last(), Some(&"Status"));
    }

    #[test]
    fn parse_number_follows_form_number_rules() {
        assert_eq!(parse_number("-3.5"), -3.5);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("0x1F"), 31.0);
        assert_eq!(parse_number("0b11"), 3.0);
        assert_eq!(parse_number("0O17"), 15.0);
        assert!(parse_number("0b12").is_nan());
        assert!(parse_number("0x").is_nan());
        assert!(parse_number("-0x10").is_nan());
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("12abc").is_nan());
        assert!(parse_number("1,5").is_nan());
    }
}
