use std::collections::BTreeMap;

use crate::prediction_api::{Metadata, MetadataError, PredictionService, RangeInfo};

use super::view::{FormView, SelectOption};
use super::{format, messages};

/// Bounds forced on the year input whenever the API reports a `Year` range.
pub const YEAR_MIN: f64 = 2000.0;
pub const YEAR_MAX: f64 = 2030.0;
pub const YEAR_DEFAULT: &str = "2025";

/// Fetch metadata and populate the form. Failure is terminal: no retry.
pub fn load_metadata<S>(view: &mut FormView, service: &S)
where
    S: PredictionService + ?Sized,
{
    apply_metadata(view, service.fetch_metadata());
}

/// Render a metadata fetch result into the form.
pub fn apply_metadata(view: &mut FormView, result: Result<Metadata, MetadataError>) {
    match result {
        Ok(metadata) => {
            fill_country_select(view, &metadata.countries);
            fill_hints(view, &metadata.ranges);
        }
        Err(err) => {
            tracing::warn!("Metadata load failed: {err}");
            view.global_message = messages::METADATA_LOAD_FAILED.to_string();
        }
    }
}

/// Rebuild the country options in server order, without de-duplication.
pub fn fill_country_select(view: &mut FormView, countries: &[String]) {
    let options = countries
        .iter()
        .map(|country| SelectOption {
            value: country.clone(),
            label: country.clone(),
        })
        .collect();
    view.country_select_mut().replace_options(options);
}

/// Write suggested ranges into the hints whose column is known and apply the
/// fixed year bounds. Hints for unknown columns keep their text.
pub fn fill_hints(view: &mut FormView, ranges: &BTreeMap<String, RangeInfo>) {
    for hint in view.hints_mut() {
        let Some(info) = ranges.get(&hint.column) else {
            continue;
        };
        hint.text = format::range_hint(info.min, info.max);
    }

    if ranges.contains_key("Year") {
        let year = view.year_input_mut();
        year.min = Some(YEAR_MIN);
        year.max = Some(YEAR_MAX);
        year.text = YEAR_DEFAULT.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormLayout;
    use crate::form::view::Control;

    fn view() -> FormView {
        FormView::bind(&FormLayout::default()).unwrap()
    }

    fn ranges(entries: &[(&str, f64, f64)]) -> BTreeMap<String, RangeInfo> {
        entries
            .iter()
            .map(|(column, min, max)| {
                (
                    (*column).to_string(),
                    RangeInfo {
                        min: *min,
                        max: *max,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn empty_country_list_leaves_no_options() {
        let mut view = view();
        fill_country_select(&mut view, &["Chile".to_string()]);
        fill_country_select(&mut view, &[]);
        assert!(view.country_select().options().is_empty());
        assert_eq!(view.country_select().value(), "");
    }

    #[test]
    fn countries_keep_server_order_and_duplicates() {
        let mut view = view();
        let countries: Vec<String> = ["Peru", "Chile", "Peru"].map(String::from).to_vec();
        fill_country_select(&mut view, &countries);
        let values: Vec<&str> = view
            .country_select()
            .options()
            .iter()
            .map(|option| option.value.as_str())
            .collect();
        assert_eq!(values, vec!["Peru", "Chile", "Peru"]);
        assert!(
            view.country_select()
                .options()
                .iter()
                .all(|option| option.value == option.label)
        );
        assert_eq!(view.country_select().value(), "Peru");
    }

    #[test]
    fn hints_without_range_keep_their_text() {
        let mut view = view();
        view.hints_mut()
            .iter_mut()
            .find(|hint| hint.column == "Alcohol")
            .unwrap()
            .text = "previous".to_string();
        fill_hints(&mut view, &ranges(&[("GDP", 10.04, 20.06)]));

        assert_eq!(view.hint_for("alcohol").unwrap().text, "previous");
        assert_eq!(
            view.hint_for("gdp").unwrap().text,
            "Rango sugerido: 10 – 20.1"
        );
    }

    #[test]
    fn year_range_is_overridden() {
        let mut view = view();
        view.year_input_mut().text = "1999".to_string();
        fill_hints(&mut view, &ranges(&[("Year", 2000.0, 2015.0)]));
        let year = view.year_input();
        assert_eq!(year.min, Some(2000.0));
        assert_eq!(year.max, Some(2030.0));
        assert_eq!(year.text, "2025");
        assert_eq!(
            view.hint_for("yearInput").unwrap().text,
            "Rango sugerido: 2000 – 2015"
        );
    }

    #[test]
    fn year_bounds_untouched_without_year_range() {
        let mut view = view();
        view.year_input_mut().text = "2010".to_string();
        fill_hints(&mut view, &ranges(&[("GDP", 1.0, 2.0)]));
        assert_eq!(view.year_input().min, None);
        assert_eq!(view.year_input().text, "2010");
    }

    #[test]
    fn failed_load_sets_message_and_leaves_controls() {
        let mut view = view();
        let before = view.fields().to_vec();
        apply_metadata(&mut view, Err(MetadataError::Transport("refused".into())));
        assert_eq!(view.global_message, messages::METADATA_LOAD_FAILED);
        assert_eq!(view.fields(), before.as_slice());
        assert!(matches!(view.fields()[0].control(), Control::Select(_)));
    }

    #[test]
    fn incomplete_range_still_fills_select_and_other_hints() {
        let mut view = view();
        let metadata: Metadata = serde_json::from_str(
            r#"{
                "countries": ["Chile", "Peru"],
                "ranges": {"GDP": {"min": null}, "Alcohol": {"min": 0.01, "max": 17.87}}
            }"#,
        )
        .unwrap();
        apply_metadata(&mut view, Ok(metadata));
        assert!(view.global_message.is_empty());
        assert_eq!(view.country_select().value(), "Chile");
        assert_eq!(view.hint_for("gdp").unwrap().text, "Rango sugerido: 0 – NaN");
        assert_eq!(
            view.hint_for("alcohol").unwrap().text,
            "Rango sugerido: 0 – 17.9"
        );
    }
}
