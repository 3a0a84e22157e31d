//! Default form layout for the life-expectancy dataset.
//!
//! Column names match the training data verbatim, stray spaces included.

use super::{FieldKind, FieldSpec};

/// Identifier of the country drop-down.
pub const COUNTRY_SELECT_ID: &str = "countrySelect";
/// Identifier of the year input.
pub const YEAR_INPUT_ID: &str = "yearInput";

const NUMERIC_COLUMNS: &[(&str, &str, &str)] = &[
    ("adultMortality", "Adult Mortality", "Mortalidad adulta"),
    ("infantDeaths", "infant deaths", "Muertes infantiles"),
    ("alcohol", "Alcohol", "Alcohol"),
    ("percentageExpenditure", "percentage expenditure", "Gasto porcentual"),
    ("hepatitisB", "Hepatitis B", "Hepatitis B"),
    ("measles", "Measles ", "Sarampión"),
    ("bmi", " BMI ", "IMC"),
    ("underFiveDeaths", "under-five deaths ", "Muertes menores de cinco"),
    ("polio", "Polio", "Polio"),
    ("totalExpenditure", "Total expenditure", "Gasto total"),
    ("diphtheria", "Diphtheria ", "Difteria"),
    ("hivAids", " HIV/AIDS", "VIH/SIDA"),
    ("gdp", "GDP", "PIB"),
    ("population", "Population", "Población"),
    ("thinness1to19", " thinness  1-19 years", "Delgadez 1-19 años"),
    ("thinness5to9", " thinness 5-9 years", "Delgadez 5-9 años"),
    ("incomeComposition", "Income composition of resources", "Composición de ingresos"),
    ("schooling", "Schooling", "Escolaridad"),
];

pub(crate) fn default_fields() -> Vec<FieldSpec> {
    let mut fields = vec![
        FieldSpec {
            id: COUNTRY_SELECT_ID.to_string(),
            column: "Country".to_string(),
            label: "País".to_string(),
            kind: FieldKind::Select,
            hint: false,
            initial: String::new(),
        },
        FieldSpec {
            id: YEAR_INPUT_ID.to_string(),
            column: "Year".to_string(),
            label: "Año".to_string(),
            kind: FieldKind::Number,
            hint: true,
            initial: "2025".to_string(),
        },
    ];
    fields.extend(NUMERIC_COLUMNS.iter().map(|(id, column, label)| FieldSpec {
        id: (*id).to_string(),
        column: (*column).to_string(),
        label: (*label).to_string(),
        kind: FieldKind::Number,
        hint: true,
        initial: String::new(),
    }));
    fields
}
