//! View binding: the form controls the controller reads and renders into.
//!
//! A [`FormView`] is built once from a [`FormLayout`]; every controller
//! operation then works on the binding instead of looking controls up.

use std::collections::HashSet;

use crate::config::{COUNTRY_SELECT_ID, FieldKind, FormLayout, YEAR_INPUT_ID};

use super::messages;

/// Errors raised while binding a layout.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BindError {
    #[error("Form layout has no control with id {0:?}")]
    MissingControl(&'static str),
    #[error("Control {id:?} must be a {expected} control")]
    WrongKind { id: String, expected: &'static str },
    #[error("Control id {0:?} is used more than once")]
    DuplicateId(String),
}

/// One option of a select control; value and label are kept separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Drop-down control.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectControl {
    options: Vec<SelectOption>,
    selected: Option<usize>,
}

impl SelectControl {
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Value of the selected option, or `""` when there are no options.
    pub fn value(&self) -> &str {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(|option| option.value.as_str())
            .unwrap_or("")
    }

    /// Replace all options; the first one becomes selected.
    pub fn replace_options(&mut self, options: Vec<SelectOption>) {
        self.selected = if options.is_empty() { None } else { Some(0) };
        self.options = options;
    }

    /// Select by index; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.options.len() {
            self.selected = Some(index);
        }
    }

    /// Select the first option whose value equals `value`.
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|option| option.value == value) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    fn reset(&mut self) {
        self.selected = if self.options.is_empty() { None } else { Some(0) };
    }
}

/// Free-text numeric input with optional bounds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberInput {
    pub text: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    Select(SelectControl),
    Number(NumberInput),
}

/// A control bound to a payload column.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldBinding {
    pub id: String,
    pub column: String,
    pub label: String,
    control: Control,
    initial: String,
}

impl FieldBinding {
    pub fn control(&self) -> &Control {
        &self.control
    }

    /// Restore the value the form started with. Bounds are left alone.
    fn reset(&mut self) {
        match &mut self.control {
            Control::Select(select) => select.reset(),
            Control::Number(input) => input.text = self.initial.clone(),
        }
    }
}

/// Suggested-range text shown under a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HintBinding {
    pub field_id: String,
    pub column: String,
    pub text: String,
}

/// The three model result labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultPanel {
    pub regression: String,
    pub knn: String,
    pub mlp: String,
}

impl ResultPanel {
    pub fn placeholder() -> Self {
        Self::uniform(messages::NO_RESULT_YET)
    }

    /// All three labels showing the same text.
    pub fn uniform(text: &str) -> Self {
        Self {
            regression: text.to_string(),
            knn: text.to_string(),
            mlp: text.to_string(),
        }
    }
}

/// Bound form state.
#[derive(Clone, Debug, PartialEq)]
pub struct FormView {
    fields: Vec<FieldBinding>,
    hints: Vec<HintBinding>,
    country_select: usize,
    year_input: usize,
    pub results: ResultPanel,
    pub global_message: String,
}

impl FormView {
    /// Bind a layout, locating the country select and the year input.
    pub fn bind(layout: &FormLayout) -> Result<Self, BindError> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(layout.fields.len());
        let mut hints = Vec::new();
        for spec in &layout.fields {
            if !seen.insert(spec.id.as_str()) {
                return Err(BindError::DuplicateId(spec.id.clone()));
            }
            let control = match spec.kind {
                FieldKind::Select => Control::Select(SelectControl::default()),
                FieldKind::Number => Control::Number(NumberInput {
                    text: spec.initial.clone(),
                    ..NumberInput::default()
                }),
            };
            if spec.hint {
                hints.push(HintBinding {
                    field_id: spec.id.clone(),
                    column: spec.column.clone(),
                    text: messages::HINT_PLACEHOLDER.to_string(),
                });
            }
            fields.push(FieldBinding {
                id: spec.id.clone(),
                column: spec.column.clone(),
                label: spec.label.clone(),
                control,
                initial: spec.initial.clone(),
            });
        }

        let country_select = locate(&fields, COUNTRY_SELECT_ID, FieldKind::Select)?;
        let year_input = locate(&fields, YEAR_INPUT_ID, FieldKind::Number)?;
        Ok(Self {
            fields,
            hints,
            country_select,
            year_input,
            results: ResultPanel::placeholder(),
            global_message: String::new(),
        })
    }

    pub fn fields(&self) -> &[FieldBinding] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FieldBinding> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Numeric input with the given id.
    pub fn number_input_mut(&mut self, id: &str) -> Option<&mut NumberInput> {
        match &mut self.fields.iter_mut().find(|field| field.id == id)?.control {
            Control::Number(input) => Some(input),
            Control::Select(_) => None,
        }
    }

    /// Select control with the given id.
    pub fn select_mut(&mut self, id: &str) -> Option<&mut SelectControl> {
        match &mut self.fields.iter_mut().find(|field| field.id == id)?.control {
            Control::Select(select) => Some(select),
            Control::Number(_) => None,
        }
    }

    /// Id of the first control bound to `column`.
    pub fn field_id_for_column(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.column == column)
            .map(|field| field.id.as_str())
    }

    pub fn hints(&self) -> &[HintBinding] {
        &self.hints
    }

    pub fn hints_mut(&mut self) -> &mut [HintBinding] {
        &mut self.hints
    }

    pub fn hint_for(&self, field_id: &str) -> Option<&HintBinding> {
        self.hints.iter().find(|hint| hint.field_id == field_id)
    }

    pub fn country_select(&self) -> &SelectControl {
        match &self.fields[self.country_select].control {
            Control::Select(select) => select,
            Control::Number(_) => unreachable!("country control checked at bind time"),
        }
    }

    pub fn country_select_mut(&mut self) -> &mut SelectControl {
        match &mut self.fields[self.country_select].control {
            Control::Select(select) => select,
            Control::Number(_) => unreachable!("country control checked at bind time"),
        }
    }

    pub fn year_input(&self) -> &NumberInput {
        match &self.fields[self.year_input].control {
            Control::Number(input) => input,
            Control::Select(_) => unreachable!("year control checked at bind time"),
        }
    }

    pub fn year_input_mut(&mut self) -> &mut NumberInput {
        match &mut self.fields[self.year_input].control {
            Control::Number(input) => input,
            Control::Select(_) => unreachable!("year control checked at bind time"),
        }
    }

    /// Native form reset: every control back to its initial value.
    pub(crate) fn reset_controls(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
    }
}

fn locate(fields: &[FieldBinding], id: &'static str, kind: FieldKind) -> Result<usize, BindError> {
    let index = fields
        .iter()
        .position(|field| field.id == id)
        .ok_or(BindError::MissingControl(id))?;
    let matches = matches!(
        (&fields[index].control, kind),
        (Control::Select(_), FieldKind::Select) | (Control::Number(_), FieldKind::Number)
    );
    if !matches {
        return Err(BindError::WrongKind {
            id: id.to_string(),
            expected: match kind {
                FieldKind::Select => "select",
                FieldKind::Number => "number",
            },
        });
    }
    Ok(index)
}
