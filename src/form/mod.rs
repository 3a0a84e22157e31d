//! Form controller: binds the form, fills it from metadata, collects the
//! feature payload and renders prediction results.

mod features;
pub mod format;
mod metadata;
pub mod messages;
mod submit;
mod view;

pub use features::collect_features;
pub use metadata::{
    YEAR_DEFAULT, YEAR_MAX, YEAR_MIN, apply_metadata, fill_country_select, fill_hints,
    load_metadata,
};
pub use submit::{
    SubmitOutcome, SubmitStart, apply_prediction, begin_submit, handle_submit, reset_form,
};
pub use view::{
    BindError, Control, FieldBinding, FormView, HintBinding, NumberInput, ResultPanel,
    SelectControl, SelectOption,
};
