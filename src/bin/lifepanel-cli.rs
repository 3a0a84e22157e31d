//! Headless client: load metadata, fill the form from arguments, predict.

use lifepanel::config::{self, PanelSettings};
use lifepanel::form::{self, FormView, SubmitOutcome};
use lifepanel::logging::{self, ConsoleStream};
use lifepanel::prediction_api::PredictionClient;

#[derive(Debug, Default, PartialEq)]
struct Options {
    api_base: Option<String>,
    country: Option<String>,
    values: Vec<(String, String)>,
    metadata_only: bool,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the panel would show an error to the user.
fn run() -> Result<bool, String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(true);
    };
    if let Err(err) = logging::init_with(ConsoleStream::Stderr) {
        eprintln!("Logging disabled: {err}");
    }

    let mut settings = config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!("Using default settings: {err}");
        PanelSettings::default()
    });
    if let Some(api_base) = options.api_base.clone() {
        settings.api.base_url = api_base;
    }
    let client = PredictionClient::new(&settings.api).map_err(|err| err.to_string())?;
    let mut view = FormView::bind(&settings.form).map_err(|err| err.to_string())?;

    form::load_metadata(&mut view, &client);
    if !view.global_message.is_empty() {
        println!("{}", view.global_message);
        return Ok(false);
    }
    if options.metadata_only {
        print_metadata(&view);
        return Ok(true);
    }

    apply_options(&mut view, &options)?;
    let outcome = form::handle_submit(&mut view, &client);
    println!("Regresión lineal: {}", view.results.regression);
    println!("KNN: {}", view.results.knn);
    println!("MLP: {}", view.results.mlp);
    if !view.global_message.is_empty() {
        println!("{}", view.global_message);
    }
    Ok(outcome == SubmitOutcome::Rendered)
}

fn apply_options(view: &mut FormView, options: &Options) -> Result<(), String> {
    if let Some(country) = &options.country
        && !view.country_select_mut().select_value(country)
    {
        return Err(format!("Unknown country: {country}"));
    }
    for (key, value) in &options.values {
        let id = match view.field(key) {
            Some(field) => field.id.clone(),
            None => view
                .field_id_for_column(key)
                .map(str::to_string)
                .ok_or_else(|| format!("No field with id or column {key:?}"))?,
        };
        let input = view
            .number_input_mut(&id)
            .ok_or_else(|| format!("Field {id:?} is not a numeric input"))?;
        input.text = value.clone();
    }
    Ok(())
}

fn print_metadata(view: &FormView) {
    let countries: Vec<&str> = view
        .country_select()
        .options()
        .iter()
        .map(|option| option.value.as_str())
        .collect();
    println!("Países ({}): {}", countries.len(), countries.join(", "));
    for hint in view.hints() {
        println!("{}: {}", hint.column.trim(), hint.text);
    }
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--api" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--api requires a value".to_string())?;
                options.api_base = Some(value.to_string());
            }
            "--country" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--country requires a value".to_string())?;
                options.country = Some(value.to_string());
            }
            "--set" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--set requires a value".to_string())?;
                let (key, text) = value
                    .split_once('=')
                    .ok_or_else(|| format!("--set expects FIELD=VALUE, got {value:?}"))?;
                options.values.push((key.to_string(), text.to_string()));
            }
            "--metadata" => {
                options.metadata_only = true;
            }
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }
    Ok(Some(options))
}

fn help_text() -> &'static str {
    "Usage: lifepanel-cli [--api <url>] [--metadata] [--country <name>] [--set <field>=<value>]...\n\
     \n\
     <field> is a form field id (e.g. gdp) or a dataset column (e.g. GDP)."
}
