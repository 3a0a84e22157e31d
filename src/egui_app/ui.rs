//! egui renderer for the prediction panel.

use std::time::Duration;

use eframe::egui::{self, RichText, Ui};

use crate::config::PanelSettings;
use crate::form::{Control, FormView, NumberInput};

use super::controller::{ControllerError, PanelController};
use super::style;

/// Minimum window size that keeps the form readable.
pub const MIN_VIEWPORT_SIZE: [f32; 2] = [720.0, 560.0];

const LABEL_WIDTH: f32 = 220.0;
const INPUT_WIDTH: f32 = 180.0;

/// Renders the form and results using the shared controller.
pub struct EguiApp {
    controller: PanelController,
    api_base: String,
    visuals_set: bool,
}

enum FieldRow {
    Select {
        id: String,
        label: String,
        options: Vec<String>,
        selected: Option<usize>,
    },
    Number {
        id: String,
        label: String,
    },
}

impl EguiApp {
    /// Create the app and start loading metadata.
    pub fn new(settings: &PanelSettings) -> Result<Self, ControllerError> {
        let mut controller = PanelController::from_settings(settings)?;
        controller.start_metadata_load();
        Ok(Self {
            controller,
            api_base: settings.api.base_url.clone(),
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Esperanza de vida");
                ui.separator();
                ui.label(RichText::new(format!("API: {}", self.api_base)).color(palette.text_muted));
                if self.controller.is_loading_metadata() {
                    ui.spinner();
                }
            });
        });
    }

    fn render_results(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("results").show(ctx, |ui| {
            ui.add_space(6.0);
            let results = &self.controller.view.results;
            egui::Grid::new("results_grid")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for (title, text) in [
                        ("Regresión lineal", &results.regression),
                        ("KNN", &results.knn),
                        ("MLP", &results.mlp),
                    ] {
                        ui.label(RichText::new(title).color(palette.text_muted));
                        ui.label(RichText::new(text).strong().color(palette.success));
                        ui.end_row();
                    }
                });
            let message = &self.controller.view.global_message;
            if !message.is_empty() {
                ui.add_space(4.0);
                ui.label(RichText::new(message).color(palette.warning));
            }
            ui.add_space(6.0);
        });
    }

    fn render_form(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("form_grid")
                    .num_columns(3)
                    .spacing([12.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for row in field_rows(&self.controller.view) {
                            self.render_field_row(ui, row);
                            ui.end_row();
                        }
                    });
                ui.add_space(12.0);
                self.render_actions(ui);
            });
        });
    }

    fn render_field_row(&mut self, ui: &mut Ui, row: FieldRow) {
        let palette = style::palette();
        let view = &mut self.controller.view;
        match row {
            FieldRow::Select {
                id,
                label,
                options,
                selected,
            } => {
                ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(label));
                let current = selected
                    .and_then(|index| options.get(index).cloned())
                    .unwrap_or_default();
                egui::ComboBox::from_id_salt(&id)
                    .width(INPUT_WIDTH)
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for (index, option) in options.iter().enumerate() {
                            if ui.selectable_label(selected == Some(index), option).clicked()
                                && let Some(select) = view.select_mut(&id)
                            {
                                select.select(index);
                            }
                        }
                    });
                ui.label("");
            }
            FieldRow::Number { id, label } => {
                ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(label));
                let hint = view.hint_for(&id).map(|hint| hint.text.clone());
                if let Some(input) = view.number_input_mut(&id) {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut input.text).desired_width(INPUT_WIDTH),
                    );
                    if let Some(bounds) = bounds_text(input) {
                        response.on_hover_text(bounds);
                    }
                }
                ui.label(RichText::new(hint.unwrap_or_default()).color(palette.text_muted));
            }
        }
    }

    fn render_actions(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let submitting = self.controller.is_submitting();
            if ui
                .add_enabled(!submitting, egui::Button::new("Predecir"))
                .clicked()
            {
                self.controller.submit();
            }
            if ui.button("Limpiar").clicked() {
                self.controller.reset();
            }
            if submitting {
                ui.spinner();
            }
        });
    }
}

fn field_rows(view: &FormView) -> Vec<FieldRow> {
    view.fields()
        .iter()
        .map(|field| match field.control() {
            Control::Select(select) => FieldRow::Select {
                id: field.id.clone(),
                label: field.label.clone(),
                options: select
                    .options()
                    .iter()
                    .map(|option| option.label.clone())
                    .collect(),
                selected: select.selected_index(),
            },
            Control::Number(_) => FieldRow::Number {
                id: field.id.clone(),
                label: field.label.clone(),
            },
        })
        .collect()
}

fn bounds_text(input: &NumberInput) -> Option<String> {
    match (input.min, input.max) {
        (Some(min), Some(max)) => Some(format!("Entre {min} y {max}")),
        (Some(min), None) => Some(format!("Mínimo {min}")),
        (None, Some(max)) => Some(format!("Máximo {max}")),
        (None, None) => None,
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_jobs();
        self.render_top_bar(ctx);
        self.render_results(ctx);
        self.render_form(ctx);
        if self.controller.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormLayout;
    use crate::form::fill_hints;
    use crate::prediction_api::RangeInfo;
    use std::collections::BTreeMap;

    #[test]
    fn rows_follow_layout_order() {
        let view = FormView::bind(&FormLayout::default()).unwrap();
        let rows = field_rows(&view);
        assert_eq!(rows.len(), view.fields().len());
        assert!(matches!(rows[0], FieldRow::Select { .. }));
        assert!(matches!(rows[1], FieldRow::Number { .. }));
    }

    #[test]
    fn year_bounds_are_described_after_override() {
        let mut view = FormView::bind(&FormLayout::default()).unwrap();
        assert_eq!(bounds_text(view.year_input()), None);
        let mut ranges = BTreeMap::new();
        ranges.insert("Year".to_string(), RangeInfo { min: 2000.0, max: 2015.0 });
        fill_hints(&mut view, &ranges);
        assert_eq!(
            bounds_text(view.year_input()).as_deref(),
            Some("Entre 2000 y 2030")
        );
    }
}
