use std::sync::Arc;

use eframe::egui;
use tracing::info;

use crate::config::ClientConfig;
use crate::heatmap::HeatmapView;
use crate::results;
use crate::state::{Phase, ViewState};
use crate::submission::{HttpTransport, Submitter};
use crate::types::{ParamKey, PRESETS};
use crate::worker::Dispatcher;

pub struct OptimizerApp {
    state: ViewState,
    heatmap: HeatmapView,
    dispatcher: Option<Dispatcher>,
    client_error: Option<String>,
    preset: usize,
}

impl OptimizerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = ClientConfig::default();
        let (dispatcher, client_error) = match HttpTransport::new(&config) {
            Ok(transport) => {
                let submitter = Submitter::new(config.endpoint.clone(), Arc::new(transport));
                (Some(Dispatcher::new(submitter)), None)
            }
            Err(err) => (None, Some(err.to_string())),
        };

        Self {
            state: ViewState::default(),
            heatmap: HeatmapView::default(),
            dispatcher,
            client_error,
            preset: 0,
        }
    }

    fn apply_completions(&mut self) {
        let Some(dispatcher) = &self.dispatcher else {
            return;
        };

        let completions = dispatcher.drain();
        if completions.is_empty() {
            return;
        }
        for completion in completions {
            self.state.complete(completion.ticket, completion.outcome);
        }
        self.heatmap.set_samples(self.state.heatmap());
    }

    fn submit(&mut self, ctx: &egui::Context) {
        let Some(dispatcher) = &self.dispatcher else {
            return;
        };

        let (ticket, payload) = self.state.begin_submission();
        self.heatmap.set_samples(&[]);
        info!(ticket = ticket.0, endpoint = dispatcher.endpoint(), "submitting build");
        dispatcher.dispatch(ticket, payload, Some(ctx.clone()));
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Build parameters");

        egui::ComboBox::from_label("Preset")
            .selected_text(PRESETS[self.preset].name)
            .show_ui(ui, |ui| {
                for (idx, preset) in PRESETS.iter().enumerate() {
                    if ui
                        .selectable_value(&mut self.preset, idx, preset.name)
                        .clicked()
                    {
                        self.state.inputs_mut().apply_preset(preset);
                    }
                }
            });

        ui.separator();

        let mut submitted = false;
        egui::Grid::new("build-parameters")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for key in ParamKey::ALL {
                    ui.strong(key.name());
                    let mut text = self.state.inputs().params().get(key).to_owned();
                    let response =
                        ui.add(egui::TextEdit::singleline(&mut text).desired_width(110.0));
                    if response.changed() {
                        self.state.inputs_mut().set_field(key.name(), text);
                    }
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submitted = true;
                    }
                    ui.weak(key.description());
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let can_submit = self.dispatcher.is_some();
            if ui
                .add_enabled(can_submit, egui::Button::new("Calculate"))
                .clicked()
            {
                submitted = true;
            }
            if self.state.phase() == Phase::Submitting {
                ui.spinner();
            }
        });

        if submitted {
            self.submit(ui.ctx());
        }

        if let Some(err) = &self.client_error {
            ui.separator();
            ui.colored_label(
                egui::Color32::from_rgb(230, 100, 100),
                format!("HTTP client offline: {err}"),
            );
        }
    }

    fn draw_visuals(&mut self, ui: &mut egui::Ui) {
        results::draw_error(ui, self.state.error());
        results::draw_result(ui, self.state.result());
        ui.separator();
        self.heatmap.show(ui);
    }
}

impl eframe::App for OptimizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_completions();

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.draw_controls(ui);
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_visuals(ui);
        });
    }
}
