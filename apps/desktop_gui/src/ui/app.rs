use std::time::Duration;

use client_core::{ClientSettings, FetchTicket, ReviewSession};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::ReviewType;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::{self, SearchForm},
};

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub settings: ClientSettings,
    pub college_id: String,
    pub review_type: ReviewType,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: ReviewSession,
    form: SearchForm,
    status: String,
    backend_error: Option<UiError>,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: &StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            session: ReviewSession::new(startup.settings.empty_page_policy),
            form: SearchForm {
                college_id: startup.college_id.clone(),
                review_type: startup.review_type,
            },
            status: "Starting".to_string(),
            backend_error: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::PageFetched { ticket, outcome } => {
                    if let Some(status) =
                        reducer::apply_page_fetched(&mut self.session, &ticket, outcome)
                    {
                        self.status = status;
                    }
                }
                UiEvent::Error(err) => {
                    tracing::warn!(
                        context = ?err.context(),
                        category = ?err.category(),
                        "{}",
                        err.message()
                    );
                    self.status = err.message().to_string();
                    self.backend_error = Some(err);
                }
            }
        }
    }

    fn submit_search(&mut self) {
        match reducer::start_search(&mut self.session, &self.form) {
            Ok(ticket) => self.dispatch_fetch(ticket),
            Err(err) => self.status = err.to_string(),
        }
    }

    fn load_more(&mut self) {
        match self.session.load_more() {
            Ok(ticket) => self.dispatch_fetch(ticket),
            Err(err) => tracing::debug!(%err, "load more refused"),
        }
    }

    fn dispatch_fetch(&mut self, ticket: FetchTicket) {
        self.status = format!("Loading page {}...", ticket.page);
        if let Err(reason) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::FetchPage(ticket.clone()))
        {
            reducer::abandon_ticket(&mut self.session, &ticket, reason.clone());
            self.status = reason.clone();
            self.backend_error = Some(UiError::from_message(UiErrorContext::Search, reason));
        }
    }

    fn show_search_form(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("College ID");
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.form.college_id)
                    .hint_text("e.g. 12345")
                    .desired_width(160.0),
            );

            egui::ComboBox::from_id_salt("review_type")
                .selected_text(self.form.review_type.label())
                .show_ui(ui, |ui| {
                    for review_type in ReviewType::ALL {
                        ui.selectable_value(
                            &mut self.form.review_type,
                            review_type,
                            review_type.label(),
                        );
                    }
                });

            let enabled = reducer::can_submit(&self.form, &self.session);
            let clicked = ui
                .add_enabled(enabled, egui::Button::new("Get Reviews"))
                .clicked();
            let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if clicked || (entered && enabled) {
                self.submit_search();
            }
        });
    }

    fn show_error_banners(&mut self, ui: &mut egui::Ui) {
        if let Some(message) = self.session.status().error_message() {
            error_frame().show(ui, |ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
            });
            ui.add_space(6.0);
        }

        if let Some(err) = self.backend_error.clone() {
            error_frame().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(err.message()).color(egui::Color32::WHITE));
                    if err.context() != UiErrorContext::BackendStartup {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.backend_error = None;
                            }
                        });
                    }
                });
            });
            ui.add_space(6.0);
        }
    }

    fn show_results(&mut self, ui: &mut egui::Ui) {
        if self.session.status().is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading reviews...");
            });
        }

        let mut load_more_clicked = false;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (index, review) in self.session.reviews().iter().enumerate() {
                    ui.label(format!("{}. {review}", index + 1));
                    ui.add_space(4.0);
                }

                if reducer::show_load_more(&self.session) {
                    ui.add_space(8.0);
                    load_more_clicked = ui
                        .add_enabled(self.session.can_load_more(), egui::Button::new("Load More"))
                        .clicked();
                }
            });

        if load_more_clicked {
            self.load_more();
        }
    }
}

fn error_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(111, 53, 53))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(egui::RichText::new(&self.status).small());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("College Reviews");
            ui.add_space(8.0);
            self.show_search_form(ui);
            ui.add_space(8.0);
            self.show_error_banners(ui);
            self.show_results(ui);
        });

        if self.session.status().is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{EmptyPagePolicy, RequestStatus};
    use crossbeam_channel::bounded;
    use shared::error::FetchError;

    fn app_with_channels() -> (DesktopGuiApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let startup = StartupConfig {
            college_id: "12345".to_string(),
            review_type: ReviewType::Placements,
            ..StartupConfig::default()
        };
        (DesktopGuiApp::new(cmd_tx, ui_rx, &startup), cmd_rx, ui_tx)
    }

    fn next_ticket(cmd_rx: &Receiver<BackendCommand>) -> FetchTicket {
        match cmd_rx.try_recv().expect("queued command") {
            BackendCommand::FetchPage(ticket) => ticket,
        }
    }

    #[test]
    fn search_queues_first_page_and_results_append() {
        let (mut app, cmd_rx, ui_tx) = app_with_channels();
        app.submit_search();
        let ticket = next_ticket(&cmd_rx);
        assert_eq!(ticket.page, 1);
        assert_eq!(ticket.params.review_type, ReviewType::Placements);
        assert!(app.session.status().is_loading());

        ui_tx
            .send(UiEvent::PageFetched {
                ticket,
                outcome: Ok(vec!["Great placements".into(), "Average infra".into()]),
            })
            .expect("send");
        app.process_ui_events();
        assert_eq!(app.session.reviews().len(), 2);
        assert_eq!(app.status, "Loaded 2 review(s) from page 1");

        app.load_more();
        assert_eq!(next_ticket(&cmd_rx).page, 2);
    }

    #[test]
    fn failed_page_shows_message_and_keeps_results_empty() {
        let (mut app, cmd_rx, ui_tx) = app_with_channels();
        app.submit_search();
        let ticket = next_ticket(&cmd_rx);
        ui_tx
            .send(UiEvent::PageFetched {
                ticket,
                outcome: Err(FetchError::backend(404, Some("Unknown college 12345".into()))),
            })
            .expect("send");
        app.process_ui_events();
        assert_eq!(
            app.session.status(),
            &RequestStatus::Error("Unknown college 12345".to_string())
        );
        assert!(app.session.reviews().is_empty());
    }

    #[test]
    fn dead_worker_does_not_leave_search_loading() {
        let (mut app, cmd_rx, _ui_tx) = app_with_channels();
        drop(cmd_rx);
        app.submit_search();
        assert_eq!(
            app.session.status(),
            &RequestStatus::Error("Failed to fetch".to_string())
        );
        let err = app.backend_error.as_ref().expect("banner");
        assert_eq!(err.context(), UiErrorContext::Search);
    }

    #[test]
    fn blank_id_is_reported_without_queueing() {
        let (mut app, cmd_rx, _ui_tx) = app_with_channels();
        app.form.college_id = "  ".to_string();
        app.submit_search();
        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(app.status, "college id must not be empty");
    }

    #[test]
    fn session_uses_configured_empty_page_policy() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let (_ui_tx, ui_rx) = bounded(1);
        let mut startup = StartupConfig::default();
        startup.settings.empty_page_policy = EmptyPagePolicy::EndOfResults;
        let app = DesktopGuiApp::new(cmd_tx, ui_rx, &startup);
        assert_eq!(app.session.policy(), EmptyPagePolicy::EndOfResults);
    }
}
