use egui::RichText;
use egui_extras::{Column, TableBuilder};
use log::{error, info};

use crate::command::Channel;
use crate::controller::DacController;
use crate::error::PanelError;
use crate::serial_port::Connection;
use crate::settings::Settings;

/// A modal error message waiting for the operator to dismiss it.
struct ErrorDialog {
    title: &'static str,
    message: String,
    fatal: bool,
}

impl From<&PanelError> for ErrorDialog {
    fn from(err: &PanelError) -> Self {
        Self {
            title: err.title(),
            message: err.to_string(),
            fatal: err.is_fatal(),
        }
    }
}

pub struct DacPanelApp {
    /// `None` once the port failed to open; only the error dialog is shown then.
    controller: Option<DacController>,
    dialog: Option<ErrorDialog>,
    closed: bool,
}

impl DacPanelApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: &Settings) -> Self {
        Self::with_connection(Connection::open(settings))
    }

    fn with_connection(connection: Result<Connection, PanelError>) -> Self {
        match connection {
            Ok(conn) => Self {
                controller: Some(DacController::new(conn)),
                dialog: None,
                closed: false,
            },
            Err(e) => {
                error!("{}", e);
                Self {
                    controller: None,
                    dialog: Some(ErrorDialog::from(&e)),
                    closed: false,
                }
            }
        }
    }

    fn send(&mut self, channel: Channel) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if let Err(e) = controller.send(channel) {
            self.dialog = Some(ErrorDialog::from(&e));
        }
    }

    /// Releases the port. Runs on every close path, including after a failed open.
    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(controller) = self.controller.as_mut() {
            controller.close();
        }
        info!("Window closed");
    }

    // --- UI rendering ---

    /// Returns the channel whose Confirm button was pressed this frame.
    fn render_channels(controller: &mut DacController, ui: &mut egui::Ui) -> Option<Channel> {
        let mut pressed = None;

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(80.0))
            .column(Column::exact(130.0))
            .column(Column::exact(90.0))
            .header(22.0, |mut header| {
                for title in ["Channel", "Voltage (V)", "Confirm"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for channel in Channel::all() {
                    body.row(26.0, |mut row| {
                        row.col(|ui| {
                            ui.label(channel.to_string());
                        });
                        row.col(|ui| {
                            ui.add(
                                egui::TextEdit::singleline(controller.entry_mut(channel))
                                    .desired_width(110.0),
                            );
                        });
                        row.col(|ui| {
                            if ui.button("Confirm").clicked() {
                                pressed = Some(channel);
                            }
                        });
                    });
                }
            });

        pressed
    }

    fn render_status_bar(&self, ui: &mut egui::Ui) {
        if let Some(controller) = &self.controller {
            ui.label(controller.status());
        }
    }

    /// Returns true when the operator dismissed the dialog.
    fn render_dialog(dialog: &ErrorDialog, ctx: &egui::Context) -> bool {
        let mut dismissed = false;
        egui::Window::new(RichText::new(dialog.title).strong())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&dialog.message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.add_sized([80.0, 24.0], egui::Button::new("OK")).clicked() {
                        dismissed = true;
                    }
                });
            });
        dismissed
    }
}

impl eframe::App for DacPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown();
            return;
        }

        if let Some(dialog) = &self.dialog {
            if Self::render_dialog(dialog, ctx) {
                let fatal = dialog.fatal;
                self.dialog = None;
                if fatal {
                    self.shutdown();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }

        let modal = self.dialog.is_some();

        egui::TopBottomPanel::bottom("status_bar")
            .min_height(22.0)
            .show(ctx, |ui| {
                self.render_status_bar(ui);
            });

        let mut pressed = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(controller) = self.controller.as_mut() {
                ui.add_enabled_ui(!modal, |ui| {
                    pressed = Self::render_channels(controller, ui);
                });
            }
        });

        if let Some(channel) = pressed {
            self.send(channel);
        }
    }
}
