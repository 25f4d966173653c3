use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::egui_app::types::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let title = state
        .selected_group()
        .map(|g| format!("Deliverables · {}", g.name))
        .unwrap_or_else(|| "Deliverables".to_string());

    egui::Frame::default()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⬅ Groups").clicked() {
                    state.current_view = AppView::Groups;
                    return;
                }
                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new(title).size(24.0).strong(),
                );
                if state.pending_deliverables.is_some() {
                    ui.spinner();
                }
                if ui.button("Grades").clicked() {
                    state.open_evaluations();
                }
            });
            ui.add_space(10.0);

            super::render_ui_error(ui, state);

            if state.deliverables.is_empty() && state.pending_deliverables.is_none() {
                ui.colored_label(colors::TEXT_SECONDARY, "Nothing submitted yet.");
            }

            let deliverables = state.deliverables.clone();
            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - 90.0)
                .show(ui, |ui| {
                    for deliverable in &deliverables {
                        egui::Frame::default()
                            .fill(colors::CARD_BG)
                            .inner_margin(egui::Margin::same(10))
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    ui.colored_label(
                                        colors::TEXT_LIGHT,
                                        egui::RichText::new(&deliverable.name)
                                            .size(16.0)
                                            .strong(),
                                    );
                                    if let Some(ref status) = deliverable.status {
                                        ui.colored_label(colors::ACCENT, status);
                                    }
                                });
                                if let Some(ref url) = deliverable.url {
                                    ui.hyperlink(url);
                                }
                                if let Some(submitted_at) = deliverable.submitted_at {
                                    ui.colored_label(
                                        colors::TEXT_SECONDARY,
                                        format!(
                                            "Submitted {}",
                                            submitted_at.format("%Y-%m-%d %H:%M")
                                        ),
                                    );
                                }
                            });
                        ui.add_space(8.0);
                    }
                });

            ui.add_space(10.0);
            ui.separator();
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_SECONDARY, "Name:");
                ui.add_sized(
                    [180.0, 26.0],
                    egui::TextEdit::singleline(&mut state.deliverable_name_input),
                );
                ui.colored_label(colors::TEXT_SECONDARY, "Archive URL:");
                ui.add_sized(
                    [260.0, 26.0],
                    egui::TextEdit::singleline(&mut state.deliverable_url_input),
                );
                let submit_btn =
                    egui::Button::new(egui::RichText::new("Submit").color(colors::TEXT_LIGHT))
                        .fill(colors::BUTTON_PRIMARY);
                if ui.add(submit_btn).clicked() {
                    state.handle_submit_deliverable();
                }
                if state.pending_submit_deliverable.is_some() {
                    ui.spinner();
                }
            });
        });
}
