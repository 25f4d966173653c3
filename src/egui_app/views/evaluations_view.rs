use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::egui_app::types::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let title = state
        .selected_group()
        .map(|g| format!("Grades · {}", g.name))
        .unwrap_or_else(|| "Grades".to_string());

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
                if state.pending_evaluations.is_some() {
                    ui.spinner();
                }
            });
            ui.add_space(10.0);

            super::render_ui_error(ui, state);

            if state.evaluations.is_empty() && state.pending_evaluations.is_none() {
                ui.colored_label(colors::TEXT_SECONDARY, "No evaluation recorded yet.");
            }

            let evaluations = state.evaluations.clone();
            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - if state.is_teacher() { 120.0 } else { 10.0 })
                .show(ui, |ui| {
                    for evaluation in &evaluations {
                        egui::Frame::default()
                            .fill(colors::CARD_BG)
                            .inner_margin(egui::Margin::same(10))
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    match evaluation.grade {
                                        Some(grade) => ui.colored_label(
                                            colors::TEXT_LIGHT,
                                            egui::RichText::new(format!("{:.1} / 20", grade))
                                                .size(18.0)
                                                .strong(),
                                        ),
                                        None => ui.colored_label(
                                            colors::TEXT_SECONDARY,
                                            "Not graded yet",
                                        ),
                                    };
                                    if let Some(defense_at) = evaluation.defense_at {
                                        ui.colored_label(
                                            colors::ACCENT,
                                            format!(
                                                "Defense {}",
                                                defense_at.format("%Y-%m-%d %H:%M")
                                            ),
                                        );
                                    }
                                });
                                if let Some(ref comment) = evaluation.comment {
                                    ui.colored_label(colors::TEXT_SECONDARY, comment);
                                }
                            });
                        ui.add_space(8.0);
                    }
                });

            // Only teachers record grades and defense slots
            if state.is_teacher() {
                ui.add_space(10.0);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.colored_label(colors::TEXT_SECONDARY, "Grade:");
                    ui.add_sized(
                        [60.0, 26.0],
                        egui::TextEdit::singleline(&mut state.grade_input),
                    );
                    ui.colored_label(colors::TEXT_SECONDARY, "Comment:");
                    ui.add_sized(
                        [220.0, 26.0],
                        egui::TextEdit::singleline(&mut state.comment_input),
                    );
                    ui.colored_label(colors::TEXT_SECONDARY, "Defense:");
                    ui.add_sized(
                        [170.0, 26.0],
                        egui::TextEdit::singleline(&mut state.defense_input)
                            .hint_text("2026-06-15T09:00:00Z"),
                    );
                    let save_btn =
                        egui::Button::new(egui::RichText::new("Save").color(colors::TEXT_LIGHT))
                            .fill(colors::BUTTON_PRIMARY);
                    if ui.add(save_btn).clicked() {
                        state.handle_save_evaluation();
                    }
                    if state.pending_save_evaluation.is_some() {
                        ui.spinner();
                    }
                });
            }
        });
}
