use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let frame = egui::Frame::default().fill(colors::BG_DARK);

    frame.show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);

            ui.colored_label(
                colors::TEXT_LIGHT,
                egui::RichText::new("🎓 ProjectHub").size(48.0).strong(),
            );
            ui.add_space(10.0);

            ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("Welcome!").size(28.0));
            if let Some(ref user) = state.auth_state.user {
                ui.colored_label(
                    colors::TEXT_SECONDARY,
                    egui::RichText::new(format!("{} · {}", user.name, user.role.label()))
                        .size(18.0),
                );
            }
            ui.add_space(40.0);

            let projects_btn = egui::Button::new(
                egui::RichText::new("📚 Projects")
                    .size(20.0)
                    .color(colors::TEXT_LIGHT),
            )
            .min_size(egui::vec2(220.0, 50.0))
            .fill(colors::BUTTON_PRIMARY);

            if ui.add(projects_btn).clicked() {
                state.open_projects();
            }
            ui.add_space(15.0);

            ui.colored_label(
                colors::TEXT_SECONDARY,
                if state.is_teacher() {
                    "Create projects, review submissions and schedule defenses."
                } else {
                    "Browse projects, join a group and submit deliverables."
                },
            );
        });
    });
}
