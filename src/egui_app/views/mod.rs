use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::egui_app::types::AppView;

pub mod auth_view;
pub mod deliverables_view;
pub mod evaluations_view;
pub mod groups_view;
pub mod home_view;
pub mod projects_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    let frame_style = egui::Frame::default()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8));

    egui::TopBottomPanel::top("top_panel")
        .frame(frame_style)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new("🎓 ProjectHub").size(18.0).strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);

                    if state.auth_state.user.is_some() {
                        if ui.button("Logout").clicked() {
                            state.logout();
                        }
                        if let Some(ref user) = state.auth_state.user {
                            ui.colored_label(colors::TEXT_SECONDARY, user.role.label());
                            ui.colored_label(colors::TEXT_LIGHT, &user.name);
                        }
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let frame = egui::Frame::default()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(0));

    egui::CentralPanel::default()
        .frame(frame)
        .show(ctx, |ui| match state.current_view {
            AppView::Auth => auth_view::render(ui, state),
            AppView::Home => home_view::render(ui, state),
            AppView::Projects => projects_view::render(ui, state),
            AppView::Groups => groups_view::render(ui, state),
            AppView::Deliverables => deliverables_view::render(ui, state),
            AppView::Evaluations => evaluations_view::render(ui, state),
        });
}

/// Inline error line shown near the current view's actions
pub(crate) fn render_ui_error(ui: &mut egui::Ui, state: &AppState) {
    if let Some(ref error) = state.ui_error {
        ui.colored_label(colors::ERROR, error);
        ui.add_space(6.0);
    }
}
