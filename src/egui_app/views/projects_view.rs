use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::egui_app::types::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    egui::Frame::default()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⬅ Home").clicked() {
                    state.current_view = AppView::Home;
                }
                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new("Projects").size(24.0).strong(),
                );
                if state.pending_projects.is_some() {
                    ui.spinner();
                }
            });
            ui.add_space(10.0);

            super::render_ui_error(ui, state);

            if state.projects.is_empty() && state.pending_projects.is_none() {
                ui.colored_label(colors::TEXT_SECONDARY, "No projects yet.");
            }

            let projects = state.projects.clone();
            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - if state.is_teacher() { 180.0 } else { 10.0 })
                .show(ui, |ui| {
                    for project in &projects {
                        egui::Frame::default()
                            .fill(colors::CARD_BG)
                            .inner_margin(egui::Margin::same(10))
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    ui.colored_label(
                                        colors::TEXT_LIGHT,
                                        egui::RichText::new(&project.name).size(17.0).strong(),
                                    );
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            if ui
                                                .add(
                                                    egui::Button::new("Groups")
                                                        .fill(colors::BUTTON_SECONDARY),
                                                )
                                                .clicked()
                                            {
                                                state.open_project(project.id);
                                            }
                                        },
                                    );
                                });
                                if let Some(ref description) = project.description {
                                    ui.colored_label(colors::TEXT_SECONDARY, description);
                                }
                                if let Some(deadline) = project.deadline {
                                    ui.colored_label(
                                        colors::TEXT_SECONDARY,
                                        format!("Deadline: {}", deadline.format("%Y-%m-%d %H:%M")),
                                    );
                                }
                            });
                        ui.add_space(8.0);
                    }
                });

            // Teachers create projects; students only browse
            if state.is_teacher() {
                ui.add_space(10.0);
                ui.separator();
                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new("New project").size(17.0),
                );
                ui.add_space(6.0);

                ui.horizontal(|ui| {
                    ui.colored_label(colors::TEXT_SECONDARY, "Name:");
                    ui.add_sized(
                        [240.0, 26.0],
                        egui::TextEdit::singleline(&mut state.project_name_input),
                    );
                    ui.colored_label(colors::TEXT_SECONDARY, "Description:");
                    ui.add_sized(
                        [300.0, 26.0],
                        egui::TextEdit::singleline(&mut state.project_description_input),
                    );
                });
                ui.add_space(6.0);

                let promotions = state.promotions.clone();
                ui.horizontal(|ui| {
                    let selected_text = state
                        .project_promotion_choice
                        .and_then(|id| promotions.iter().find(|p| p.id == id))
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| "No promotion".to_string());
                    egui::ComboBox::from_label("Promotion")
                        .selected_text(selected_text)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut state.project_promotion_choice,
                                None,
                                "No promotion",
                            );
                            for promotion in &promotions {
                                ui.selectable_value(
                                    &mut state.project_promotion_choice,
                                    Some(promotion.id),
                                    &promotion.name,
                                );
                            }
                        });

                    ui.add_space(10.0);
                    let create_btn = egui::Button::new(
                        egui::RichText::new("Create").color(colors::TEXT_LIGHT),
                    )
                    .fill(colors::BUTTON_PRIMARY);
                    if ui.add(create_btn).clicked() {
                        state.handle_create_project();
                    }
                    if state.pending_create_project.is_some() {
                        ui.spinner();
                    }
                });
            }
        });
}
