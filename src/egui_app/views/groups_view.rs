use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let title = state
        .selected_project()
        .map(|p| format!("Groups · {}", p.name))
        .unwrap_or_else(|| "Groups".to_string());

    egui::Frame::default()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⬅ Projects").clicked() {
                    state.open_projects();
                    return;
                }
                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new(title).size(24.0).strong(),
                );
                if state.pending_groups.is_some() {
                    ui.spinner();
                }
            });
            ui.add_space(10.0);

            super::render_ui_error(ui, state);

            if state.groups.is_empty() && state.pending_groups.is_none() {
                ui.colored_label(colors::TEXT_SECONDARY, "No groups for this project yet.");
            }

            let current_user_id = state.current_user().map(|u| u.id);
            let is_student = !state.is_teacher();
            let groups = state.groups.clone();

            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - 90.0)
                .show(ui, |ui| {
                    for group in &groups {
                        let is_member = current_user_id
                            .map(|id| group.has_member(id))
                            .unwrap_or(false);

                        egui::Frame::default()
                            .fill(colors::CARD_BG)
                            .inner_margin(egui::Margin::same(10))
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    ui.colored_label(
                                        colors::TEXT_LIGHT,
                                        egui::RichText::new(&group.name).size(16.0).strong(),
                                    );
                                    if is_member {
                                        ui.colored_label(colors::ACCENT, "(your group)");
                                    }

                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            if ui
                                                .add(
                                                    egui::Button::new("Grades")
                                                        .fill(colors::BUTTON_SECONDARY),
                                                )
                                                .clicked()
                                            {
                                                state.selected_group_id = Some(group.id);
                                                state.open_evaluations();
                                            }
                                            if ui
                                                .add(
                                                    egui::Button::new("Deliverables")
                                                        .fill(colors::BUTTON_SECONDARY),
                                                )
                                                .clicked()
                                            {
                                                state.open_group(group.id);
                                            }
                                            if is_student {
                                                if is_member {
                                                    if ui.button("Leave").clicked() {
                                                        state.handle_leave_group(group.id);
                                                    }
                                                } else if ui.button("Join").clicked() {
                                                    state.handle_join_group(group.id);
                                                }
                                            }
                                        },
                                    );
                                });

                                let members = group
                                    .members
                                    .iter()
                                    .map(|m| m.name.as_str())
                                    .collect::<Vec<_>>()
                                    .join(", ");
                                ui.colored_label(
                                    colors::TEXT_SECONDARY,
                                    if members.is_empty() {
                                        "No members yet".to_string()
                                    } else {
                                        format!("Members: {}", members)
                                    },
                                );
                            });
                        ui.add_space(8.0);
                    }
                });

            ui.add_space(10.0);
            ui.separator();
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_SECONDARY, "New group:");
                ui.add_sized(
                    [220.0, 26.0],
                    egui::TextEdit::singleline(&mut state.group_name_input),
                );
                let create_btn =
                    egui::Button::new(egui::RichText::new("Create").color(colors::TEXT_LIGHT))
                        .fill(colors::BUTTON_PRIMARY);
                if ui.add(create_btn).clicked() {
                    state.handle_create_group();
                }
                if state.pending_create_group.is_some() || state.pending_group_membership.is_some()
                {
                    ui.spinner();
                }
            });
        });
}
