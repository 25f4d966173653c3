/**
 * ProjectHub Desktop App - Main Entry Point
 *
 * Implements eframe::App: polls pending async results, re-runs the session
 * guard, and renders the current view.
 */
use eframe::egui;
use projecthub::egui_app::{views, AppState};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("projecthub=info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "ProjectHub",
        options,
        Box::new(|_cc| Ok(Box::new(ProjectHubApp::default()))),
    )
}

/// Main application state
struct ProjectHubApp {
    state: AppState,
}

impl Default for ProjectHubApp {
    fn default() -> Self {
        Self {
            state: AppState::new(),
        }
    }
}

impl eframe::App for ProjectHubApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.check_pending_operations();
        self.state.run_session_guard();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);

        ctx.request_repaint();
    }
}
