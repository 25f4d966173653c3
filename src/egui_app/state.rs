//! Application State
//!
//! Central state for the desktop app: the session store and guard, cached
//! backend data, form inputs, and the pending async operations.
//!
//! Network calls run on worker threads and report back over mpsc channels;
//! [`AppState::check_pending_operations`] polls them once per frame. A
//! receiver is replaced when the same operation is started again, so a
//! late result for a stale request is dropped instead of overwriting newer
//! state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Utc};

use crate::egui_app::api::ApiClient;
use crate::egui_app::config::Config;
use crate::egui_app::guard::{GuardState, SessionGuard};
use crate::egui_app::session::{Session, SessionStore};
use crate::egui_app::types::{
    AppView, AuthResponse, DeliverableDraft, EvaluationDraft, GroupDraft, ProjectDraft,
};
use crate::shared::error::ApiError;
use crate::shared::models::{Deliverable, Evaluation, Group, Project, Promotion, Role, UserSummary};

/// Pending API operation result types
pub type LoginResult = Result<AuthResponse, ApiError>;
pub type RegisterResult = Result<UserSummary, ApiError>;
pub type ProjectsResult = Result<Vec<Project>, ApiError>;
pub type ProjectResult = Result<Project, ApiError>;
pub type GroupsResult = Result<Vec<Group>, ApiError>;
pub type GroupResult = Result<Group, ApiError>;
pub type PromotionsResult = Result<Vec<Promotion>, ApiError>;
pub type DeliverablesResult = Result<Vec<Deliverable>, ApiError>;
pub type DeliverableResult = Result<Deliverable, ApiError>;
pub type EvaluationsResult = Result<Vec<Evaluation>, ApiError>;
pub type EvaluationResult = Result<Evaluation, ApiError>;

/// Authentication UI state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<UserSummary>,
    pub error: Option<String>,
    pub loading: bool,
}

impl AuthState {
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }
}

/// The main state for the app
pub struct AppState {
    pub config: Config,
    pub store: Arc<SessionStore>,
    guard: SessionGuard,
    /// Set by the store subscription whenever the session changes
    session_dirty: Arc<AtomicBool>,

    /// Current view
    pub current_view: AppView,
    /// Authentication state
    pub auth_state: AuthState,

    /// Auth form inputs
    pub email_input: String,
    pub name_input: String,
    pub password_input: String,
    pub confirm_password_input: String,
    pub register_role: Role,
    pub is_register_mode: bool,
    /// Success notice shown on the login form after registration
    pub register_notice: Option<String>,

    /// Cached backend data
    pub projects: Vec<Project>,
    pub promotions: Vec<Promotion>,
    pub groups: Vec<Group>,
    pub deliverables: Vec<Deliverable>,
    pub evaluations: Vec<Evaluation>,

    /// Navigation selection
    pub selected_project_id: Option<i64>,
    pub selected_group_id: Option<i64>,

    /// Form inputs for the data views
    pub project_name_input: String,
    pub project_description_input: String,
    pub project_promotion_choice: Option<i64>,
    pub group_name_input: String,
    pub deliverable_name_input: String,
    pub deliverable_url_input: String,
    pub grade_input: String,
    pub comment_input: String,
    pub defense_input: String,

    /// Transient UI error to show near the current view's actions
    pub ui_error: Option<String>,

    /// Pending async operation receivers
    pub pending_login: Option<Receiver<LoginResult>>,
    pub pending_register: Option<Receiver<RegisterResult>>,
    pub pending_projects: Option<Receiver<ProjectsResult>>,
    pub pending_create_project: Option<Receiver<ProjectResult>>,
    pub pending_promotions: Option<Receiver<PromotionsResult>>,
    pub pending_groups: Option<Receiver<GroupsResult>>,
    pub pending_create_group: Option<Receiver<GroupResult>>,
    pub pending_group_membership: Option<Receiver<GroupResult>>,
    pub pending_deliverables: Option<Receiver<DeliverablesResult>>,
    pub pending_submit_deliverable: Option<Receiver<DeliverableResult>>,
    pub pending_evaluations: Option<Receiver<EvaluationsResult>>,
    pub pending_save_evaluation: Option<Receiver<EvaluationResult>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_store(Config::default(), Arc::new(SessionStore::open_default()))
    }

    /// Build the state over an explicit store (tests inject a temp store)
    pub fn with_store(config: Config, store: Arc<SessionStore>) -> Self {
        let session_dirty = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&session_dirty);
        store.subscribe(move || {
            flag.store(true, Ordering::SeqCst);
        });

        let mut state = Self {
            config,
            store,
            guard: SessionGuard::new(),
            session_dirty,
            current_view: AppView::Auth,
            auth_state: AuthState::default(),
            email_input: String::new(),
            name_input: String::new(),
            password_input: String::new(),
            confirm_password_input: String::new(),
            register_role: Role::Student,
            is_register_mode: false,
            register_notice: None,
            projects: Vec::new(),
            promotions: Vec::new(),
            groups: Vec::new(),
            deliverables: Vec::new(),
            evaluations: Vec::new(),
            selected_project_id: None,
            selected_group_id: None,
            project_name_input: String::new(),
            project_description_input: String::new(),
            project_promotion_choice: None,
            group_name_input: String::new(),
            deliverable_name_input: String::new(),
            deliverable_url_input: String::new(),
            grade_input: String::new(),
            comment_input: String::new(),
            defense_input: String::new(),
            ui_error: None,
            pending_login: None,
            pending_register: None,
            pending_projects: None,
            pending_create_project: None,
            pending_promotions: None,
            pending_groups: None,
            pending_create_group: None,
            pending_group_membership: None,
            pending_deliverables: None,
            pending_submit_deliverable: None,
            pending_evaluations: None,
            pending_save_evaluation: None,
        };

        // Restore a persisted session from a previous launch
        if state.store.is_authenticated() {
            state.auth_state.user = state.store.get_user();
            state.current_view = AppView::Home;
        }

        state
    }

    pub fn current_user(&self) -> Option<&UserSummary> {
        self.auth_state.user.as_ref()
    }

    pub fn is_teacher(&self) -> bool {
        self.current_user().map(|u| u.role.is_teacher()).unwrap_or(false)
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected_project_id
            .and_then(|id| self.projects.iter().find(|p| p.id == id))
    }

    pub fn selected_group(&self) -> Option<&Group> {
        self.selected_group_id
            .and_then(|id| self.groups.iter().find(|g| g.id == id))
    }

    fn api_client(&self) -> ApiClient {
        ApiClient::new(self.config.clone(), Arc::clone(&self.store))
    }

    // --- session guard integration ---

    /// Re-run the session guard for protected views. Called every frame.
    pub fn run_session_guard(&mut self) {
        if self.current_view == AppView::Auth {
            return;
        }
        if self.session_dirty.swap(false, Ordering::SeqCst) {
            self.guard.invalidate();
        }
        if self.guard.evaluate(&self.store) == GuardState::Redirecting {
            self.redirect_to_login();
        }
    }

    fn redirect_to_login(&mut self) {
        tracing::info!("session check failed, routing to login");
        self.current_view = AppView::Auth;
        self.auth_state = AuthState::default();
        self.clear_cached_data();
        self.guard.invalidate();
        self.session_dirty.store(false, Ordering::SeqCst);
    }

    fn clear_cached_data(&mut self) {
        self.projects.clear();
        self.promotions.clear();
        self.groups.clear();
        self.deliverables.clear();
        self.evaluations.clear();
        self.selected_project_id = None;
        self.selected_group_id = None;
        self.ui_error = None;
    }

    // --- auth ---

    pub fn toggle_auth_mode(&mut self) {
        self.is_register_mode = !self.is_register_mode;
        self.auth_state.clear_error();
        self.register_notice = None;
    }

    pub fn handle_login(&mut self) {
        let email = self.email_input.trim().to_string();
        let password = self.password_input.clone();
        if email.is_empty() || password.is_empty() {
            self.auth_state
                .set_error("Email and password are required".to_string());
            return;
        }

        self.auth_state.clear_error();
        self.register_notice = None;
        self.auth_state.loading = true;
        let (tx, rx) = mpsc::channel();
        self.pending_login = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.login(&email, &password));
        });
    }

    pub fn handle_register(&mut self) {
        let email = self.email_input.trim().to_string();
        let name = self.name_input.trim().to_string();
        let password = self.password_input.clone();
        if email.is_empty() || name.is_empty() || password.is_empty() {
            self.auth_state
                .set_error("Email, name and password are required".to_string());
            return;
        }
        if password != self.confirm_password_input {
            self.auth_state.set_error("Passwords do not match".to_string());
            return;
        }

        self.auth_state.clear_error();
        self.auth_state.loading = true;
        let role = self.register_role;
        let (tx, rx) = mpsc::channel();
        self.pending_register = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.register(&email, &name, &password, role));
        });
    }

    pub fn logout(&mut self) {
        self.store.logout();
        self.redirect_to_login();
    }

    fn complete_login(&mut self, response: AuthResponse) {
        let session: Session = response.into();
        // The API client never touches the store; persisting is our job.
        self.store.login(&session);
        tracing::info!("logged in as {}", session.user.email);
        self.auth_state.user = Some(session.user);
        self.password_input.clear();
        self.confirm_password_input.clear();
        self.guard.invalidate();
        self.session_dirty.store(false, Ordering::SeqCst);
        self.current_view = AppView::Home;
    }

    // --- navigation ---

    pub fn open_projects(&mut self) {
        self.current_view = AppView::Projects;
        self.ui_error = None;
        self.load_projects();
        if self.is_teacher() {
            self.load_promotions();
        }
    }

    pub fn open_project(&mut self, project_id: i64) {
        self.selected_project_id = Some(project_id);
        self.selected_group_id = None;
        self.groups.clear();
        self.current_view = AppView::Groups;
        self.ui_error = None;
        self.load_groups();
    }

    pub fn open_group(&mut self, group_id: i64) {
        self.selected_group_id = Some(group_id);
        self.deliverables.clear();
        self.current_view = AppView::Deliverables;
        self.ui_error = None;
        self.load_deliverables();
    }

    pub fn open_evaluations(&mut self) {
        if self.selected_group_id.is_none() {
            return;
        }
        self.evaluations.clear();
        self.current_view = AppView::Evaluations;
        self.ui_error = None;
        self.load_evaluations();
    }

    // --- data loads ---

    pub fn load_projects(&mut self) {
        let (tx, rx) = mpsc::channel();
        self.pending_projects = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.list_projects());
        });
    }

    pub fn load_promotions(&mut self) {
        let (tx, rx) = mpsc::channel();
        self.pending_promotions = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.list_promotions());
        });
    }

    pub fn load_groups(&mut self) {
        let project_id = self.selected_project_id;
        let (tx, rx) = mpsc::channel();
        self.pending_groups = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.list_groups(project_id));
        });
    }

    pub fn load_deliverables(&mut self) {
        let Some(group_id) = self.selected_group_id else {
            return;
        };
        let (tx, rx) = mpsc::channel();
        self.pending_deliverables = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.list_deliverables(group_id));
        });
    }

    pub fn load_evaluations(&mut self) {
        let Some(group_id) = self.selected_group_id else {
            return;
        };
        let (tx, rx) = mpsc::channel();
        self.pending_evaluations = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.list_evaluations(group_id));
        });
    }

    // --- actions ---

    pub fn handle_create_project(&mut self) {
        let name = self.project_name_input.trim().to_string();
        if name.is_empty() {
            self.ui_error = Some("Project name is required".to_string());
            return;
        }
        let description = self.project_description_input.trim();
        let draft = ProjectDraft {
            name,
            description: (!description.is_empty()).then(|| description.to_string()),
            promotion_id: self.project_promotion_choice,
            min_group_size: None,
            max_group_size: None,
            deadline: None,
        };

        self.ui_error = None;
        let (tx, rx) = mpsc::channel();
        self.pending_create_project = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.create_project(&draft));
        });
    }

    pub fn handle_create_group(&mut self) {
        let Some(project_id) = self.selected_project_id else {
            return;
        };
        let name = self.group_name_input.trim().to_string();
        if name.is_empty() {
            self.ui_error = Some("Group name is required".to_string());
            return;
        }
        let draft = GroupDraft { name, project_id };

        self.ui_error = None;
        let (tx, rx) = mpsc::channel();
        self.pending_create_group = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.create_group(&draft));
        });
    }

    pub fn handle_join_group(&mut self, group_id: i64) {
        let Some(user_id) = self.current_user().map(|u| u.id) else {
            return;
        };
        self.ui_error = None;
        let (tx, rx) = mpsc::channel();
        self.pending_group_membership = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.join_group(group_id, user_id));
        });
    }

    pub fn handle_leave_group(&mut self, group_id: i64) {
        let Some(user_id) = self.current_user().map(|u| u.id) else {
            return;
        };
        self.ui_error = None;
        let (tx, rx) = mpsc::channel();
        self.pending_group_membership = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.leave_group(group_id, user_id));
        });
    }

    pub fn handle_submit_deliverable(&mut self) {
        let Some(group_id) = self.selected_group_id else {
            return;
        };
        let name = self.deliverable_name_input.trim().to_string();
        if name.is_empty() {
            self.ui_error = Some("Deliverable name is required".to_string());
            return;
        }
        let url = self.deliverable_url_input.trim();
        let draft = DeliverableDraft {
            group_id,
            name,
            url: (!url.is_empty()).then(|| url.to_string()),
        };

        self.ui_error = None;
        let (tx, rx) = mpsc::channel();
        self.pending_submit_deliverable = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.submit_deliverable(&draft));
        });
    }

    pub fn handle_save_evaluation(&mut self) {
        let Some(group_id) = self.selected_group_id else {
            return;
        };

        let grade = match parse_grade(&self.grade_input) {
            Ok(grade) => grade,
            Err(e) => {
                self.ui_error = Some(e);
                return;
            }
        };
        let defense_at = match parse_defense(&self.defense_input) {
            Ok(defense_at) => defense_at,
            Err(e) => {
                self.ui_error = Some(e);
                return;
            }
        };
        let comment = self.comment_input.trim();
        let draft = EvaluationDraft {
            group_id,
            grade,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
            defense_at,
        };

        self.ui_error = None;
        let (tx, rx) = mpsc::channel();
        self.pending_save_evaluation = Some(rx);
        let client = self.api_client();
        thread::spawn(move || {
            let _ = tx.send(client.record_evaluation(&draft));
        });
    }

    // --- frame polling ---

    /// Check for pending async operation results. Called once per frame.
    pub fn check_pending_operations(&mut self) {
        if let Some(ref rx) = self.pending_login {
            if let Ok(result) = rx.try_recv() {
                self.pending_login = None;
                self.auth_state.loading = false;
                match result {
                    Ok(response) => self.complete_login(response),
                    Err(e) => self.auth_state.set_error(e.to_string()),
                }
            }
        }

        if let Some(ref rx) = self.pending_register {
            if let Ok(result) = rx.try_recv() {
                self.pending_register = None;
                self.auth_state.loading = false;
                match result {
                    Ok(user) => {
                        tracing::info!("account created for {}", user.email);
                        self.is_register_mode = false;
                        self.register_notice =
                            Some("Account created, you can log in now".to_string());
                        self.password_input.clear();
                        self.confirm_password_input.clear();
                    }
                    Err(e) => self.auth_state.set_error(e.to_string()),
                }
            }
        }

        if let Some(ref rx) = self.pending_projects {
            if let Ok(result) = rx.try_recv() {
                self.pending_projects = None;
                match result {
                    Ok(projects) => self.projects = projects,
                    Err(e) => {
                        tracing::error!("failed to load projects: {}", e);
                        self.ui_error = Some(e.to_string());
                    }
                }
            }
        }

        if let Some(ref rx) = self.pending_promotions {
            if let Ok(result) = rx.try_recv() {
                self.pending_promotions = None;
                match result {
                    Ok(promotions) => self.promotions = promotions,
                    Err(e) => tracing::error!("failed to load promotions: {}", e),
                }
            }
        }

        if let Some(ref rx) = self.pending_create_project {
            if let Ok(result) = rx.try_recv() {
                self.pending_create_project = None;
                match result {
                    Ok(project) => {
                        self.projects.push(project);
                        self.project_name_input.clear();
                        self.project_description_input.clear();
                        self.project_promotion_choice = None;
                    }
                    Err(e) => self.ui_error = Some(e.to_string()),
                }
            }
        }

        if let Some(ref rx) = self.pending_groups {
            if let Ok(result) = rx.try_recv() {
                self.pending_groups = None;
                match result {
                    Ok(groups) => self.groups = groups,
                    Err(e) => {
                        tracing::error!("failed to load groups: {}", e);
                        self.ui_error = Some(e.to_string());
                    }
                }
            }
        }

        if let Some(ref rx) = self.pending_create_group {
            if let Ok(result) = rx.try_recv() {
                self.pending_create_group = None;
                match result {
                    Ok(group) => {
                        self.groups.push(group);
                        self.group_name_input.clear();
                    }
                    Err(e) => self.ui_error = Some(e.to_string()),
                }
            }
        }

        if let Some(ref rx) = self.pending_group_membership {
            if let Ok(result) = rx.try_recv() {
                self.pending_group_membership = None;
                match result {
                    Ok(group) => {
                        if let Some(existing) =
                            self.groups.iter_mut().find(|g| g.id == group.id)
                        {
                            *existing = group;
                        } else {
                            self.groups.push(group);
                        }
                    }
                    Err(e) => self.ui_error = Some(e.to_string()),
                }
            }
        }

        if let Some(ref rx) = self.pending_deliverables {
            if let Ok(result) = rx.try_recv() {
                self.pending_deliverables = None;
                match result {
                    Ok(deliverables) => self.deliverables = deliverables,
                    Err(e) => {
                        tracing::error!("failed to load deliverables: {}", e);
                        self.ui_error = Some(e.to_string());
                    }
                }
            }
        }

        if let Some(ref rx) = self.pending_submit_deliverable {
            if let Ok(result) = rx.try_recv() {
                self.pending_submit_deliverable = None;
                match result {
                    Ok(deliverable) => {
                        self.deliverables.push(deliverable);
                        self.deliverable_name_input.clear();
                        self.deliverable_url_input.clear();
                    }
                    Err(e) => self.ui_error = Some(e.to_string()),
                }
            }
        }

        if let Some(ref rx) = self.pending_evaluations {
            if let Ok(result) = rx.try_recv() {
                self.pending_evaluations = None;
                match result {
                    Ok(evaluations) => self.evaluations = evaluations,
                    Err(e) => {
                        tracing::error!("failed to load evaluations: {}", e);
                        self.ui_error = Some(e.to_string());
                    }
                }
            }
        }

        if let Some(ref rx) = self.pending_save_evaluation {
            if let Ok(result) = rx.try_recv() {
                self.pending_save_evaluation = None;
                match result {
                    Ok(evaluation) => {
                        if let Some(existing) =
                            self.evaluations.iter_mut().find(|e| e.id == evaluation.id)
                        {
                            *existing = evaluation;
                        } else {
                            self.evaluations.push(evaluation);
                        }
                        self.grade_input.clear();
                        self.comment_input.clear();
                        self.defense_input.clear();
                    }
                    Err(e) => self.ui_error = Some(e.to_string()),
                }
            }
        }
    }
}

/// Parse the grade field. Empty means "no grade yet".
fn parse_grade(input: &str) -> Result<Option<f32>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f32>()
        .map(Some)
        .map_err(|_| format!("'{}' is not a valid grade", trimmed))
}

/// Parse the defense field as RFC 3339. Empty means "not scheduled".
fn parse_defense(input: &str) -> Result<Option<DateTime<Utc>>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| format!("'{}' is not a valid date (use RFC 3339)", trimmed))
}
