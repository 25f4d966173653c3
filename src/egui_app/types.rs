/**
 * Shared Types Module
 *
 * Defines the app view states and the request/response payloads exchanged
 * with the backend.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::egui_app::session::Session;
use crate::shared::models::{Role, UserSummary};

/// Current app view/mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    /// Login/register screen
    Auth,
    /// Landing page after login
    Home,
    /// Project catalogue
    Projects,
    /// Groups of the selected project
    Groups,
    /// Deliverables of the selected group
    Deliverables,
    /// Grades and defense schedule of the selected group
    Evaluations,
}

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
}

/// Authentication response from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

impl From<AuthResponse> for Session {
    fn from(value: AuthResponse) -> Self {
        Session {
            token: value.token,
            user: value.user,
        }
    }
}

/// New-project payload
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_group_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_group_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

/// Partial project update; absent fields stay untouched server-side
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

/// New-group payload
#[derive(Debug, Clone, Serialize)]
pub struct GroupDraft {
    pub name: String,
    pub project_id: i64,
}

/// Partial group update, also used for membership changes
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_member_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_member_id: Option<i64>,
}

/// Deliverable submission payload
#[derive(Debug, Clone, Serialize)]
pub struct DeliverableDraft {
    pub group_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// New-evaluation payload
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationDraft {
    pub group_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense_at: Option<DateTime<Utc>>,
}

/// Partial evaluation update
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_into_session() {
        let response = AuthResponse {
            token: "token123".to_string(),
            user: UserSummary {
                id: 1,
                email: "a@b.com".to_string(),
                name: "A".to_string(),
                role: Role::Teacher,
            },
        };

        let session: Session = response.into();
        assert_eq!(session.token, "token123");
        assert_eq!(session.user.email, "a@b.com");
    }

    #[test]
    fn test_register_request_role_tag() {
        let request = RegisterRequest {
            email: "a@b.com".to_string(),
            name: "A".to_string(),
            password: "pw".to_string(),
            role: Role::Student,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"role\":\"student\""));
    }

    #[test]
    fn test_group_update_skips_absent_fields() {
        let update = GroupUpdate {
            add_member_id: Some(4),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, "{\"add_member_id\":4}");
    }

    #[test]
    fn test_project_draft_minimal_body() {
        let draft = ProjectDraft {
            name: "Compiler".to_string(),
            description: None,
            promotion_id: None,
            min_group_size: None,
            max_group_size: None,
            deadline: None,
        };
        let json = serde_json::to_string(&draft).unwrap();
        assert_eq!(json, "{\"name\":\"Compiler\"}");
    }
}
