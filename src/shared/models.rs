//! Domain transfer types
//!
//! These mirror the JSON records served by the backend. The backend owns the
//! canonical data and all business rules; the client only renders these and
//! sends them back on create/update calls. Fields the backend may omit are
//! `#[serde(default)]` so a partial record still parses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role. The backend only ever issues these two tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    /// Whether this role may create projects and record grades
    pub fn is_teacher(self) -> bool {
        matches!(self, Role::Teacher)
    }

    /// Human-readable label for the UI
    pub fn label(self) -> &'static str {
        match self {
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }
}

/// The identity half of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// A project a teacher opened for a promotion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub promotion_id: Option<i64>,
    #[serde(default)]
    pub min_group_size: Option<u32>,
    #[serde(default)]
    pub max_group_size: Option<u32>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

/// A student group working on one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
    #[serde(default)]
    pub members: Vec<UserSummary>,
}

impl Group {
    /// Whether the given user already belongs to this group
    pub fn has_member(&self, user_id: i64) -> bool {
        self.members.iter().any(|m| m.id == user_id)
    }
}

/// A class-year cohort of students
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
}

/// A submission a group attached to its project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverable {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A grade and defense slot recorded by a teacher for a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: i64,
    pub group_id: i64,
    #[serde(default)]
    pub grade: Option<f32>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub defense_at: Option<DateTime<Utc>>,
}
