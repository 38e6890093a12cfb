//! User Model (用户与角色)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

/// User role
///
/// Closed enum over the four roles the system knows. The wire labels are
/// the Chinese strings stored in `users.json` and issued inside JWT claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "超级管理员")]
    SuperAdmin,
    #[serde(rename = "管理员")]
    Admin,
    #[serde(rename = "部门负责人")]
    DepartmentHead,
    #[serde(rename = "普通成员")]
    Member,
}

impl Role {
    /// Wire label (Chinese, as stored)
    pub fn label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "超级管理员",
            Role::Admin => "管理员",
            Role::DepartmentHead => "部门负责人",
            Role::Member => "普通成员",
        }
    }

    /// Whether this role sees every task regardless of membership
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }

    /// Task creation is restricted to admins and department heads
    pub fn can_manage_tasks(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin | Role::DepartmentHead)
    }

    /// Statistics are restricted to admins and department heads
    pub fn can_view_statistics(&self) -> bool {
        self.can_manage_tasks()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// User record as stored in `users.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC hash, stored under the `password` key.
    #[serde(rename = "password")]
    pub password_hash: String,
    /// Display name
    pub name: String,
    pub role: Role,
    /// Department id
    pub department: i64,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Record for User {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Public user view (no credential material)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub department: i64,
}

impl From<&User> for UserPublic {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
            department: user.department,
        }
    }
}

/// Member search result (task assignment picker)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: i64,
    pub name: String,
    pub department: i64,
    pub role: Role,
    pub skills: Vec<String>,
}

impl From<&User> for MemberSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            department: user.department,
            role: user.role,
            skills: user.skills.clone(),
        }
    }
}

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: token plus the public user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub data: UserPublic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_chinese_labels() {
        for role in [
            Role::SuperAdmin,
            Role::Admin,
            Role::DepartmentHead,
            Role::Member,
        ] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.label()));
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn only_admins_and_heads_manage_tasks() {
        assert!(Role::SuperAdmin.can_manage_tasks());
        assert!(Role::Admin.can_manage_tasks());
        assert!(Role::DepartmentHead.can_manage_tasks());
        assert!(!Role::Member.can_manage_tasks());
        assert!(!Role::DepartmentHead.is_admin());
    }

    #[test]
    fn user_serializes_with_stored_field_names() {
        let user = User {
            id: 3,
            username: "user1".into(),
            password_hash: "$argon2id$stub".into(),
            name: "李明".into(),
            role: Role::Member,
            department: 2,
            email: "user1@example.com".into(),
            phone: "13800000002".into(),
            skills: vec!["视频剪辑".into()],
            last_login: None,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["password"], "$argon2id$stub");
        assert_eq!(value["role"], "普通成员");
        assert!(value["lastLogin"].is_null());
    }
}
