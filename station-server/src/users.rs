//! 用户目录
//!
//! 登录验证、用户查询和成员搜索。用户由管理工具离线创建，
//! 本服务只读取和更新 `lastLogin`。

use std::sync::Arc;

use chrono::Utc;
use shared::{MemberSummary, User};

use crate::auth::password::verify_password;
use crate::store::{Collection, JsonStore};
use crate::utils::validation::MAX_PASSWORD_LEN;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<JsonStore>,
}

impl UserDirectory {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Verify credentials and stamp `lastLogin` in the same
    /// read-modify-write pass.
    ///
    /// Unknown username and wrong password return the same error, so
    /// usernames cannot be enumerated through the login endpoint.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        // Cap input length before it reaches the hash function
        if password.len() > MAX_PASSWORD_LEN {
            return Err(AppError::invalid_credentials());
        }

        let username = username.to_string();
        let password = password.to_string();

        self.store
            .modify(Collection::Users, move |users: &mut Vec<User>| {
                let user = users
                    .iter_mut()
                    .find(|u| u.username == username)
                    .ok_or_else(AppError::invalid_credentials)?;

                let valid = verify_password(&password, &user.password_hash)
                    .map_err(|e| AppError::internal(format!("Password verification: {}", e)))?;
                if !valid {
                    return Err(AppError::invalid_credentials());
                }

                user.last_login = Some(Utc::now());
                Ok(user.clone())
            })
            .await
    }

    /// Find a user by id
    pub async fn get(&self, id: i64) -> AppResult<User> {
        let users: Vec<User> = self.store.load(Collection::Users).await?;
        users
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))
    }

    /// Search members by name/username substring, optionally restricted
    /// to one department. Returns public fields only.
    pub async fn search(
        &self,
        query: Option<&str>,
        department: Option<i64>,
    ) -> AppResult<Vec<MemberSummary>> {
        let users: Vec<User> = self.store.load(Collection::Users).await?;
        let query = query.map(str::to_lowercase);

        let members = users
            .iter()
            .filter(|u| department.is_none_or(|d| u.department == d))
            .filter(|u| {
                query.as_deref().is_none_or(|q| {
                    u.name.to_lowercase().contains(q) || u.username.to_lowercase().contains(q)
                })
            })
            .map(MemberSummary::from)
            .collect();

        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use shared::Role;

    fn user(id: i64, username: &str, name: &str, role: Role, department: i64) -> User {
        User {
            id,
            username: username.into(),
            password_hash: hash_password("123456").unwrap(),
            name: name.into(),
            role,
            department,
            email: format!("{}@example.com", username),
            phone: String::new(),
            skills: vec![],
            last_login: None,
        }
    }

    async fn directory_with_users() -> (tempfile::TempDir, UserDirectory) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::new(dir.path()));
        store
            .save(
                Collection::Users,
                &[
                    user(1, "admin", "系统管理员", Role::SuperAdmin, 1),
                    user(2, "manager1", "张主任", Role::DepartmentHead, 2),
                    user(3, "user1", "李明", Role::Member, 2),
                ],
            )
            .await
            .unwrap();
        (dir, UserDirectory::new(store))
    }

    #[tokio::test]
    async fn authenticate_stamps_last_login() {
        let (_dir, directory) = directory_with_users().await;
        let user = directory.authenticate("manager1", "123456").await.unwrap();
        assert!(user.last_login.is_some());

        // Stamp is persisted, not just returned
        let stored = directory.get(2).await.unwrap();
        assert!(stored.last_login.is_some());
    }

    #[tokio::test]
    async fn over_long_password_is_rejected_before_hashing() {
        let (_dir, directory) = directory_with_users().await;
        let huge = "a".repeat(MAX_PASSWORD_LEN + 1);
        let err = directory.authenticate("manager1", &huge).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_identical() {
        let (_dir, directory) = directory_with_users().await;
        let wrong_pw = directory
            .authenticate("manager1", "nope")
            .await
            .unwrap_err();
        let unknown = directory.authenticate("ghost", "nope").await.unwrap_err();
        assert_eq!(wrong_pw.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn search_filters_by_department_and_query() {
        let (_dir, directory) = directory_with_users().await;

        let dept2 = directory.search(None, Some(2)).await.unwrap();
        assert_eq!(dept2.len(), 2);

        let by_name = directory.search(Some("李"), None).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, 3);

        let by_username = directory.search(Some("MANAGER"), Some(2)).await.unwrap();
        assert_eq!(by_username.len(), 1);
        assert_eq!(by_username[0].id, 2);
    }
}
