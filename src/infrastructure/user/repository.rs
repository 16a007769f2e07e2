//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserProfile, UserRepository};
use crate::domain::{DomainError, UniqueField};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<UserId, User>,
    next_id: i64,
}

impl Table {
    /// Find a row other than `except` that already holds the username or email
    fn collision(&self, username: &str, email: &str, except: Option<UserId>) -> Option<UniqueField> {
        let others = self.rows.values().filter(|u| Some(u.id()) != except);

        for user in others {
            if user.username() == username {
                return Some(UniqueField::Username);
            }
            if user.email() == email {
                return Some(UniqueField::Email);
            }
        }

        None
    }
}

/// In-memory implementation of UserRepository
///
/// IDs are assigned sequentially from 1 and never reused.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflict(field: UniqueField) -> DomainError {
    DomainError::conflict(field, format!("duplicate key value violates unique constraint on {}", field))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<UserId, DomainError> {
        let mut table = self.table.write().await;

        if let Some(field) = table.collision(&user.username, &user.email, None) {
            return Err(conflict(field));
        }

        table.next_id += 1;
        let id = UserId::new(table.next_id);

        table
            .rows
            .insert(id, User::new(id, user.username, user.email, user.password_hash));

        Ok(id)
    }

    async fn get_by_id(&self, id: UserId) -> Result<User, DomainError> {
        let table = self.table.read().await;

        table
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("User {} not found", id)))
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let mut table = self.table.write().await;

        if let Some(field) = table.collision(&profile.username, &profile.email, Some(profile.id)) {
            return Err(conflict(field));
        }

        // UPDATE on a missing row is a no-op, as in SQL
        if let Some(user) = table.rows.get_mut(&profile.id) {
            user.set_profile(profile);
        }

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<UserProfile>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.values().map(UserProfile::from).collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hashed_password".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(new_user("user1", "u1@example.com")).await.unwrap();
        let second = repo.create(new_user("user2", "u2@example.com")).await.unwrap();

        assert_eq!(first, UserId::new(1));
        assert_eq!(second, UserId::new(2));
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let id = repo.create(new_user("testuser", "test@example.com")).await.unwrap();

        let user = repo.get_by_id(id).await.unwrap();
        assert_eq!(user.username(), "testuser");
        assert_eq!(user.email(), "test@example.com");
        assert_eq!(user.password_hash(), "hashed_password");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let err = repo.get_by_id(UserId::new(999)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("same", "a@example.com")).await.unwrap();

        let err = repo.create(new_user("same", "b@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { field: UniqueField::Username, .. }));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("first", "same@example.com")).await.unwrap();

        let err = repo.create(new_user("second", "same@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { field: UniqueField::Email, .. }));
    }

    #[tokio::test]
    async fn test_update_own_values_is_not_a_conflict() {
        let repo = InMemoryUserRepository::new();
        let id = repo.create(new_user("testuser", "test@example.com")).await.unwrap();

        let profile = UserProfile {
            id,
            username: "testuser".to_string(),
            email: "renamed@example.com".to_string(),
        };
        repo.update(&profile).await.unwrap();

        let user = repo.get_by_id(id).await.unwrap();
        assert_eq!(user.email(), "renamed@example.com");
        assert_eq!(user.password_hash(), "hashed_password");
    }

    #[tokio::test]
    async fn test_update_into_taken_username() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("user1", "u1@example.com")).await.unwrap();
        let id = repo.create(new_user("user2", "u2@example.com")).await.unwrap();

        let profile = UserProfile {
            id,
            username: "user1".to_string(),
            email: "u2@example.com".to_string(),
        };

        assert!(repo.update(&profile).await.is_err());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();
        let id = repo.create(new_user("testuser", "test@example.com")).await.unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
        assert!(repo.get_by_id(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_in_id_order() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("user1", "u1@example.com")).await.unwrap();
        repo.create(new_user("user2", "u2@example.com")).await.unwrap();

        let users = repo.list().await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();

        assert_eq!(names, vec!["user1", "user2"]);
    }
}
