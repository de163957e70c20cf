//! Account construction and credential lifecycle.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::{Pool, Postgres};
use validator::Validate;

use crate::account::{User, UserRepository};
use crate::crypto::PasswordManager;
use crate::error::Result;

/// Input contract for account creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    #[validate(length(min = 1, message = "User must have a username."))]
    pub username: String,
    #[validate(length(min = 1, message = "User must have an email address."))]
    pub email: String,
    /// Hashed before persistence. `None` leaves the account without a usable
    /// credential until [`AccountManager::set_password`] is called.
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

/// Factory enforcing creation-time invariants before persistence.
#[derive(Clone)]
pub struct AccountManager {
    pub repo: UserRepository,
    pwd: Arc<PasswordManager>,
}

impl AccountManager {
    /// Create a new [`AccountManager`].
    pub fn new(pool: Pool<Postgres>, pwd: Arc<PasswordManager>) -> Self {
        Self {
            repo: UserRepository::new(pool),
            pwd,
        }
    }

    /// Create a regular account with every status flag down.
    ///
    /// Rejects a missing email or username without touching the store.
    pub async fn create_user(&self, new: NewUser) -> Result<User> {
        new.validate()?;

        let email = normalize_email(&new.email);
        let password = new
            .password
            .as_deref()
            .map(|p| self.pwd.hash_password(p))
            .transpose()?;

        let user = self.repo.insert(&new, &email, password.as_deref()).await?;
        tracing::info!(user_id = user.id, "user created");

        Ok(user)
    }

    /// Create an account, then raise every status flag.
    ///
    /// Delegates to [`Self::create_user`], so the same validation failures
    /// propagate. Exactly two writes.
    pub async fn create_superuser(&self, new: NewUser) -> Result<User> {
        let user = self.create_user(new).await?;
        let user = self.repo.elevate(user.id).await?;
        tracing::info!(user_id = user.id, "user elevated to superuser");

        Ok(user)
    }

    /// Credential-reset path for accounts created without a password.
    pub async fn set_password(
        &self,
        user_id: i64,
        password: &str,
    ) -> Result<()> {
        let phc_hash = self.pwd.hash_password(password)?;
        self.repo.set_password_hash(user_id, &phc_hash).await
    }

    /// Check a candidate password against the stored hash.
    pub fn verify_password(&self, user: &User, candidate: &str) -> Result<()> {
        match user.password.as_deref() {
            Some(phc_hash) => {
                Ok(self.pwd.verify_password(candidate, phc_hash)?)
            },
            None => Err(PasswordManager::invalid_password().into()),
        }
    }
}

/// Lowercase the domain portion of an email address.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((name, domain)) => {
            format!("{name}@{}", domain.to_lowercase())
        },
        None => email.to_owned(),
    }
}

#[cfg(test)]
pub(super) mod tests {
    use sqlx::{Pool, Postgres};

    use super::*;

    pub(in crate::account) fn manager(pool: Pool<Postgres>) -> AccountManager {
        let pwd = PasswordManager::new(None).expect("default argon2 params");
        AccountManager::new(pool, Arc::new(pwd))
    }

    fn new_user() -> NewUser {
        NewUser {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            username: "asha".into(),
            email: "asha@Example.COM".into(),
            password: Some("P$soW%920$n&".into()),
        }
    }

    async fn count_users(pool: &Pool<Postgres>) -> i64 {
        sqlx::query_scalar(r#"SELECT COUNT(*) FROM users"#)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("Asha@Example.COM"),
            "Asha@example.com"
        );
        assert_eq!(normalize_email("  a@b.fr  "), "a@b.fr");
        // No domain part to normalize.
        assert_eq!(normalize_email("not-an-email"), "not-an-email");
    }

    #[sqlx::test]
    async fn test_create_user_defaults(pool: Pool<Postgres>) {
        let manager = manager(pool.clone());

        let user = manager.create_user(new_user()).await.unwrap();

        assert_eq!(user.email, "asha@example.com");
        assert_eq!(user.username, "asha");
        assert!(!user.is_admin);
        assert!(!user.is_active);
        assert!(!user.is_superadmin);
        assert!(!user.is_staff);
        assert_eq!(user.role, None);
        assert_eq!(user.last_login, None);
        assert!(manager.verify_password(&user, "P$soW%920$n&").is_ok());
        assert!(manager.verify_password(&user, "wrong").is_err());

        assert_eq!(count_users(&pool).await, 1);
    }

    #[sqlx::test]
    async fn test_missing_email_persists_nothing(pool: Pool<Postgres>) {
        let manager = manager(pool.clone());

        let err = manager
            .create_user(NewUser {
                email: String::default(),
                ..new_user()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, crate::AccountError::Validation(_)));
        assert_eq!(count_users(&pool).await, 0);
    }

    #[sqlx::test]
    async fn test_missing_username_persists_nothing(pool: Pool<Postgres>) {
        let manager = manager(pool.clone());

        let err = manager
            .create_user(NewUser {
                username: String::default(),
                ..new_user()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, crate::AccountError::Validation(_)));
        assert_eq!(count_users(&pool).await, 0);
    }

    #[sqlx::test]
    async fn test_create_superuser_raises_all_flags(pool: Pool<Postgres>) {
        let manager = manager(pool.clone());

        let user = manager.create_superuser(new_user()).await.unwrap();

        assert!(user.is_admin);
        assert!(user.is_active);
        assert!(user.is_superadmin);
        assert!(user.is_staff);
        assert!(user.has_elevated_permission());
        assert_eq!(count_users(&pool).await, 1);

        // Elevation is a second write.
        assert!(user.modified_date > user.created_date);
    }

    #[sqlx::test]
    async fn test_create_superuser_propagates_validation(
        pool: Pool<Postgres>,
    ) {
        let manager = manager(pool.clone());

        let result = manager
            .create_superuser(NewUser {
                email: String::default(),
                ..new_user()
            })
            .await;

        assert!(result.is_err());
        assert_eq!(count_users(&pool).await, 0);
    }

    #[sqlx::test]
    async fn test_duplicate_email_rejected_by_store(pool: Pool<Postgres>) {
        let manager = manager(pool.clone());

        manager.create_user(new_user()).await.unwrap();
        let err = manager
            .create_user(NewUser {
                username: "other".into(),
                ..new_user()
            })
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
        assert_eq!(count_users(&pool).await, 1);
    }

    #[sqlx::test]
    async fn test_duplicate_username_rejected_by_store(pool: Pool<Postgres>) {
        let manager = manager(pool.clone());

        manager.create_user(new_user()).await.unwrap();
        let err = manager
            .create_user(NewUser {
                email: "other@example.com".into(),
                ..new_user()
            })
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
        assert_eq!(count_users(&pool).await, 1);
    }

    #[sqlx::test]
    async fn test_passwordless_account_then_reset(pool: Pool<Postgres>) {
        let manager = manager(pool.clone());

        let user = manager
            .create_user(NewUser {
                password: None,
                ..new_user()
            })
            .await
            .unwrap();

        assert_eq!(user.password, None);
        assert!(manager.verify_password(&user, "anything").is_err());

        manager.set_password(user.id, "N3w_P$ssw0rd!").await.unwrap();

        let user = manager
            .repo
            .find_by_id(user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(manager.verify_password(&user, "N3w_P$ssw0rd!").is_ok());
    }
}
