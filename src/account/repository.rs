//! Handle database requests for users.

use sqlx::{Pool, Postgres};

use crate::account::{NewUser, Role, User};
use crate::error::Result;

const USER_COLUMNS: &str = "id, first_name, last_name, username, email, \
     phone_number, role, password, is_admin, is_active, is_superadmin, \
     is_staff, date_joined, last_login, created_date, modified_date";

#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    /// Create a new [`UserRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new [`User`] with all status flags down.
    ///
    /// Email and username uniqueness is left to the table constraints; a
    /// duplicate surfaces as a database error, never as a partial row.
    pub async fn insert(
        &self,
        new: &NewUser,
        email: &str,
        password: Option<&str>,
    ) -> Result<User> {
        let query = format!(
            r#"INSERT INTO users (first_name, last_name, username, email, password)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {USER_COLUMNS}"#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .bind(&new.username)
            .bind(email)
            .bind(password)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    /// Raise every status flag on an existing user. Second write of the
    /// superuser-creation path.
    pub async fn elevate(&self, user_id: i64) -> Result<User> {
        let query = format!(
            r#"UPDATE users
                SET is_admin = TRUE, is_active = TRUE, is_superadmin = TRUE,
                    is_staff = TRUE, modified_date = NOW()
                WHERE id = $1
                RETURNING {USER_COLUMNS}"#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find a user using `id` field.
    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let query = get_by_field_query(Field::Id);

        let user = sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find a user using `email` field.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = get_by_field_query(Field::Email);

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find a user using `username` field.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>> {
        let query = get_by_field_query(Field::Username);

        let user = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Replace the stored credential hash.
    pub async fn set_password_hash(
        &self,
        user_id: i64,
        phc_hash: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"UPDATE users SET password = $1, modified_date = NOW()
                WHERE id = $2"#,
        )
        .bind(phc_hash)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Update the role classification.
    pub async fn set_role(
        &self,
        user_id: i64,
        role: Option<Role>,
    ) -> Result<()> {
        sqlx::query(
            r#"UPDATE users SET role = $1, modified_date = NOW()
                WHERE id = $2"#,
        )
        .bind(role)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Stamp a successful authentication.
    pub async fn record_login(&self, user_id: i64) -> Result<()> {
        sqlx::query(
            r#"UPDATE users SET last_login = NOW(), modified_date = NOW()
                WHERE id = $1"#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a user. An attached profile goes with it (cascade).
    pub async fn delete(&self, user_id: i64) -> Result<()> {
        sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Field {
    Id,
    Email,
    Username,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Field::Id => write!(f, "id"),
            Field::Email => write!(f, "email"),
            Field::Username => write!(f, "username"),
        }
    }
}

fn get_by_field_query(field: Field) -> String {
    format!(r#"SELECT {USER_COLUMNS} FROM users WHERE {field} = $1"#)
}
