//! Extended profile attributes, one per user at most.

use serde::{Deserialize, Serialize};
use sqlx::{Pool, Postgres};

use crate::error::Result;

const PROFILE_COLUMNS: &str = "id, user_id, profile_picture, cover_photo, \
     address_line1, address_line2, country, state, city, pin_code, \
     latitude, longitude, created_at, modified_at";

/// Profile as saved on database.
///
/// Lifetime is bound to the owning user: the row disappears with it.
/// Media fields hold storage paths, never bytes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: i64,
    pub profile_picture: Option<String>,
    pub cover_photo: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub pin_code: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub modified_at: chrono::DateTime<chrono::Utc>,
}

/// Handle database requests for profiles.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: Pool<Postgres>,
}

impl ProfileRepository {
    /// Create a new [`ProfileRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Attach an empty profile to a user.
    ///
    /// Profiles are never created implicitly with the account; this is the
    /// explicit attachment path. A second attachment for the same user is
    /// rejected by the unique constraint on `user_id`.
    pub async fn create(&self, user_id: i64) -> Result<UserProfile> {
        let query = format!(
            r#"INSERT INTO user_profiles (user_id)
                VALUES ($1)
                RETURNING {PROFILE_COLUMNS}"#
        );

        let profile = sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(profile)
    }

    /// Find the profile of a user, if one is attached.
    pub async fn find_by_user(
        &self,
        user_id: i64,
    ) -> Result<Option<UserProfile>> {
        let query = format!(
            r#"SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1"#
        );

        let profile = sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    /// Persist edited profile attributes, stamping `modified_at`.
    pub async fn update(&self, profile: &UserProfile) -> Result<UserProfile> {
        let query = format!(
            r#"UPDATE user_profiles
                SET profile_picture = $1, cover_photo = $2,
                    address_line1 = $3, address_line2 = $4, country = $5,
                    state = $6, city = $7, pin_code = $8, latitude = $9,
                    longitude = $10, modified_at = NOW()
                WHERE user_id = $11
                RETURNING {PROFILE_COLUMNS}"#
        );

        let profile = sqlx::query_as::<_, UserProfile>(&query)
            .bind(&profile.profile_picture)
            .bind(&profile.cover_photo)
            .bind(&profile.address_line1)
            .bind(&profile.address_line2)
            .bind(&profile.country)
            .bind(&profile.state)
            .bind(&profile.city)
            .bind(&profile.pin_code)
            .bind(&profile.latitude)
            .bind(&profile.longitude)
            .bind(profile.user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(profile)
    }

    /// Detach and delete the profile of a user, keeping the user.
    pub async fn delete(&self, user_id: i64) -> Result<()> {
        sqlx::query(r#"DELETE FROM user_profiles WHERE user_id = $1"#)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
