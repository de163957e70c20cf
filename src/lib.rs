//! Mesa is the account and profile subsystem of a restaurant marketplace.
//!
//! It owns the `users` and `user_profiles` tables: entity definitions, the
//! creation-time invariants enforced by [`account::AccountManager`], and the
//! declarative [`admin`] registration an external console renderer consumes.
//! Request routing, session handling and UI belong to the host application.

#![forbid(unsafe_code)]
#![deny(unused_mut)]

pub mod account;
pub mod admin;
pub mod config;
pub mod crypto;
pub mod database;
pub mod error;
pub mod telemetry;

use std::sync::Arc;

pub use error::{AccountError, Result};

use account::{AccountManager, ProfileRepository, UserRepository};
use crypto::PasswordManager;

/// Shared handles over the account subsystem.
#[derive(Clone)]
pub struct Accounts {
    pub config: Arc<config::Configuration>,
    pub db: database::Database,
    pub manager: AccountManager,
    pub users: UserRepository,
    pub profiles: ProfileRepository,
}

/// Initialize the account subsystem from `config.yaml`.
pub async fn initialize() -> std::result::Result<Accounts, Box<dyn std::error::Error>>
{
    // read configuration file, let it in memory.
    let config = config::Configuration::default().read();

    let db = match config.postgres {
        Some(ref config) => {
            database::Database::new(
                &config.address,
                &config
                    .username
                    .clone()
                    .unwrap_or(database::DEFAULT_CREDENTIALS.into()),
                &config
                    .password
                    .clone()
                    .unwrap_or(database::DEFAULT_CREDENTIALS.into()),
                &config
                    .database
                    .clone()
                    .unwrap_or(database::DEFAULT_DATABASE_NAME.into()),
                config.pool_size.unwrap_or(database::DEFAULT_POOL_SIZE),
            )
            .await?
        },
        None => {
            tracing::error!("missing `postgres` entry on `config.yaml` file");
            std::process::exit(0);
        },
    };

    // execute migrations scripts on start.
    sqlx::migrate!().run(&db.postgres).await?;

    let pwd = Arc::new(PasswordManager::new(config.argon2.clone())?);

    Ok(Accounts {
        manager: AccountManager::new(db.postgres.clone(), Arc::clone(&pwd)),
        users: UserRepository::new(db.postgres.clone()),
        profiles: ProfileRepository::new(db.postgres.clone()),
        config,
        db,
    })
}
