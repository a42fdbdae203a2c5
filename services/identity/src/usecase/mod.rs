pub mod role;
pub mod token;
pub mod user;

use anyhow::Context as _;

use crate::domain::repository::PasswordHasher;
use crate::error::IdentityError;

pub(crate) async fn hash_password<H: PasswordHasher>(
    hasher: &H,
    password: &str,
) -> Result<String, IdentityError> {
    let hasher = hasher.clone();
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .context("join password hashing task")?
}

pub(crate) async fn verify_password<H: PasswordHasher>(
    hasher: &H,
    password: &str,
    hash: &str,
) -> Result<bool, IdentityError> {
    let hasher = hasher.clone();
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .context("join password verification task")?
}
