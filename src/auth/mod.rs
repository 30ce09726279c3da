//! Registration, login and logout flows over the user repository.
//!
//! The external contract is email + password in, session out. Passwords
//! are stored as Argon2 PHC strings; callers run form validation before
//! reaching this module, so only domain rules (uniqueness, credential
//! match) are checked here.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::error::AuthError;
use crate::models::{Session, User};
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct AuthManager {
    store: Store,
}

impl AuthManager {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Registers a new account and logs it in. Emails are unique
    /// case-insensitively and stored lowercased.
    pub fn register(&self, registration: Registration) -> Result<Session, AuthError> {
        if self.store.is_email_taken(&registration.email) {
            return Err(AuthError::EmailTaken);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: registration.name.trim().to_string(),
            email: registration.email.trim().to_lowercase(),
            password_hash: hash_password(&registration.password)?,
            created_at: now,
        };

        let mut users = self.store.registered_users();
        users.push(user.clone());
        self.store.save_registered_users(&users)?;
        info!("registered account for {}", user.email);

        let session = Session::for_user(&user, now);
        self.store.save_session(&session)?;
        Ok(session)
    }

    /// Unknown email and wrong password are distinct outcomes; the UI
    /// phrases them differently.
    pub fn login(&self, credentials: Credentials) -> Result<Session, AuthError> {
        let user = self
            .store
            .find_user_by_email(&credentials.email)
            .ok_or(AuthError::UnknownEmail)?;

        if !verify_password(&credentials.password, &user.password_hash)? {
            return Err(AuthError::WrongPassword);
        }

        let session = Session::for_user(&user, Utc::now());
        self.store.save_session(&session)?;
        Ok(session)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear_session()?;
        Ok(())
    }

    pub fn current_user(&self) -> Option<Session> {
        self.store.current_session()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::PasswordHash(err.to_string()))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed =
        PasswordHash::new(hash).map_err(|err| AuthError::PasswordHash(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
