//! Registered users and the single active-session slot.
//!
//! Email uniqueness is a soft invariant owned by the registration flow in
//! `auth`, not by this repository; the methods here only give that flow
//! its case-insensitive lookups.

use crate::error::StorageError;
use crate::models::{Session, User};
use crate::store::{keys, Store};

impl Store {
    pub fn registered_users(&self) -> Vec<User> {
        self.adapter().get(keys::REGISTERED_USERS, Vec::new())
    }

    pub fn save_registered_users(&self, users: &[User]) -> Result<(), StorageError> {
        self.adapter().save(keys::REGISTERED_USERS, &users)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let needle = email.trim().to_lowercase();
        self.registered_users()
            .into_iter()
            .find(|user| user.email.to_lowercase() == needle)
    }

    pub fn is_email_taken(&self, email: &str) -> bool {
        self.find_user_by_email(email).is_some()
    }

    pub fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        self.adapter().save(keys::USER_SESSION, session)
    }

    pub fn current_session(&self) -> Option<Session> {
        self.adapter().get(keys::USER_SESSION, None)
    }

    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.adapter().remove(keys::USER_SESSION)
    }
}
