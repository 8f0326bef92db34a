//! User signup, credential checks and sign-in sessions.

use super::helpers::{
    generate_session_token, hash_password, hash_token, verify_password, verify_unknown_user_password,
};
use super::Shortener;
use crate::cache::CachedSession;
use crate::errors::AppError;
use crate::models::User;

impl Shortener {
    /// Register a new user.
    ///
    /// Fails with `UserAlreadyCreated` when the email is already registered.
    pub fn create_new_user(&self, email: &str, password: &str) -> Result<(), AppError> {
        // The store insert still rejects a racing duplicate
        if self.users.find_user(email)?.is_some() {
            return Err(AppError::user_already_created(email));
        }

        let password_hash = hash_password(password)?;
        self.users.create_user(User::new(email, password_hash))?;

        log::info!("Registered new user: {}", email);
        Ok(())
    }

    /// Whether `password` is the password of the registered user `email`
    pub fn is_user_valid(&self, email: &str, password: &str) -> Result<bool, AppError> {
        Ok(match self.users.find_user(email)? {
            Some(user) => verify_password(password, &user.password_hash),
            None => verify_unknown_user_password(password),
        })
    }

    /// Check credentials and open a session.
    ///
    /// Returns the plain-text bearer token; only its hash is kept.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<String, AppError> {
        if !self.is_user_valid(email, password)? {
            log::warn!("Rejected sign-in for {}", email);
            if let Some(m) = &self.metrics {
                m.record_sign_in("invalid");
            }
            return Err(AppError::InvalidCredentials(
                "Invalid email or password".into(),
            ));
        }

        let token = generate_session_token();
        self.cache.insert_session(
            &hash_token(&token),
            CachedSession {
                email: email.to_string(),
            },
        );
        if let Some(m) = &self.metrics {
            m.record_sign_in("success");
        }

        log::info!("Opened session for {}", email);
        Ok(token)
    }

    /// Resolve a bearer token to the email of its session
    pub fn authenticate(&self, token: &str) -> Result<String, AppError> {
        let session = self.cache.get_session(&hash_token(token));
        if let Some(m) = &self.metrics {
            match session {
                Some(_) => m.record_cache_hit("session"),
                None => m.record_cache_miss("session"),
            }
        }

        session
            .map(|session| session.email)
            .ok_or_else(AppError::invalid_token)
    }

    /// Close the session of a bearer token
    pub fn sign_out(&self, token: &str) {
        self.cache.invalidate_session(&hash_token(token));
        log::debug!("Closed session");
    }
}
