//! Signup and login

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        user::{LoginForm, SignupForm},
        NewUser, Role, User,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
}

impl AuthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create an account. A taken email surfaces as a generic creation error.
    pub async fn signup(&self, form: &SignupForm) -> AppResult<User> {
        form.validate()?;
        if form.has_blank_fields() {
            return Err(AppError::Validation("All fields are required.".to_string()));
        }

        let role = match form.role.as_deref().map(str::trim) {
            None | Some("") => Role::Student,
            Some(raw) => raw.parse::<Role>().map_err(AppError::Validation)?,
        };
        let email = form.email.trim();

        if self.repository.users.email_exists(email).await? {
            tracing::info!("Signup rejected: email already registered");
            return Err(AppError::Conflict("Error: Could not create user.".to_string()));
        }

        let password_hash = self.hash_password(&form.password)?;

        let user = self
            .repository
            .users
            .create(&NewUser {
                name: form.name.clone(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User signed up");
        Ok(user)
    }

    /// Check credentials and return the matching user
    pub async fn login(&self, form: &LoginForm) -> AppResult<User> {
        let user = self
            .repository
            .users
            .find_by_email(form.email.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

        if !self.verify_password(&user, &form.password)? {
            tracing::warn!(user_id = user.id, "Login failed: incorrect password");
            return Err(AppError::Authentication("Incorrect password.".to_string()));
        }

        tracing::info!(user_id = user.id, role = %user.role, "User logged in");
        Ok(user)
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
