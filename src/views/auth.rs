use std::sync::Arc;

use super::{settled, FormStatus, Outcome, Toast};
use crate::errors::AppError;
use crate::models::{ProfileUpdate, Registration, UserType};
use crate::services::policy::{DASHBOARD, LOGIN};
use crate::services::scope::ViewScope;
use crate::state::AppState;

pub struct LoginView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub username: String,
    pub password: String,
    pub status: FormStatus,
}

impl LoginView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            username: String::new(),
            password: String::new(),
            status: FormStatus::default(),
        }
    }

    pub async fn submit(&mut self) -> Outcome {
        if let Err(e) = self.status.begin() {
            return Outcome::toast(Toast::error(e.to_string()));
        }

        let res = self
            .scope
            .run(self.state.session.login(&self.username, &self.password))
            .await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };

        match res {
            Ok(_) => {
                self.status.finish();
                Outcome::toast(Toast::success("Access Granted")).then(DASHBOARD)
            }
            Err(e) => {
                self.status.fail(e.to_string());
                Outcome::none()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: UserType,
    pub phone: String,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            password_confirm: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            user_type: UserType::Renter,
            phone: String::new(),
        }
    }
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Registration, AppError> {
        if self.password != self.password_confirm {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }
        let phone = self.phone.trim();
        Ok(Registration {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            password_confirm: self.password_confirm.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            user_type: self.user_type,
            phone: (!phone.is_empty()).then(|| phone.to_string()),
        })
    }
}

pub struct RegisterView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub form: RegisterForm,
    pub status: FormStatus,
}

impl RegisterView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            form: RegisterForm::default(),
            status: FormStatus::default(),
        }
    }

    pub async fn submit(&mut self) -> Outcome {
        self.status.error = None;
        let registration = match self.form.validate() {
            Ok(r) => r,
            Err(e) => {
                self.status.error = Some(e.to_string());
                return Outcome::none();
            }
        };
        if let Err(e) = self.status.begin() {
            return Outcome::toast(Toast::error(e.to_string()));
        }

        let res = self
            .scope
            .run(self.state.session.register(&registration))
            .await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };

        match res {
            Ok(user) => {
                tracing::info!(username = %user.username, "account registered");
                self.status.finish();
                Outcome::toast(Toast::success("Welcome to the Network")).then(DASHBOARD)
            }
            Err(e) => {
                self.status.fail(e.to_string());
                Outcome::none()
            }
        }
    }
}

/// Edits the signed-in user's contact details. Only fields that are set are
/// sent.
pub struct ProfileView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub form: ProfileUpdate,
    pub status: FormStatus,
}

impl ProfileView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            form: ProfileUpdate::default(),
            status: FormStatus::default(),
        }
    }

    pub async fn submit(&mut self) -> Outcome {
        if !self.state.session.snapshot().is_authenticated() {
            return Outcome::toast(Toast::error("Please login to edit your profile")).then(LOGIN);
        }
        if self.form.email.as_deref().is_some_and(|e| !e.contains('@')) {
            self.status.error = Some("Enter a valid email address".to_string());
            return Outcome::none();
        }
        if let Err(e) = self.status.begin() {
            return Outcome::toast(Toast::error(e.to_string()));
        }

        let api = &self.state.api;
        let form = &self.form;
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.update_profile(&token, form).await }),
            )
            .await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };
        match res {
            Ok(user) => {
                self.status.finish();
                self.state.session.set_user(user);
                Outcome::toast(Toast::success("Profile updated"))
            }
            Err(e) => {
                self.status.fail(e.to_string());
                Outcome::toast(Toast::error(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_mismatch() {
        let form = RegisterForm {
            password: "secret-1".to_string(),
            password_confirm: "secret-2".to_string(),
            ..RegisterForm::default()
        };
        assert_eq!(form.validate().unwrap_err().to_string(), "Passwords do not match");
    }

    #[test]
    fn test_blank_phone_is_omitted() {
        let form = RegisterForm {
            username: " maya ".to_string(),
            password: "pw".to_string(),
            password_confirm: "pw".to_string(),
            phone: "  ".to_string(),
            user_type: UserType::Provider,
            ..RegisterForm::default()
        };
        let reg = form.validate().unwrap();
        assert_eq!(reg.username, "maya");
        assert_eq!(reg.phone, None);
        assert_eq!(reg.user_type, UserType::Provider);
    }
}
