//! Superuser screens: platform stats, user moderation and the booking log.

use std::sync::Arc;

use super::{settled, Outcome, Toast};
use crate::errors::AppError;
use crate::models::{AdminStats, Booking, Subscription, SubscriptionUpdate, Tool, User};
use crate::services::policy::ADMIN;
use crate::services::scope::ViewScope;
use crate::state::AppState;

/// One labelled figure on the overview page.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

pub fn stat_cards(stats: &AdminStats) -> Vec<StatCard> {
    vec![
        StatCard {
            label: "Total Users",
            value: stats.total_users.to_string(),
        },
        StatCard {
            label: "Total Tools",
            value: stats.total_tools.to_string(),
        },
        StatCard {
            label: "Total Bookings",
            value: stats.total_bookings.to_string(),
        },
        StatCard {
            label: "Revenue",
            value: format!("₹{:.2}", stats.total_revenue.unwrap_or(0.0)),
        },
        StatCard {
            label: "New Users (30d)",
            value: stats.recent_activity.new_users.to_string(),
        },
        StatCard {
            label: "New Bookings (30d)",
            value: stats.recent_activity.new_bookings.to_string(),
        },
    ]
}

pub struct AdminOverviewView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub stats: Option<AdminStats>,
    pub error: Option<String>,
}

impl AdminOverviewView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            stats: None,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        let api = &self.state.api;
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.get_admin_stats(&token).await }),
            )
            .await;
        match settled(res) {
            Some(Ok(stats)) => self.stats = Some(stats),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "failed to load admin stats");
                self.error = Some(e.to_string());
            }
            None => {}
        }
    }

    pub fn cards(&self) -> Vec<StatCard> {
        self.stats.as_ref().map(stat_cards).unwrap_or_default()
    }
}

pub struct AdminUsersView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub search: String,
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AdminUsersView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            search: String::new(),
            users: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let api = &self.state.api;
        let search = self.search.as_str();
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.get_admin_users(&token, search).await }),
            )
            .await;
        match settled(res) {
            Some(Ok(users)) => {
                self.users = users;
                self.error = None;
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "failed to load users");
                self.error = Some("Failed to load users".to_string());
            }
            None => return,
        }
        self.loading = false;
    }

    /// Updates the matching row in place with the server's answer.
    pub async fn toggle_verify(&mut self, id: &str) -> Outcome {
        let api = &self.state.api;
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.admin_toggle_verify_user(&token, id).await }),
            )
            .await;
        match settled(res) {
            Some(Ok(toggled)) => {
                if let Some(user) = self.users.iter_mut().find(|u| u.id == id) {
                    user.is_verified = toggled.is_verified;
                }
                Outcome::toast(Toast::success("User verification updated"))
            }
            Some(Err(e)) => {
                tracing::warn!(user_id = id, error = %e, "verify toggle failed");
                Outcome::toast(Toast::error("Failed to update verification"))
            }
            None => Outcome::none(),
        }
    }

    pub async fn toggle_active(&mut self, id: &str) -> Outcome {
        let api = &self.state.api;
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.admin_toggle_active_user(&token, id).await }),
            )
            .await;
        match settled(res) {
            Some(Ok(toggled)) => {
                if let Some(user) = self.users.iter_mut().find(|u| u.id == id) {
                    user.is_active = toggled.is_active;
                }
                let message = if toggled.is_active {
                    "User activated"
                } else {
                    "User deactivated"
                };
                Outcome::toast(Toast::success(message))
            }
            Some(Err(e)) => {
                tracing::warn!(user_id = id, error = %e, "active toggle failed");
                Outcome::toast(Toast::error("Failed to update user status"))
            }
            None => Outcome::none(),
        }
    }

    pub async fn delete(&mut self, id: &str) -> Outcome {
        let api = &self.state.api;
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.admin_delete_user(&token, id).await }),
            )
            .await;
        match settled(res) {
            Some(Ok(())) => {
                self.users.retain(|u| u.id != id);
                tracing::info!(user_id = id, "user deleted");
                Outcome::toast(Toast::success("User deleted"))
            }
            Some(Err(e)) => Outcome::toast(Toast::error(format!("Failed to delete user: {e}"))),
            None => Outcome::none(),
        }
    }
}

/// A single user with their listings and subscription.
pub struct AdminUserDetailView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub user_id: String,
    pub user: Option<User>,
    pub tools: Vec<Tool>,
    pub subscription: Option<Subscription>,
    pub error: Option<String>,
}

impl AdminUserDetailView {
    pub fn new(state: Arc<AppState>, user_id: &str) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            user_id: user_id.to_string(),
            user: None,
            tools: Vec::new(),
            subscription: None,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        let session = &self.state.session;
        let api = &self.state.api;
        let id = self.user_id.as_str();
        let fetch = async {
            let user = session
                .authorized(|token| async move { api.get_admin_user(&token, id).await })
                .await?;
            // Renters have neither tools nor a subscription.
            if user.user_type != crate::models::UserType::Provider {
                return Ok::<_, AppError>((user, Vec::new(), None));
            }
            let tools = session
                .authorized(|token| async move { api.get_admin_user_tools(&token, id).await })
                .await?;
            let subscription = session
                .authorized(|token| async move { api.get_admin_user_subscription(&token, id).await })
                .await
                .unwrap_or_else(|e| {
                    tracing::debug!(user_id = id, error = %e, "no subscription on record");
                    None
                });
            Ok((user, tools, subscription))
        };

        let res = self.scope.run(fetch).await;
        match settled(res) {
            Some(Ok((user, tools, subscription))) => {
                self.user = Some(user);
                self.tools = tools;
                self.subscription = subscription;
                self.error = None;
            }
            Some(Err(e)) => {
                tracing::warn!(user_id = %self.user_id, error = %e, "failed to load user");
                self.error = Some(e.to_string());
            }
            None => {}
        }
    }

    pub async fn update_subscription(&mut self, update: SubscriptionUpdate) -> Outcome {
        if update.status.is_none() && update.end_date.is_none() {
            return Outcome::toast(Toast::error("Nothing to update"));
        }
        let api = &self.state.api;
        let id = self.user_id.as_str();
        let update = &update;
        let res = self
            .scope
            .run(self.state.session.authorized(|token| async move {
                api.admin_update_user_subscription(&token, id, update).await
            }))
            .await;
        match settled(res) {
            Some(Ok(subscription)) => {
                self.subscription = Some(subscription);
                Outcome::toast(Toast::success("Subscription updated"))
            }
            Some(Err(e)) => Outcome::toast(Toast::error(e.to_string())),
            None => Outcome::none(),
        }
    }

    pub async fn delete(&mut self) -> Outcome {
        let api = &self.state.api;
        let id = self.user_id.as_str();
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.admin_delete_user(&token, id).await }),
            )
            .await;
        match settled(res) {
            Some(Ok(())) => Outcome::toast(Toast::success("User deleted")).then(format!("{ADMIN}/users")),
            Some(Err(e)) => Outcome::toast(Toast::error(format!("Failed to delete user: {e}"))),
            None => Outcome::none(),
        }
    }
}

pub struct AdminBookingsView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub search: String,
    pub bookings: Vec<Booking>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AdminBookingsView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            search: String::new(),
            bookings: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let api = &self.state.api;
        let search = self.search.as_str();
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.get_admin_bookings(&token, search).await }),
            )
            .await;
        match settled(res) {
            Some(Ok(bookings)) => {
                self.bookings = bookings;
                self.error = None;
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "failed to load bookings");
                self.error = Some("Failed to load bookings".to_string());
            }
            None => return,
        }
        self.loading = false;
    }
}
