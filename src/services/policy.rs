//! Role rules shared by route guards, views and navigation.

use crate::models::{Booking, BookingStatus, PaymentMethod, PaymentStatus, SubscriptionStatus, Tool, User, UserType};

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const ADMIN: &str = "/admin";
pub const DASHBOARD: &str = "/dashboard";
pub const BOOKINGS: &str = "/bookings";
pub const TOOLS: &str = "/tools";
pub const TOOL_NEW: &str = "/tools/new";
pub const SHOP_NEW: &str = "/shops/new";
pub const SHOP_MANAGE: &str = "/shops/manage";
pub const SHOPS: &str = "/shops";
pub const PROFILE: &str = "/profile";

pub fn can_access_admin(user: Option<&User>) -> bool {
    user.map_or(false, |u| u.is_superuser)
}

pub fn is_provider(user: Option<&User>) -> bool {
    user.map_or(false, |u| u.user_type == UserType::Provider)
}

pub fn is_renter(user: Option<&User>) -> bool {
    user.map_or(false, |u| u.user_type == UserType::Renter)
}

/// Renters never list or edit tools.
pub fn can_manage_inventory(user: Option<&User>) -> bool {
    is_provider(user)
}

/// Providers must open a shop before anything else in the dashboard.
pub fn needs_shop(user: Option<&User>) -> bool {
    is_provider(user) && !user.and_then(|u| u.has_shop).unwrap_or(false)
}

pub fn needs_subscription(user: Option<&User>) -> bool {
    is_provider(user)
        && user.and_then(|u| u.subscription_status) != Some(SubscriptionStatus::Active)
}

pub fn can_book(tool: &Tool) -> bool {
    tool.is_available && tool.in_stock()
}

/// Shop owners confirm pending requests. When the payload does not name the
/// owner the server remains the authority.
pub fn can_confirm(user: Option<&User>, booking: &Booking) -> bool {
    let Some(user) = user else { return false };
    is_provider(Some(user))
        && booking.status == BookingStatus::Pending
        && booking.shop_owner_id().map_or(true, |owner| owner == user.id)
}

/// Either side may withdraw a request that has not been confirmed yet.
pub fn can_cancel(user: Option<&User>, booking: &Booking) -> bool {
    user.is_some() && booking.status == BookingStatus::Pending
}

pub fn cancel_label(user: Option<&User>) -> &'static str {
    if is_renter(user) {
        "Abort Request"
    } else {
        "Decline Request"
    }
}

pub fn can_pay(user: Option<&User>, booking: &Booking) -> bool {
    is_renter(user)
        && booking.status == BookingStatus::Confirmed
        && booking.payment_status == PaymentStatus::Pending
        && booking.payment_method == PaymentMethod::Razorpay
}

/// Landing page for the brand link.
pub fn home_path(user: Option<&User>) -> &'static str {
    match user {
        None => HOME,
        Some(u) if u.is_superuser => ADMIN,
        Some(u) if u.user_type == UserType::Provider => DASHBOARD,
        Some(_) => TOOLS,
    }
}
