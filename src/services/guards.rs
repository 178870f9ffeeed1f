//! Redirect rules for protected areas. Decisions are only made once the
//! session has settled.

use super::policy::{self, ADMIN, BOOKINGS, DASHBOARD, HOME, LOGIN, SHOP_NEW, TOOLS};
use super::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Admin,
    ProviderDashboard,
    ToolCreate,
    ToolEdit,
    ShopCreate,
    ShopManage,
    Bookings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Loading,
    Redirect(&'static str),
    Allow,
}

/// What a guarded screen shows for a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render<T> {
    Placeholder,
    Nothing,
    Content(T),
}

impl Decision {
    pub fn render<T>(&self, content: impl FnOnce() -> T) -> Render<T> {
        match self {
            Decision::Loading => Render::Placeholder,
            Decision::Redirect(_) => Render::Nothing,
            Decision::Allow => Render::Content(content()),
        }
    }
}

pub fn evaluate(area: Area, session: &Session) -> Decision {
    if !session.is_settled() {
        return Decision::Loading;
    }
    let user = session.user();
    if user.is_none() {
        return Decision::Redirect(LOGIN);
    }

    match area {
        Area::Admin => {
            if !policy::can_access_admin(user) {
                return Decision::Redirect(HOME);
            }
        }
        Area::ProviderDashboard => {
            if policy::can_access_admin(user) {
                return Decision::Redirect(ADMIN);
            }
            if policy::is_renter(user) {
                return Decision::Redirect(BOOKINGS);
            }
            if policy::needs_shop(user) {
                return Decision::Redirect(SHOP_NEW);
            }
        }
        Area::ToolCreate => {
            if !policy::can_manage_inventory(user) {
                return Decision::Redirect(TOOLS);
            }
            if policy::needs_shop(user) {
                return Decision::Redirect(SHOP_NEW);
            }
        }
        Area::ToolEdit => {
            if !policy::can_manage_inventory(user) {
                return Decision::Redirect(TOOLS);
            }
        }
        Area::ShopCreate => {
            if session.has_shop() {
                return Decision::Redirect(DASHBOARD);
            }
        }
        Area::ShopManage | Area::Bookings => {}
    }

    Decision::Allow
}

/// Guarded area for a route path, if any.
pub fn area_for_path(path: &str) -> Option<Area> {
    let path = path.split('?').next().unwrap_or(path).trim_end_matches('/');
    match path {
        p if p == ADMIN || p.starts_with("/admin/") => Some(Area::Admin),
        p if p == DASHBOARD || p.starts_with("/dashboard/") => Some(Area::ProviderDashboard),
        "/tools/new" => Some(Area::ToolCreate),
        p if p.starts_with("/tools/edit/") => Some(Area::ToolEdit),
        "/shops/new" => Some(Area::ShopCreate),
        "/shops/manage" => Some(Area::ShopManage),
        "/bookings" => Some(Area::Bookings),
        _ => None,
    }
}

pub fn evaluate_path(path: &str, session: &Session) -> Decision {
    match area_for_path(path) {
        Some(area) => evaluate(area, session),
        None if session.is_settled() => Decision::Allow,
        None => Decision::Loading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn user(user_type: &str, superuser: bool, has_shop: Option<bool>) -> User {
        serde_json::from_value(serde_json::json!({
            "id": "u1",
            "username": "lee",
            "user_type": user_type,
            "is_superuser": superuser,
            "has_shop": has_shop,
        }))
        .unwrap()
    }

    fn signed_in(user_type: &str, superuser: bool, has_shop: Option<bool>) -> Session {
        Session::authenticated(user(user_type, superuser, has_shop), "token".to_string())
    }

    #[test]
    fn test_loading_never_redirects() {
        let loading = Session::loading();
        for area in [Area::Admin, Area::ProviderDashboard, Area::ToolCreate, Area::ShopCreate] {
            assert_eq!(evaluate(area, &loading), Decision::Loading);
        }
        assert_eq!(evaluate_path("/tools", &loading), Decision::Loading);
    }

    #[test]
    fn test_anonymous_goes_to_login() {
        let anon = Session::anonymous();
        assert_eq!(evaluate(Area::Admin, &anon), Decision::Redirect("/login"));
        assert_eq!(evaluate(Area::Bookings, &anon), Decision::Redirect("/login"));
        assert_eq!(evaluate_path("/tools", &anon), Decision::Allow);
    }

    #[test]
    fn test_admin_area() {
        assert_eq!(
            evaluate(Area::Admin, &signed_in("renter", false, None)),
            Decision::Redirect("/")
        );
        assert_eq!(evaluate(Area::Admin, &signed_in("renter", true, None)), Decision::Allow);
    }

    #[test]
    fn test_dashboard_redirects_by_role() {
        assert_eq!(
            evaluate(Area::ProviderDashboard, &signed_in("provider", true, Some(true))),
            Decision::Redirect("/admin")
        );
        assert_eq!(
            evaluate(Area::ProviderDashboard, &signed_in("renter", false, None)),
            Decision::Redirect("/bookings")
        );
        assert_eq!(
            evaluate(Area::ProviderDashboard, &signed_in("provider", false, Some(false))),
            Decision::Redirect("/shops/new")
        );
        assert_eq!(
            evaluate(Area::ProviderDashboard, &signed_in("provider", false, Some(true))),
            Decision::Allow
        );
    }

    #[test]
    fn test_tool_and_shop_areas() {
        let renter = signed_in("renter", false, None);
        let shopless = signed_in("provider", false, None);
        let provider = signed_in("provider", false, Some(true));

        assert_eq!(evaluate(Area::ToolCreate, &renter), Decision::Redirect("/tools"));
        assert_eq!(evaluate(Area::ToolCreate, &shopless), Decision::Redirect("/shops/new"));
        assert_eq!(evaluate(Area::ToolCreate, &provider), Decision::Allow);
        assert_eq!(evaluate(Area::ToolEdit, &renter), Decision::Redirect("/tools"));
        assert_eq!(evaluate(Area::ToolEdit, &shopless), Decision::Allow);

        assert_eq!(evaluate(Area::ShopCreate, &provider), Decision::Redirect("/dashboard"));
        assert_eq!(evaluate(Area::ShopCreate, &shopless), Decision::Allow);
    }

    #[test]
    fn test_area_for_path() {
        assert_eq!(area_for_path("/admin/users/7"), Some(Area::Admin));
        assert_eq!(area_for_path("/dashboard/"), Some(Area::ProviderDashboard));
        assert_eq!(area_for_path("/tools/new"), Some(Area::ToolCreate));
        assert_eq!(area_for_path("/tools/edit/3"), Some(Area::ToolEdit));
        assert_eq!(area_for_path("/shops/new?from=nav"), Some(Area::ShopCreate));
        assert_eq!(area_for_path("/tools/3"), None);
        assert_eq!(area_for_path("/administrator"), None);
    }

    #[test]
    fn test_render_follows_decision() {
        assert_eq!(Decision::Loading.render(|| 1), Render::Placeholder);
        assert_eq!(Decision::Redirect("/login").render(|| 1), Render::Nothing);
        assert_eq!(Decision::Allow.render(|| 1), Render::Content(1));
    }
}
