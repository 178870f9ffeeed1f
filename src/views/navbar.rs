use crate::services::policy::{self, ADMIN, BOOKINGS, DASHBOARD, HOME, TOOLS, TOOL_NEW};
use crate::services::session::{Session, SessionStore};

use super::{Outcome, Toast};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

const fn link(label: &'static str, href: &'static str) -> NavLink {
    NavLink { label, href }
}

/// Brand link target for the current user.
pub fn brand_href(session: &Session) -> &'static str {
    policy::home_path(session.user())
}

/// Links shown for the current role. Logout is handled separately.
pub fn links(session: &Session) -> Vec<NavLink> {
    let mut links = vec![link("Tools", TOOLS)];
    let Some(user) = session.user() else {
        links.push(link("Login", "/login"));
        links.push(link("Join Now", "/register"));
        return links;
    };

    if user.is_superuser {
        links.push(link("Admin", ADMIN));
        return links;
    }
    links.push(link("Bookings", BOOKINGS));
    if policy::is_provider(Some(user)) {
        links.push(link("Deploy", TOOL_NEW));
        links.push(link("Dashboard", DASHBOARD));
    }
    links
}

pub fn logout(session: &SessionStore) -> Outcome {
    session.logout();
    Outcome::toast(Toast::success("Logged out successfully")).then(HOME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn session(user_type: &str, superuser: bool) -> Session {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "username": "nav",
            "user_type": user_type,
            "is_superuser": superuser,
        }))
        .unwrap();
        Session::authenticated(user, "t".to_string())
    }

    fn hrefs(links: &[NavLink]) -> Vec<&'static str> {
        links.iter().map(|l| l.href).collect()
    }

    #[test]
    fn test_links_by_role() {
        assert_eq!(hrefs(&links(&Session::anonymous())), ["/tools", "/login", "/register"]);
        assert_eq!(hrefs(&links(&session("renter", false))), ["/tools", "/bookings"]);
        assert_eq!(
            hrefs(&links(&session("provider", false))),
            ["/tools", "/bookings", "/tools/new", "/dashboard"]
        );
        assert_eq!(hrefs(&links(&session("provider", true))), ["/tools", "/admin"]);
    }

    #[test]
    fn test_brand_href() {
        assert_eq!(brand_href(&Session::anonymous()), "/");
        assert_eq!(brand_href(&session("renter", false)), "/tools");
        assert_eq!(brand_href(&session("provider", true)), "/admin");
    }
}
