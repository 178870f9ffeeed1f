use anyhow::{anyhow, bail, Context};

use crate::models::{PaymentMethod, SubscriptionStatus};
use crate::services::policy::{
    ADMIN, BOOKINGS, DASHBOARD, HOME, LOGIN, PROFILE, SHOPS, SHOP_MANAGE, SHOP_NEW, TOOLS, TOOL_NEW,
};

pub const USAGE: &str = "usage: toolsy <command> [args]

commands:
  login [username]                 sign in (password is prompted)
  register                         create an account
  logout | whoami | nav
  tools [search]                   browse the catalogue
  nearby <lat> <lng> [radius_km]   tools close to a point
  tool <id>                        tool details
  quote <id> <start> <end> [qty]   price a rental
  book <id> <start> <end> [qty] [cash]
  bookings | confirm <id> | cancel <id> | pay <id>
  dashboard | subscribe
  shops [search] | shops nearby <lat> <lng> [radius_km]
  shop-info <id>                   shop details
  shop | shop new
  profile                          edit your contact details
  tool-new | tool-edit <id> | tool-delete <id>
  admin [users [search] | bookings [search] | user <id>]
  admin verify|activate|delete <id>
  admin subscription <id> <status> [end_date]";

#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    Overview,
    Users(String),
    Bookings(String),
    User(String),
    ToggleVerify(String),
    ToggleActive(String),
    Delete(String),
    Subscription {
        id: String,
        status: SubscriptionStatus,
        end_date: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login(Option<String>),
    Register,
    Logout,
    WhoAmI,
    Nav,
    Tools(String),
    Nearby { lat: f64, lng: f64, radius: Option<f64> },
    Tool(String),
    Quote { id: String, start: String, end: String, quantity: u32 },
    Book {
        id: String,
        start: String,
        end: String,
        quantity: u32,
        method: PaymentMethod,
    },
    Bookings,
    Confirm(String),
    Cancel(String),
    Pay(String),
    Dashboard,
    Subscribe,
    Shops(String),
    ShopsNearby { lat: f64, lng: f64, radius: Option<f64> },
    ShopInfo(String),
    Shop,
    ShopNew,
    Profile,
    ToolNew,
    ToolEdit(String),
    ToolDelete(String),
    Admin(AdminCommand),
    Help,
}

impl Command {
    /// Route the command renders, used for guard checks.
    pub fn route(&self) -> String {
        match self {
            Command::Login(_) | Command::Register => LOGIN.to_string(),
            Command::Logout | Command::WhoAmI | Command::Nav | Command::Help => HOME.to_string(),
            Command::Tools(_) | Command::Nearby { .. } => TOOLS.to_string(),
            Command::Tool(id) | Command::Quote { id, .. } | Command::Book { id, .. } => {
                format!("{TOOLS}/{id}")
            }
            Command::Bookings | Command::Confirm(_) | Command::Cancel(_) | Command::Pay(_) => {
                BOOKINGS.to_string()
            }
            Command::Dashboard | Command::Subscribe => DASHBOARD.to_string(),
            Command::Shops(_) | Command::ShopsNearby { .. } => SHOPS.to_string(),
            Command::ShopInfo(id) => format!("{SHOPS}/{id}"),
            Command::Profile => PROFILE.to_string(),
            Command::Shop => SHOP_MANAGE.to_string(),
            Command::ShopNew => SHOP_NEW.to_string(),
            Command::ToolNew => TOOL_NEW.to_string(),
            Command::ToolEdit(id) | Command::ToolDelete(id) => format!("{TOOLS}/edit/{id}"),
            Command::Admin(AdminCommand::Overview) => ADMIN.to_string(),
            Command::Admin(AdminCommand::Bookings(_)) => format!("{ADMIN}/bookings"),
            Command::Admin(_) => format!("{ADMIN}/users"),
        }
    }
}

fn arg<'a>(args: &'a [String], i: usize, name: &str) -> anyhow::Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing <{name}>\n\n{USAGE}"))
}

fn rest(args: &[String], from: usize) -> String {
    args.get(from..).unwrap_or_default().join(" ")
}

/// `<lat> <lng> [radius_km]`
fn point(args: &[String]) -> anyhow::Result<(f64, f64, Option<f64>)> {
    let lat = arg(args, 0, "lat")?.parse().context("invalid latitude")?;
    let lng = arg(args, 1, "lng")?.parse().context("invalid longitude")?;
    let radius = args
        .get(2)
        .map(|r| r.parse().context("invalid radius"))
        .transpose()?;
    Ok((lat, lng, radius))
}

fn quantity(args: &[String], i: usize) -> anyhow::Result<u32> {
    match args.get(i) {
        Some(q) => q.parse().with_context(|| format!("invalid quantity: {q}")),
        None => Ok(1),
    }
}

pub fn parse(args: &[String]) -> anyhow::Result<Command> {
    let Some(name) = args.first() else {
        return Ok(Command::Help);
    };
    let command = match name.as_str() {
        "login" => Command::Login(args.get(1).cloned()),
        "register" => Command::Register,
        "logout" => Command::Logout,
        "whoami" => Command::WhoAmI,
        "nav" => Command::Nav,
        "tools" => Command::Tools(rest(args, 1)),
        "nearby" => {
            let (lat, lng, radius) = point(&args[1..])?;
            Command::Nearby { lat, lng, radius }
        }
        "shops" => match args.get(1).map(String::as_str) {
            Some("nearby") => {
                let (lat, lng, radius) = point(&args[2..])?;
                Command::ShopsNearby { lat, lng, radius }
            }
            _ => Command::Shops(rest(args, 1)),
        },
        "shop-info" => Command::ShopInfo(arg(args, 1, "id")?.to_string()),
        "profile" => Command::Profile,
        "tool" => Command::Tool(arg(args, 1, "id")?.to_string()),
        "quote" => Command::Quote {
            id: arg(args, 1, "id")?.to_string(),
            start: arg(args, 2, "start")?.to_string(),
            end: arg(args, 3, "end")?.to_string(),
            quantity: quantity(args, 4)?,
        },
        "book" => Command::Book {
            id: arg(args, 1, "id")?.to_string(),
            start: arg(args, 2, "start")?.to_string(),
            end: arg(args, 3, "end")?.to_string(),
            quantity: quantity(args, 4)?,
            method: match args.get(5).map(String::as_str) {
                None | Some("razorpay") => PaymentMethod::Razorpay,
                Some("cash") | Some("cash_on_return") => PaymentMethod::CashOnReturn,
                Some(other) => bail!("unknown payment method: {other}"),
            },
        },
        "bookings" => Command::Bookings,
        "confirm" => Command::Confirm(arg(args, 1, "id")?.to_string()),
        "cancel" => Command::Cancel(arg(args, 1, "id")?.to_string()),
        "pay" => Command::Pay(arg(args, 1, "id")?.to_string()),
        "dashboard" => Command::Dashboard,
        "subscribe" => Command::Subscribe,
        "shop" => match args.get(1).map(String::as_str) {
            Some("new") => Command::ShopNew,
            _ => Command::Shop,
        },
        "tool-new" => Command::ToolNew,
        "tool-edit" => Command::ToolEdit(arg(args, 1, "id")?.to_string()),
        "tool-delete" => Command::ToolDelete(arg(args, 1, "id")?.to_string()),
        "admin" => Command::Admin(parse_admin(&args[1..])?),
        "help" | "-h" | "--help" => Command::Help,
        other => bail!("unknown command: {other}\n\n{USAGE}"),
    };
    Ok(command)
}

fn parse_admin(args: &[String]) -> anyhow::Result<AdminCommand> {
    let Some(sub) = args.first() else {
        return Ok(AdminCommand::Overview);
    };
    let command = match sub.as_str() {
        "users" => AdminCommand::Users(rest(args, 1)),
        "bookings" => AdminCommand::Bookings(rest(args, 1)),
        "user" => AdminCommand::User(arg(args, 1, "id")?.to_string()),
        "verify" => AdminCommand::ToggleVerify(arg(args, 1, "id")?.to_string()),
        "activate" => AdminCommand::ToggleActive(arg(args, 1, "id")?.to_string()),
        "delete" => AdminCommand::Delete(arg(args, 1, "id")?.to_string()),
        "subscription" => {
            let status = arg(args, 2, "status")?;
            AdminCommand::Subscription {
                id: arg(args, 1, "id")?.to_string(),
                status: SubscriptionStatus::parse(status)
                    .ok_or_else(|| anyhow!("unknown subscription status: {status}"))?,
                end_date: args.get(3).cloned(),
            }
        }
        other => bail!("unknown admin command: {other}\n\n{USAGE}"),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_book() {
        let cmd = parse(&args("book t1 2024-01-01 2024-01-03 2 cash")).unwrap();
        assert_eq!(
            cmd,
            Command::Book {
                id: "t1".to_string(),
                start: "2024-01-01".to_string(),
                end: "2024-01-03".to_string(),
                quantity: 2,
                method: PaymentMethod::CashOnReturn,
            }
        );
        assert_eq!(cmd.route(), "/tools/t1");
    }

    #[test]
    fn test_parse_search_joins_words() {
        assert_eq!(
            parse(&args("tools hammer drill")).unwrap(),
            Command::Tools("hammer drill".to_string())
        );
        assert_eq!(
            parse(&args("admin users asha")).unwrap(),
            Command::Admin(AdminCommand::Users("asha".to_string()))
        );
    }

    #[test]
    fn test_routes_map_to_guarded_areas() {
        assert_eq!(parse(&args("dashboard")).unwrap().route(), "/dashboard");
        assert_eq!(parse(&args("tool-edit 9")).unwrap().route(), "/tools/edit/9");
        assert_eq!(parse(&args("admin user 4")).unwrap().route(), "/admin/users");
        assert_eq!(parse(&args("shop new")).unwrap().route(), "/shops/new");
        assert_eq!(parse(&args("shop-info s1")).unwrap().route(), "/shops/s1");
    }

    #[test]
    fn test_parse_nearby_shops() {
        assert_eq!(
            parse(&args("shops nearby 12.97 77.59 5")).unwrap(),
            Command::ShopsNearby {
                lat: 12.97,
                lng: 77.59,
                radius: Some(5.0),
            }
        );
        assert_eq!(
            parse(&args("nearby 12.97 77.59")).unwrap(),
            Command::Nearby {
                lat: 12.97,
                lng: 77.59,
                radius: None,
            }
        );
        assert!(parse(&args("shops nearby 12.97")).is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&args("confirm")).is_err());
        assert!(parse(&args("quote t1 2024-01-01 2024-01-02 many")).is_err());
        assert!(parse(&args("admin subscription u1 lifetime")).is_err());
        assert!(parse(&args("teleport")).is_err());
        assert_eq!(parse(&[]).unwrap(), Command::Help);
    }
}
