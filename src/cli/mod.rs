//! Terminal front end: one command per invocation, rendered as plain text.

pub mod checkout;
pub mod command;
pub mod render;

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context};

pub use checkout::TerminalCheckout;
pub use command::{parse, AdminCommand, Command, USAGE};

use crate::models::{ImageUpload, ProfileUpdate, SubscriptionUpdate, UserType};
use crate::services::guards::{self, Decision};
use crate::state::AppState;
use crate::views::admin::{AdminBookingsView, AdminOverviewView, AdminUserDetailView, AdminUsersView};
use crate::views::auth::{LoginView, ProfileView, RegisterView};
use crate::views::bookings::BookingsView;
use crate::views::dashboard::{DashboardView, SubscriptionBanner};
use crate::views::shops::{ManageShopView, NewShopView, ShopsView};
use crate::views::tool_form::{ToolDraft, ToolEditorView};
use crate::views::tools::{ToolDetailView, ToolsView};
use crate::views::{navbar, parse_datetime};

/// Reads one line from stdin without blocking the runtime.
pub(crate) async fn prompt(label: &str) -> std::io::Result<String> {
    let label = label.to_string();
    tokio::task::spawn_blocking(move || -> std::io::Result<String> {
        let mut out = std::io::stdout();
        write!(out, "{label}")?;
        out.flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Ok(line.trim().to_string())
    })
    .await
    .map_err(std::io::Error::other)?
}

/// Prompt showing the current value; an empty answer keeps it.
async fn prompt_default(label: &str, current: &str) -> std::io::Result<String> {
    let answer = prompt(&format!("{label} [{current}]: ")).await?;
    Ok(if answer.is_empty() {
        current.to_string()
    } else {
        answer
    })
}

/// Commands that work whatever the session state.
fn is_public(command: &Command) -> bool {
    matches!(
        command,
        Command::Login(_) | Command::Register | Command::Logout | Command::WhoAmI | Command::Nav | Command::Help
    )
}

pub async fn run(state: Arc<AppState>, args: &[String]) -> anyhow::Result<()> {
    let command = parse(args)?;
    if command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let settled = state.session.initialize().await;
    tracing::debug!(state = settled.as_str(), "session ready");

    if !is_public(&command) {
        match guards::evaluate_path(&command.route(), &state.session.snapshot()) {
            Decision::Allow => {}
            Decision::Redirect(to) => {
                println!("→ {to}");
                return Ok(());
            }
            Decision::Loading => bail!("session did not settle"),
        }
    }

    dispatch(state, command).await
}

async fn dispatch(state: Arc<AppState>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Help => println!("{USAGE}"),
        Command::Login(username) => login(state, username).await?,
        Command::Register => register(state).await?,
        Command::Logout => render::outcome(&navbar::logout(&state.session)),
        Command::WhoAmI => match state.session.user() {
            Some(user) => render::user(&user),
            None => println!("not signed in"),
        },
        Command::Nav => {
            let session = state.session.snapshot();
            render::nav(navbar::brand_href(&session), &navbar::links(&session));
        }
        Command::Tools(search) => {
            let mut view = ToolsView::new(state);
            view.search = search;
            view.load().await;
            render::inline_error(view.error.as_deref());
            render::tools(&view.visible());
        }
        Command::Nearby { lat, lng, radius } => {
            let mut view = ToolsView::new(state);
            view.load_nearby(lat, lng, radius).await;
            render::inline_error(view.error.as_deref());
            render::tools(&view.visible());
        }
        Command::Tool(id) => {
            let mut view = ToolDetailView::new(state.clone());
            view.load(&id).await;
            match &view.tool {
                Some(tool) => render::tool_detail(&state.config, tool, &view.stock_label()),
                None => render::inline_error(view.error.as_deref()),
            }
        }
        Command::Quote { id, start, end, quantity } => {
            let mut view = ToolDetailView::new(state);
            view.load(&id).await;
            if view.tool.is_none() {
                render::inline_error(view.error.as_deref());
                return Ok(());
            }
            view.booking.start = Some(parse_datetime(&start)?);
            view.booking.end = Some(parse_datetime(&end)?);
            view.set_quantity(quantity);
            match view.quote() {
                Some(quote) => render::quote(&quote),
                None => println!("end must be after start"),
            }
        }
        Command::Book { id, start, end, quantity, method } => {
            let mut view = ToolDetailView::new(state);
            view.load(&id).await;
            if view.tool.is_none() {
                render::inline_error(view.error.as_deref());
                return Ok(());
            }
            view.booking.start = Some(parse_datetime(&start)?);
            view.booking.end = Some(parse_datetime(&end)?);
            view.booking.quantity = quantity;
            view.booking.payment_method = method;
            if let Some(quote) = view.quote() {
                render::quote(&quote);
            }
            println!("{}", method.hint());
            render::outcome(&view.submit().await);
        }
        Command::Bookings => {
            let mut view = BookingsView::new(state);
            view.load().await;
            render::inline_error(view.error.as_deref());
            if view.bookings.is_empty() && view.error.is_none() {
                println!("no bookings yet");
            }
            for booking in &view.bookings {
                let actions = view.actions(booking);
                let mut labels = Vec::new();
                if actions.confirm {
                    labels.push("confirm");
                }
                if actions.cancel {
                    labels.push(view.cancel_label());
                }
                if actions.pay {
                    labels.push("pay");
                }
                render::booking(booking, &labels);
            }
        }
        Command::Confirm(id) => {
            let mut view = BookingsView::new(state);
            render::outcome(&view.confirm(&id).await);
        }
        Command::Cancel(id) => {
            let mut view = BookingsView::new(state);
            render::outcome(&view.cancel(&id).await);
        }
        Command::Pay(id) => {
            let mut view = BookingsView::new(state);
            view.load().await;
            render::outcome(&view.pay(&id).await);
        }
        Command::Dashboard => {
            let mut view = DashboardView::new(state);
            view.load().await;
            render::inline_error(view.error.as_deref());
            render::dashboard(&view.stats, view.show_subscription_banner());
        }
        Command::Subscribe => {
            let mut banner = SubscriptionBanner::new(state);
            if !banner.visible() {
                println!("subscription already active");
                return Ok(());
            }
            render::outcome(&banner.subscribe().await);
        }
        Command::Shops(search) => {
            let mut view = ShopsView::new(state);
            view.search = search;
            view.load().await;
            render::inline_error(view.error.as_deref());
            render::shops(&view.shops);
        }
        Command::ShopsNearby { lat, lng, radius } => {
            let mut view = ShopsView::new(state);
            view.load_nearby(lat, lng, radius).await;
            render::inline_error(view.error.as_deref());
            render::shops(&view.shops);
        }
        Command::ShopInfo(id) => {
            let mut view = ShopsView::new(state);
            view.load_one(&id).await;
            match &view.selected {
                Some(shop) => render::shop_detail(shop),
                None => render::inline_error(view.error.as_deref()),
            }
        }
        Command::Profile => profile(state).await?,
        Command::Shop => manage_shop(state).await?,
        Command::ShopNew => new_shop(state).await?,
        Command::ToolNew => {
            let mut view = ToolEditorView::create(state);
            edit_tool(&mut view).await?;
        }
        Command::ToolEdit(id) => {
            let mut view = ToolEditorView::edit(state, &id);
            let loaded = view.load().await;
            if loaded.navigate.is_some() {
                render::outcome(&loaded);
                return Ok(());
            }
            edit_tool(&mut view).await?;
        }
        Command::ToolDelete(id) => {
            let mut view = ToolEditorView::edit(state, &id);
            render::outcome(&view.delete().await);
        }
        Command::Admin(admin) => run_admin(state, admin).await?,
    }
    Ok(())
}

async fn login(state: Arc<AppState>, username: Option<String>) -> anyhow::Result<()> {
    let mut view = LoginView::new(state);
    view.username = match username {
        Some(u) => u,
        None => prompt("username: ").await?,
    };
    view.password = prompt("password: ").await?;
    let outcome = view.submit().await;
    render::inline_error(view.status.error.as_deref());
    render::outcome(&outcome);
    Ok(())
}

async fn register(state: Arc<AppState>) -> anyhow::Result<()> {
    let mut view = RegisterView::new(state);
    view.form.username = prompt("username: ").await?;
    view.form.email = prompt("email: ").await?;
    view.form.first_name = prompt("first name: ").await?;
    view.form.last_name = prompt("last name: ").await?;
    let role = prompt("account type (renter/provider) [renter]: ").await?;
    view.form.user_type = if role.is_empty() {
        UserType::Renter
    } else {
        UserType::parse(&role).with_context(|| format!("unknown account type: {role}"))?
    };
    view.form.phone = prompt("phone (optional): ").await?;
    view.form.password = prompt("password: ").await?;
    view.form.password_confirm = prompt("confirm password: ").await?;

    let outcome = view.submit().await;
    render::inline_error(view.status.error.as_deref());
    render::outcome(&outcome);
    Ok(())
}

/// Empty answers keep the current value and are left out of the update.
async fn profile(state: Arc<AppState>) -> anyhow::Result<()> {
    let Some(user) = state.session.user() else {
        println!("→ {}", crate::services::policy::LOGIN);
        return Ok(());
    };
    let changed = |current: &str, answer: String| (answer != current).then_some(answer);

    let email = prompt_default("email", &user.email).await?;
    let first_name = prompt_default("first name", &user.first_name).await?;
    let last_name = prompt_default("last name", &user.last_name).await?;
    let phone_now = user.phone.clone().unwrap_or_default();
    let phone = prompt_default("phone", &phone_now).await?;

    let mut view = ProfileView::new(state);
    view.form = ProfileUpdate {
        email: changed(&user.email, email),
        first_name: changed(&user.first_name, first_name),
        last_name: changed(&user.last_name, last_name),
        phone: changed(&phone_now, phone),
        ..ProfileUpdate::default()
    };
    let outcome = view.submit().await;
    render::inline_error(view.status.error.as_deref());
    render::outcome(&outcome);
    Ok(())
}

async fn new_shop(state: Arc<AppState>) -> anyhow::Result<()> {
    let mut view = NewShopView::new(state.clone());
    if let Some(user) = state.session.user() {
        view.form.email = user.email.clone();
        view.form.phone = user.phone.clone().unwrap_or_default();
    }
    view.form.name = prompt("shop name: ").await?;
    view.form.description = prompt("description: ").await?;
    view.form.address = prompt("address: ").await?;
    view.form.phone = prompt_default("phone", &view.form.phone).await?;
    view.form.email = prompt_default("email", &view.form.email).await?;
    view.form.location_lat = prompt_default("latitude", "0").await?.parse().context("invalid latitude")?;
    view.form.location_lng = prompt_default("longitude", "0").await?.parse().context("invalid longitude")?;

    let outcome = view.submit().await;
    render::inline_error(view.status.error.as_deref());
    render::outcome(&outcome);
    Ok(())
}

async fn manage_shop(state: Arc<AppState>) -> anyhow::Result<()> {
    let mut view = ManageShopView::new(state);
    let loaded = view.load().await;
    if loaded.toast.is_some() || loaded.navigate.is_some() {
        render::outcome(&loaded);
        return Ok(());
    }

    let form = &mut view.form;
    form.name = prompt_default("shop name", &form.name).await?;
    form.description = prompt_default("description", &form.description).await?;
    form.address = prompt_default("address", &form.address).await?;
    form.phone = prompt_default("phone", &form.phone).await?;
    form.email = prompt_default("email", &form.email).await?;
    form.location_lat = prompt_default("latitude", &form.location_lat.to_string())
        .await?
        .parse()
        .context("invalid latitude")?;
    form.location_lng = prompt_default("longitude", &form.location_lng.to_string())
        .await?
        .parse()
        .context("invalid longitude")?;

    render::outcome(&view.save().await);
    Ok(())
}

async fn edit_tool(view: &mut ToolEditorView) -> anyhow::Result<()> {
    view.load_categories().await;
    for category in &view.categories {
        println!("  [{}] {}", category.id, category.name);
    }
    if let Some(preview) = &view.preview {
        println!("current image: {preview}");
    }

    let current = view.draft.clone();
    let mut draft = ToolDraft {
        name: prompt_default("name", &current.name).await?,
        description: prompt_default("description", &current.description).await?,
        price_per_day: prompt_default("price per day", &current.price_per_day).await?,
        deposit_amount: prompt_default("deposit", &current.deposit_amount).await?,
        quantity_available: prompt_default("quantity", &current.quantity_available).await?,
        category_id: prompt_default("category id", &current.category_id).await?,
        image: None,
    };
    let image = prompt("image file (optional): ").await?;
    if !image.is_empty() {
        let upload = ImageUpload::from_path(std::path::Path::new(&image))
            .with_context(|| format!("failed to read {image}"))?;
        draft.image = Some(upload);
    }
    view.draft = draft;

    render::outcome(&view.submit().await);
    Ok(())
}

async fn run_admin(state: Arc<AppState>, command: AdminCommand) -> anyhow::Result<()> {
    match command {
        AdminCommand::Overview => {
            let mut view = AdminOverviewView::new(state);
            view.load().await;
            render::inline_error(view.error.as_deref());
            render::stat_cards(&view.cards());
        }
        AdminCommand::Users(search) => {
            let mut view = AdminUsersView::new(state);
            view.search = search;
            view.load().await;
            render::inline_error(view.error.as_deref());
            for user in &view.users {
                println!(
                    "{:<38} {:<20} {:<9} verified:{} active:{}",
                    user.id,
                    user.username,
                    user.user_type.as_str(),
                    user.is_verified,
                    user.is_active
                );
            }
        }
        AdminCommand::ToggleVerify(id) => {
            let mut view = AdminUsersView::new(state);
            render::outcome(&view.toggle_verify(&id).await);
        }
        AdminCommand::ToggleActive(id) => {
            let mut view = AdminUsersView::new(state);
            render::outcome(&view.toggle_active(&id).await);
        }
        AdminCommand::Delete(id) => {
            let mut view = AdminUserDetailView::new(state, &id);
            render::outcome(&view.delete().await);
        }
        AdminCommand::User(id) => {
            let mut view = AdminUserDetailView::new(state, &id);
            view.load().await;
            render::inline_error(view.error.as_deref());
            if let Some(user) = &view.user {
                render::user(user);
            }
            if let Some(subscription) = &view.subscription {
                let end = subscription
                    .end_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("  subscription {} until {end}", subscription.status.as_str());
            }
            for tool in &view.tools {
                render::tool_row(tool);
            }
        }
        AdminCommand::Subscription { id, status, end_date } => {
            let end_date = end_date.as_deref().map(parse_datetime).transpose()?;
            let mut view = AdminUserDetailView::new(state, &id);
            let update = SubscriptionUpdate {
                status: Some(status),
                end_date,
            };
            render::outcome(&view.update_subscription(update).await);
        }
        AdminCommand::Bookings(search) => {
            let mut view = AdminBookingsView::new(state);
            view.search = search;
            view.load().await;
            render::inline_error(view.error.as_deref());
            for booking in &view.bookings {
                render::booking(booking, &[]);
            }
        }
    }
    Ok(())
}
