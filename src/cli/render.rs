use crate::config::AppConfig;
use crate::models::{Booking, Shop, Tool, User};
use crate::services::media::media_url;
use crate::services::pricing::Quote;
use crate::views::admin::StatCard;
use crate::views::dashboard::DashboardStats;
use crate::views::navbar::NavLink;
use crate::views::{Outcome, ToastKind};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn outcome(outcome: &Outcome) {
    if let Some(toast) = &outcome.toast {
        match toast.kind {
            ToastKind::Success => println!("✔ {}", toast.message),
            ToastKind::Error => eprintln!("✖ {}", toast.message),
        }
    }
    if let Some(path) = &outcome.navigate {
        println!("→ {path}");
    }
}

pub fn inline_error(error: Option<&str>) {
    if let Some(error) = error {
        eprintln!("✖ {error}");
    }
}

pub fn user(user: &User) {
    println!("{} (@{})", user.display_name(), user.username);
    println!("  email      {}", user.email);
    println!("  role       {}", user.user_type.as_str());
    if user.is_superuser {
        println!("  admin      yes");
    }
    if let Some(has_shop) = user.has_shop {
        println!("  shop       {}", if has_shop { "yes" } else { "no" });
    }
    if let Some(status) = user.subscription_status {
        println!("  plan       {}", status.as_str());
    }
    println!(
        "  verified   {}  active {}",
        if user.is_verified { "yes" } else { "no" },
        if user.is_active { "yes" } else { "no" }
    );
}

pub fn tool_row(tool: &Tool) {
    let shop = tool.shop.as_ref().map(|s| s.name.as_str()).unwrap_or("-");
    println!(
        "{:<38} {:<28} ₹{:>8.2}/day  qty {:<3} {}",
        tool.id, tool.name, tool.price_per_day, tool.quantity_available, shop
    );
}

pub fn tools(tools: &[&Tool]) {
    if tools.is_empty() {
        println!("no tools found");
        return;
    }
    for tool in tools {
        tool_row(tool);
    }
}

pub fn tool_detail(config: &AppConfig, tool: &Tool, stock: &str) {
    println!("{}", tool.name);
    if let Some(category) = &tool.category {
        println!("  category   {}", category.name);
    }
    if !tool.description.is_empty() {
        println!("  {}", tool.description);
    }
    println!("  price      ₹{:.2}/day", tool.price_per_day);
    if let Some(hourly) = tool.price_per_hour {
        println!("             ₹{hourly:.2}/hour");
    }
    if let Some(weekly) = tool.price_per_week {
        println!("             ₹{weekly:.2}/week");
    }
    println!("  deposit    ₹{:.2}", tool.deposit());
    println!("  stock      {stock}");
    if let Some(shop) = &tool.shop {
        shop_line(shop);
    }
    let image = media_url(config, tool.primary_image());
    if !image.is_empty() {
        println!("  image      {image}");
    }
}

fn shop_line(shop: &Shop) {
    let distance = shop
        .distance
        .map(|d| format!(" ({d:.1} km)"))
        .unwrap_or_default();
    println!("  shop       {}{} {}", shop.name, distance, shop.address);
}

pub fn shops(shops: &[Shop]) {
    if shops.is_empty() {
        println!("no shops found");
        return;
    }
    for shop in shops {
        let rating = shop
            .rating_average
            .map(|r| format!("★{r:.1} ({})", shop.total_ratings))
            .unwrap_or_else(|| "unrated".to_string());
        println!("{:<38} {:<28} {}", shop.id, shop.name, rating);
        shop_line(shop);
    }
}

pub fn shop_detail(shop: &Shop) {
    println!("{}", shop.name);
    if !shop.description.is_empty() {
        println!("  {}", shop.description);
    }
    shop_line(shop);
    if let Some(phone) = &shop.phone {
        println!("  phone      {phone}");
    }
    if let Some(email) = &shop.email {
        println!("  email      {email}");
    }
    if let Some(count) = shop.tools_count {
        println!("  tools      {count}");
    }
}

pub fn quote(quote: &Quote) {
    println!(
        "{} day(s)  rental ₹{:.2}  deposit ₹{:.2}  total ₹{:.2}",
        quote.days, quote.rental, quote.deposit, quote.total
    );
}

pub fn booking(booking: &Booking, actions: &[&str]) {
    println!(
        "{:<38} {:<24} {} → {}  x{}  ₹{:.2}  {}/{}  {}",
        booking.id,
        booking.tool_name(),
        booking.start_datetime.format(DATE_FORMAT),
        booking.end_datetime.format(DATE_FORMAT),
        booking.quantity,
        booking.total_amount,
        booking.status.as_str(),
        booking.payment_status.as_str(),
        booking.payment_method.as_str(),
    );
    if !actions.is_empty() {
        println!("    actions: {}", actions.join(", "));
    }
}

pub fn dashboard(stats: &DashboardStats, banner: bool) {
    println!("revenue    ₹{:.2}", stats.total_revenue);
    println!("active     {}", stats.active_rentals);
    println!("pending    {}", stats.pending_requests);
    println!("inventory  {}", stats.total_inventory);
    if banner {
        println!();
        println!("Unlock Provider Features");
        println!("Subscribe now to start listing your tools and earning money. Run `toolsy subscribe`.");
    }
}

pub fn stat_cards(cards: &[StatCard]) {
    for card in cards {
        println!("{:<20} {}", card.label, card.value);
    }
}

pub fn nav(brand: &str, links: &[NavLink]) {
    let links: Vec<String> = links
        .iter()
        .map(|l| format!("{} ({})", l.label, l.href))
        .collect();
    println!("Toolsy ({brand})  {}", links.join("  "));
}
