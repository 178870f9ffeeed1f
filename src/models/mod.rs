pub mod admin;
pub mod booking;
pub mod de;
pub mod listing;
pub mod payment;
pub mod shop;
pub mod subscription;
pub mod tool;
pub mod user;

pub use admin::{ActiveToggled, AdminStats, RecentActivity, VerifyToggled};
pub use booking::{Booking, BookingStatus, NewBooking, PaymentMethod, PaymentStatus};
pub use listing::Listing;
pub use payment::{PaymentOrder, PaymentResponse, StatusMessage};
pub use shop::{Shop, ShopInput};
pub use subscription::{Subscription, SubscriptionStatus, SubscriptionUpdate};
pub use tool::{Category, ImageUpload, Tool, ToolCondition, ToolForm};
pub use user::{AccessToken, ProfileUpdate, Registration, TokenPair, User, UserType};
