//! Aggregates module
pub mod product;
pub mod order;
pub mod newsletter;
pub mod blog;
pub mod user;

pub use product::{Product, Variant};
pub use order::{Order, CartItem};
pub use newsletter::NewsletterSubscriber;
pub use blog::BlogPost;
pub use user::User;
