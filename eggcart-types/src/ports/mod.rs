//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod gateway;
mod identity;
mod mailer;
mod repository;

pub use gateway::{GatewayOrder, PaymentGateway};
pub use identity::{IdentityProvider, NewUser};
pub use mailer::Mailer;
pub use repository::CheckoutRepository;
