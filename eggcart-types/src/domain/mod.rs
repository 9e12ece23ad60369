//! Domain models for the checkout core.

pub mod email;
pub mod order;
pub mod otp;

pub use email::EmailAddress;
pub use order::{LocalOrder, OrderId, OrderItem, OrderStatus, PaymentStatus, to_minor_units};
pub use otp::{OtpCode, OtpRecord};
