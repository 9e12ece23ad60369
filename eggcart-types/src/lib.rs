//! # Eggcart Types
//!
//! Domain types and port traits for the eggcart checkout core.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (EmailAddress, OtpRecord, LocalOrder)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    EmailAddress, LocalOrder, OrderId, OrderItem, OrderStatus, OtpCode, OtpRecord, PaymentStatus,
};
pub use dto::*;
pub use error::{
    AppError, DomainError, GatewayError, IdentityError, MailerError, OtpError, PaymentError,
    RepoError,
};
pub use ports::{
    CheckoutRepository, GatewayOrder, IdentityProvider, Mailer, NewUser, PaymentGateway,
};
