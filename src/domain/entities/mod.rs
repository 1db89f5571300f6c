//! Core domain entities.
//!
//! - [`Admin`] and [`Customer`] - the two principal types, each with its own store
//!   and session namespace
//! - [`Account`] - the behaviour the session authenticator needs from either
//! - [`Session`] - server-side record binding a secret token to a principal
//! - [`Principal`] - tagged variant injected into authenticated requests

pub mod account;
pub mod admin;
pub mod customer;
pub mod principal;
pub mod session;

pub use account::Account;
pub use admin::{Admin, AdminRole, NewAdmin};
pub use customer::{Customer, NewCustomer};
pub use principal::Principal;
pub use session::{NewSession, REFRESH_AFTER, Session};
