//! Authenticated identity attached to a request.

use super::{Admin, Customer};

/// The principal resolved from a session cookie.
///
/// Inserted into request extensions by the session middleware and read back by
/// the typed extractors in [`crate::api::extractors`].
#[derive(Debug, Clone)]
pub enum Principal {
    Admin(Admin),
    Customer(Customer),
}

impl From<Admin> for Principal {
    fn from(admin: Admin) -> Self {
        Self::Admin(admin)
    }
}

impl From<Customer> for Principal {
    fn from(customer: Customer) -> Self {
        Self::Customer(customer)
    }
}
