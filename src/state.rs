use std::sync::Arc;

use crate::api::cookies::SessionSettings;
use crate::application::services::{CustomerService, SessionAuthenticator};
use crate::domain::entities::{Admin, Customer};
use crate::domain::rate_limit::RateLimiterRegistry;
use crate::domain::repositories::HealthRepository;

#[derive(Clone)]
pub struct AppState {
    pub admin_auth: Arc<SessionAuthenticator<Admin>>,
    pub customer_auth: Arc<SessionAuthenticator<Customer>>,
    pub customer_service: Arc<CustomerService>,
    pub rate_limiter: Arc<RateLimiterRegistry>,
    pub health: Arc<dyn HealthRepository>,
    pub session: SessionSettings,
}
