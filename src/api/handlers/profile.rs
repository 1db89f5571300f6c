use crate::api::dto::ApiResponse;
use crate::api::extractors::CurrentCustomer;
use crate::domain::entities::Customer;

/// Returns the authenticated customer.
///
/// `GET /api/v1/store/profile`
pub async fn profile_handler(CurrentCustomer(customer): CurrentCustomer) -> ApiResponse<Customer> {
    ApiResponse::ok("Profile retrieved successfully", customer)
}
