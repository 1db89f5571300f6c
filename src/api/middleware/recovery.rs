//! Converts handler panics into 500 responses.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::FutureExt;
use serde_json::json;
use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::AssertUnwindSafe;

use crate::error::AppError;

/// Outermost middleware: runs the rest of the stack and catches any unwind.
///
/// A panicking request gets a generic `500 Internal server error` body; the
/// panic message is logged with the request method and path. The backtrace is
/// logged at the panic site by [`install_panic_hook`].
///
/// Requires `panic = "unwind"` (the default) in the build profile.
pub async fn layer(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            tracing::error!(
                %method,
                %path,
                panic = %panic_message(payload.as_ref()),
                "Panic recovered"
            );
            AppError::internal("Internal server error", json!({})).into_response()
        }
    }
}

/// Replaces the default panic hook with one that logs through `tracing`.
///
/// The event carries the panic location and a captured backtrace and is emitted
/// inside whatever span was current when the panic happened, so request fields
/// are attached.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let backtrace = Backtrace::force_capture();

        tracing::error!(
            %location,
            panic = %panic_message(info.payload()),
            %backtrace,
            "Panic"
        );
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_variants() {
        let static_str: Box<dyn Any + Send> = Box::new("boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        let other: Box<dyn Any + Send> = Box::new(42_u32);

        assert_eq!(panic_message(static_str.as_ref()), "boom");
        assert_eq!(panic_message(owned.as_ref()), "owned boom");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }
}
