//! Session lifecycle notifications

/// Receives a callback when a 401 survives the refresh protocol and the
/// session is no longer usable. UI layers install a handler here to send the
/// user back to the login route; the pipeline itself never touches navigation.
pub trait SessionEvents: Send + Sync {
    fn on_session_expired(&self);
}

/// Default handler that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEvents;

impl SessionEvents for NoopEvents {
    fn on_session_expired(&self) {
        tracing::debug!("session expired with no handler installed");
    }
}

/// Hard-redirects the browser to the login route
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct RedirectToLogin;

#[cfg(target_arch = "wasm32")]
impl SessionEvents for RedirectToLogin {
    fn on_session_expired(&self) {
        if let Some(window) = web_sys::window()
            && window
                .location()
                .set_href(crate::config::ClientConfig::LOGIN_ROUTE)
                .is_err()
        {
            tracing::error!("failed to redirect to the login route");
        }
    }
}
