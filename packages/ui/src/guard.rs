//! Gate for admin-only views.

use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::session::{AuthState, SessionStatus};

/// Where unauthenticated visitors of an admin view are sent.
pub const LOGIN_ROUTE: &str = "/admin/login";

/// Outcome of checking the session before rendering a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Session still initializing; render a placeholder.
    Pending,
    Admit,
    Redirect(&'static str),
}

pub fn admission(state: &AuthState) -> Admission {
    match state.status() {
        SessionStatus::Initializing => Admission::Pending,
        SessionStatus::Authenticated => Admission::Admit,
        SessionStatus::Unauthenticated => Admission::Redirect(LOGIN_ROUTE),
    }
}

/// Renders `children` only for an authenticated admin.
///
/// While the session initializes a loading placeholder is shown. Otherwise the
/// visitor is redirected to the login route, through `on_redirect` when given
/// (e.g. a router's `navigator().push`) or the browser location.
#[component]
pub fn ProtectedRoute(children: Element, on_redirect: Option<EventHandler<String>>) -> Element {
    let auth = use_auth();
    let decision = use_memo(move || admission(&auth.read()));

    use_effect(move || {
        if let Admission::Redirect(target) = decision() {
            tracing::info!("Not signed in, redirecting to {}", target);
            match on_redirect {
                Some(handler) => handler.call(target.to_string()),
                None => {
                    crate::platform::redirect(target);
                }
            }
        }
    });

    match decision() {
        Admission::Admit => rsx! {
            {children}
        },
        Admission::Pending => rsx! {
            div { class: "flex items-center justify-center min-h-screen", "Loading..." }
        },
        Admission::Redirect(_) => rsx! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::User;

    fn admin() -> User {
        User {
            id: Some("u1".into()),
            username: Some("admin".into()),
            ..User::default()
        }
    }

    #[test]
    fn test_pending_while_initializing() {
        assert_eq!(admission(&AuthState::default()), Admission::Pending);

        // A stale user during initialization still waits.
        let state = AuthState {
            user: Some(admin()),
            initializing: true,
        };
        assert_eq!(admission(&state), Admission::Pending);
    }

    #[test]
    fn test_admit_and_redirect() {
        let signed_in = AuthState {
            user: Some(admin()),
            initializing: false,
        };
        assert_eq!(admission(&signed_in), Admission::Admit);

        let signed_out = AuthState {
            user: None,
            initializing: false,
        };
        assert_eq!(admission(&signed_out), Admission::Redirect("/admin/login"));
    }
}
