//! Authentication context and hooks for the UI.

use std::rc::Rc;

use api::{LoginData, RegisterData, User};
use dioxus::prelude::*;

use crate::guard::LOGIN_ROUTE;
use crate::hooks::use_watch;
use crate::platform::{make_api, make_token_store, AppApi, AppSession};
use crate::session::{AuthState, SessionError};

/// Get the current authentication state.
/// Returns a signal that updates when the admin logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The session store shared by the whole app.
pub fn use_session() -> Rc<AppSession> {
    use_context::<Rc<AppSession>>()
}

/// The API client shared by the whole app.
pub fn use_api() -> AppApi {
    use_context::<AppApi>()
}

/// Provider component that owns the session.
/// Wrap your app with this component; it checks any stored token once on mount.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let api = use_hook(|| make_api().map(|api| ApiHandle(Rc::new(api))));

    match api {
        Ok(api) => rsx! {
            SessionProvider { api, {children} }
        },
        Err(e) => rsx! {
            div { class: "flex items-center justify-center min-h-screen",
                "Unable to start the API client: {e}"
            }
        },
    }
}

/// The one API client, compared by identity.
#[derive(Clone)]
struct ApiHandle(Rc<AppApi>);

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[component]
fn SessionProvider(api: ApiHandle, children: Element) -> Element {
    let api: AppApi = (*api.0).clone();
    let session = use_hook({
        let api = api.clone();
        move || Rc::new(AppSession::new(api, make_token_store()))
    });

    let auth_state = use_watch({
        let session = session.clone();
        move || session.subscribe()
    });

    use_hook({
        let session = session.clone();
        move || {
            spawn(async move {
                session.initialize().await;
            });
        }
    });

    use_context_provider(|| api);
    use_context_provider(|| session);
    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Sign in with email and password. The returned closure reports the outcome
/// through `on_done`.
pub fn use_login() -> impl FnMut(LoginData, EventHandler<Result<User, SessionError>>) {
    let session = use_session();
    move |credentials, on_done| {
        let session = session.clone();
        spawn(async move {
            on_done.call(session.login(&credentials).await);
        });
    }
}

/// Create an account. Same contract as [`use_login`].
pub fn use_register() -> impl FnMut(RegisterData, EventHandler<Result<User, SessionError>>) {
    let session = use_session();
    move |data, on_done| {
        let session = session.clone();
        spawn(async move {
            on_done.call(session.register(&data).await);
        });
    }
}

/// Button to log out the current admin.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();

    let onclick = move |_| {
        session.logout();
        crate::platform::redirect(LOGIN_ROUTE);
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
