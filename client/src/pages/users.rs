//! Signed-in landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Credential and OAuth sign-in both finish here. Visitors without a session
//! are sent back to `/`.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::button::Button;
use crate::state::auth::AuthState;
use crate::util::auth::{install_unauth_redirect, load_current_user};

#[component]
pub fn UsersPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());
    load_current_user(auth);

    let signing_out = RwSignal::new(false);
    let on_sign_out = Callback::new(move |()| {
        if signing_out.get_untracked() {
            return;
        }
        signing_out.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            signing_out.set(false);
            auth.set(AuthState { user: None, loading: false });
        });
    });

    let user_name = move || {
        auth.get()
            .user
            .as_ref()
            .map_or_else(|| "…".to_owned(), |u| u.name.clone())
    };
    let user_email = move || {
        auth.get()
            .user
            .and_then(|u| u.email)
            .unwrap_or_default()
    };

    view! {
        <main class="users-page">
            <Show
                when=move || !auth.get().loading
                fallback=|| view! { <p class="users-page__loading">"Loading…"</p> }
            >
                <h1 class="users-page__title">"Welcome, " {user_name}</h1>
                <p class="users-page__email">{user_email}</p>
                <Button danger=true disabled=signing_out on_click=on_sign_out>
                    "Sign out"
                </Button>
            </Show>
        </main>
    }
}
