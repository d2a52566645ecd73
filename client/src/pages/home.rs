//! Landing page: product mark, heading, and the auth form.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::auth_form::AuthForm;
use crate::net::types::AUTH_ERROR_PARAM;
use crate::state::auth_form::AuthFormState;

#[component]
pub fn HomePage() -> impl IntoView {
    let redirect_error = use_query_map().with_untracked(|query| query.get(AUTH_ERROR_PARAM));
    let initial = AuthFormState::with_redirect_error(redirect_error.as_deref());

    view! {
        <main class="home-page">
            <div class="home-page__header">
                <div class="home-page__logo" aria-hidden="true">"M"</div>
                <h2 class="home-page__title">"Sign in to your account"</h2>
            </div>
            <AuthForm initial=initial/>
        </main>
    }
}
