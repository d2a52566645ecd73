//! Sign-in / registration form with social sign-in.
//!
//! ARCHITECTURE
//! ============
//! All state transitions go through `AuthFormState`; this component wraps it
//! in a signal, renders it, and performs the network work described by the
//! returned `AuthRequest`. Every delegated call writes its outcome back via
//! `AuthFormState::finish`, which clears the busy flag.

#[cfg(all(test, feature = "ssr"))]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use leptos::prelude::*;

use crate::components::auth_social_button::AuthSocialButton;
use crate::components::button::{Button, ButtonKind};
use crate::components::input::Input;
use crate::state::auth_form::{AuthFormState, AuthRequest, Field, SocialProvider};

/// Where the browser goes after a successful credential sign-in.
pub const SIGNED_IN_HOME: &str = "/users";

#[cfg(feature = "hydrate")]
fn go_to(href: &str) -> bool {
    web_sys::window().is_some_and(|window| window.location().set_href(href).is_ok())
}

/// Perform the delegated call for an accepted request.
fn dispatch(form: RwSignal<AuthFormState>, request: AuthRequest) {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::api;

        if let AuthRequest::Social(provider) = request {
            log::info!("starting {} sign-in", provider.id());
            if !go_to(&api::social_sign_in_url(provider)) {
                form.update(|s| s.finish(Err(format!("Could not open {} sign-in", provider.label()))));
            }
            return;
        }

        leptos::task::spawn_local(async move {
            let outcome = match request {
                AuthRequest::Register { name, email, password } => api::register(&name, &email, &password).await,
                AuthRequest::Login { email, password } => api::login(&email, &password).await,
                AuthRequest::Social(_) => return,
            };
            if let Err(e) = &outcome {
                log::warn!("auth request failed: {e}");
            }
            let signed_in = outcome.is_ok();
            form.update(|s| s.finish(outcome.map(|_| ())));
            if signed_in && !go_to(SIGNED_IN_HOME) {
                form.update(|s| s.finish(Err("Signed in, but could not leave this page".to_owned())));
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (form, request);
    }
}

/// Clear a pending social sign-in when the browser restores this page from
/// its back-forward cache.
#[cfg(feature = "hydrate")]
fn install_restore_listener(form: RwSignal<AuthFormState>) {
    let handle = window_event_listener(leptos::ev::pageshow, move |ev: web_sys::PageTransitionEvent| {
        if ev.persisted() && form.try_update(AuthFormState::resume_after_restore).unwrap_or(false) {
            log::info!("page restored, pending sign-in abandoned");
        }
    });
    on_cleanup(move || handle.remove());
}

#[component]
pub fn AuthForm(
    /// Starting state; defaults to an empty sign-in form.
    #[prop(optional)]
    initial: Option<AuthFormState>,
) -> impl IntoView {
    let form = RwSignal::new(initial.unwrap_or_default());
    #[cfg(feature = "hydrate")]
    install_restore_listener(form);
    let disabled = Signal::derive(move || form.with(AuthFormState::controls_disabled));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(request) = form.try_update(|s| s.begin_submit()).flatten() {
            dispatch(form, request);
        }
    };

    let social_action = move |provider: SocialProvider| {
        if let Some(request) = form.try_update(|s| s.begin_social(provider)).flatten() {
            dispatch(form, request);
        }
    };

    let field_input = move |field: Field| {
        view! {
            <Input
                id=field.id()
                label=field.label()
                input_type=field.input_type()
                value=Signal::derive(move || form.with(|s| s.values.get(field).to_owned()))
                on_input=Callback::new(move |value: String| form.update(|s| s.set_field(field, value)))
                error=Signal::derive(move || form.with(|s| s.error_for(field)))
                disabled=disabled
            />
        }
    };

    view! {
        <div class="auth-form">
            <div class="auth-form__card">
                <form class="auth-form__fields" on:submit=on_submit novalidate=true>
                    <Show when=move || form.with(AuthFormState::shows_name_field)>
                        {field_input(Field::Name)}
                    </Show>
                    {field_input(Field::Email)}
                    {field_input(Field::Password)}
                    <div>
                        <Button kind=ButtonKind::Submit full_width=true disabled=disabled>
                            {move || form.with(|s| s.variant.submit_label())}
                        </Button>
                    </div>
                </form>

                <Show when=move || form.with(|s| s.failure.is_some())>
                    <p class="auth-form__failure" role="alert">
                        {move || form.with(|s| s.failure.clone().unwrap_or_default())}
                    </p>
                </Show>

                <div class="auth-form__divider">
                    <span class="auth-form__divider-text">"Or continue with"</span>
                </div>

                <div class="auth-form__social">
                    {SocialProvider::ALL
                        .into_iter()
                        .map(|provider| {
                            view! {
                                <AuthSocialButton
                                    provider=provider
                                    on_click=Callback::new(move |()| social_action(provider))
                                    disabled=disabled
                                />
                            }
                        })
                        .collect_view()}
                </div>

                <div class="auth-form__toggle">
                    <div>{move || form.with(|s| s.variant.toggle_prompt())}</div>
                    <button
                        type="button"
                        class="auth-form__toggle-link"
                        disabled=move || disabled.get()
                        on:click=move |_| {
                            form.update(|s| {
                                s.toggle_variant();
                            });
                        }
                    >
                        {move || form.with(|s| s.variant.toggle_label())}
                    </button>
                </div>
            </div>
        </div>
    }
}
