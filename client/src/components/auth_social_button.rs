//! Social sign-in button (GitHub, Google).

use leptos::prelude::*;

use crate::state::auth_form::SocialProvider;

/// Short glyph rendered in place of a provider logo.
#[must_use]
pub fn provider_glyph(provider: SocialProvider) -> &'static str {
    match provider {
        SocialProvider::Github => "GH",
        SocialProvider::Google => "G",
    }
}

#[component]
pub fn AuthSocialButton(
    provider: SocialProvider,
    on_click: Callback<()>,
    #[prop(into, default = false.into())] disabled: Signal<bool>,
) -> impl IntoView {
    let title = format!("Continue with {}", provider.label());

    view! {
        <button
            type="button"
            class=move || if disabled.get() { "social-button social-button--disabled" } else { "social-button" }
            title=title.clone()
            aria-label=title
            disabled=move || disabled.get()
            on:click=move |_| {
                if !disabled.get_untracked() {
                    on_click.run(());
                }
            }
        >
            <span class="social-button__glyph">{provider_glyph(provider)}</span>
            <span class="social-button__label">{provider.label()}</span>
        </button>
    }
}
