//! Labelled text input with an inline validation message.

use leptos::prelude::*;

#[must_use]
pub fn input_class(has_error: bool, disabled: bool) -> &'static str {
    match (has_error, disabled) {
        (_, true) => "field__input field__input--disabled",
        (true, false) => "field__input field__input--error",
        (false, false) => "field__input",
    }
}

#[component]
pub fn Input(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<&'static str>>,
    #[prop(into, default = false.into())] disabled: Signal<bool>,
) -> impl IntoView {
    let error_id = format!("{id}-error");
    let described_by = error_id.clone();

    view! {
        <div class="field">
            <label class="field__label" for=id>{label}</label>
            <input
                id=id
                name=id
                type=input_type
                class=move || input_class(error.get().is_some(), disabled.get())
                disabled=move || disabled.get()
                aria-invalid=move || if error.get().is_some() { "true" } else { "false" }
                aria-describedby=described_by
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <Show when=move || error.get().is_some()>
                <p class="field__error" id=error_id.clone()>{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_class_plain() {
        assert_eq!(input_class(false, false), "field__input");
    }

    #[test]
    fn input_class_error_highlight() {
        assert_eq!(input_class(true, false), "field__input field__input--error");
    }

    #[test]
    fn input_class_disabled_wins() {
        assert_eq!(input_class(true, true), "field__input field__input--disabled");
        assert_eq!(input_class(false, true), "field__input field__input--disabled");
    }

    #[cfg(feature = "ssr")]
    fn render(disabled: bool, error: Option<&'static str>) -> String {
        view! {
            <Input
                id="email"
                label="Email Address"
                input_type="email"
                value=String::from("ada@example.com")
                on_input=Callback::new(|_: String| {})
                error=Signal::derive(move || error)
                disabled=disabled
            />
        }
        .to_html()
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn disabled_input_renders_disabled_attribute() {
        use crate::components::test_render::disabled_count;

        assert_eq!(disabled_count(&render(true, None)), 1);
        assert_eq!(disabled_count(&render(false, None)), 0);
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn error_renders_message_linked_to_input() {
        let html = render(false, Some("Email is required"));
        assert!(html.contains("Email is required"), "{html}");
        assert!(html.contains(r#"aria-invalid="true""#), "{html}");
        assert!(html.contains(r#"id="email-error""#), "{html}");
    }
}
