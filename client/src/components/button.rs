//! Generic action button.
//!
//! The visual state is a pure function of the style flags (`button_class`);
//! the only side effect is invoking `on_click` for accepted activations.

#[cfg(test)]
#[path = "button_test.rs"]
mod button_test;

use leptos::prelude::*;

/// HTML `type` of the rendered button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonKind {
    #[default]
    Button,
    Submit,
    Reset,
}

impl ButtonKind {
    #[must_use]
    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Submit => "submit",
            Self::Reset => "reset",
        }
    }
}

/// Style flags that determine a button's appearance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonStyle {
    pub full_width: bool,
    pub secondary: bool,
    pub danger: bool,
    pub disabled: bool,
}

/// CSS classes for a button with the given flags.
///
/// `secondary` picks the text tone; `danger` picks the danger fill; the
/// primary fill applies only when neither is set. `disabled` dims the button
/// without changing which fill wins.
#[must_use]
pub fn button_class(style: ButtonStyle) -> String {
    let mut classes = vec!["btn"];
    if style.disabled {
        classes.push("btn--disabled");
    }
    if style.full_width {
        classes.push("btn--full");
    }
    classes.push(if style.secondary { "btn--secondary" } else { "btn--on-fill" });
    if style.danger {
        classes.push("btn--danger");
    }
    if !style.secondary && !style.danger {
        classes.push("btn--primary");
    }
    classes.join(" ")
}

/// Whether a click should reach `on_click`.
#[must_use]
pub fn can_activate(disabled: bool) -> bool {
    !disabled
}

#[component]
pub fn Button(
    #[prop(optional)] kind: ButtonKind,
    #[prop(optional)] full_width: bool,
    #[prop(optional)] secondary: bool,
    #[prop(optional)] danger: bool,
    #[prop(into, default = false.into())] disabled: Signal<bool>,
    #[prop(optional)] on_click: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let class = move || button_class(ButtonStyle { full_width, secondary, danger, disabled: disabled.get() });
    let on_activate = move |_| {
        if !can_activate(disabled.get_untracked()) {
            return;
        }
        if let Some(cb) = on_click {
            cb.run(());
        }
    };

    view! {
        <button type=kind.as_attr() class=class disabled=move || disabled.get() on:click=on_activate>
            {children()}
        </button>
    }
}
