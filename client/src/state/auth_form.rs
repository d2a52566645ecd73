//! Sign-in / registration form state machine.
//!
//! DESIGN
//! ======
//! The form has two modes (`Login`, `Register`) and a busy flag. All
//! transitions live here as plain methods so the Leptos component only has to
//! wrap an `AuthFormState` in a signal and forward DOM events. Every accepted
//! submission hands back an `AuthRequest`; the caller performs the network
//! call and reports the outcome through `finish`, which always clears the
//! busy flag.

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use std::collections::BTreeMap;

use crate::net::types::AuthRedirectError;

const MIN_PASSWORD_LEN: usize = 8;

/// Which presentation the form is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthVariant {
    #[default]
    Login,
    Register,
}

impl AuthVariant {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    /// Label for the submit button.
    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Register => "Register",
        }
    }

    /// Prompt shown next to the mode toggle.
    #[must_use]
    pub fn toggle_prompt(self) -> &'static str {
        match self {
            Self::Login => "New to Messenger?",
            Self::Register => "Already have an account?",
        }
    }

    /// Text of the mode toggle link.
    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Login => "Create an account",
            Self::Register => "Login",
        }
    }
}

/// Input fields the form can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    /// DOM id / form key.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email Address",
            Self::Password => "Password",
        }
    }

    /// HTML `type` attribute of the input.
    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Name => "text",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

const LOGIN_FIELDS: &[Field] = &[Field::Email, Field::Password];
const REGISTER_FIELDS: &[Field] = &[Field::Name, Field::Email, Field::Password];

/// Third-party identity providers offered as social sign-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocialProvider {
    Github,
    Google,
}

impl SocialProvider {
    pub const ALL: [Self; 2] = [Self::Github, Self::Google];

    /// Provider id used in `/auth/{id}` routes.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Google => "google",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::Google => "Google",
        }
    }
}

/// Current field values. Values survive mode toggles; only the fields
/// visible in the active mode are submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl FormValues {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }
}

/// Per-field validation messages.
pub type FieldErrors = BTreeMap<Field, &'static str>;

/// Work the caller must perform after an accepted submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthRequest {
    Register { name: String, email: String, password: String },
    Login { email: String, password: String },
    Social(SocialProvider),
}

/// Complete local state of the auth form.
#[derive(Clone, Debug, Default)]
pub struct AuthFormState {
    pub variant: AuthVariant,
    pub loading: bool,
    pub values: FormValues,
    pub errors: FieldErrors,
    /// User-visible failure from the last delegated call.
    pub failure: Option<String>,
}

impl AuthFormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for a page load that may carry a sign-in redirect
    /// failure (`?auth_error=<code>`).
    #[must_use]
    pub fn with_redirect_error(code: Option<&str>) -> Self {
        Self {
            failure: code.map(|c| AuthRedirectError::from_code(c).message().to_owned()),
            ..Self::default()
        }
    }

    /// Switch between sign-in and registration. Rejected while busy.
    ///
    /// Returns whether the mode changed.
    pub fn toggle_variant(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.variant = self.variant.toggled();
        self.errors.clear();
        self.failure = None;
        true
    }

    /// Fields rendered in the current mode, in display order.
    #[must_use]
    pub fn visible_fields(&self) -> &'static [Field] {
        match self.variant {
            AuthVariant::Login => LOGIN_FIELDS,
            AuthVariant::Register => REGISTER_FIELDS,
        }
    }

    #[must_use]
    pub fn shows_name_field(&self) -> bool {
        self.variant == AuthVariant::Register
    }

    /// Inputs and buttons are disabled while a submission is in flight.
    #[must_use]
    pub fn controls_disabled(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Update a field value. Ignored while busy.
    pub fn set_field(&mut self, field: Field, value: String) {
        if self.loading {
            return;
        }
        *self.values.slot_mut(field) = value;
        self.errors.remove(&field);
    }

    /// Validate the fields visible in the current mode.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for &field in self.visible_fields() {
            let value = self.values.get(field);
            if value.trim().is_empty() {
                errors.insert(field, required_message(field));
                continue;
            }
            match field {
                Field::Email if !is_email_shaped(value) => {
                    errors.insert(field, "Enter a valid email address");
                }
                Field::Password
                    if self.variant == AuthVariant::Register && value.chars().count() < MIN_PASSWORD_LEN =>
                {
                    errors.insert(field, "Password must be at least 8 characters");
                }
                _ => {}
            }
        }
        errors
    }

    /// Accept a form submission.
    ///
    /// Validation runs first; on failure the errors are recorded and the busy
    /// flag stays clear. On success the form becomes busy and the request for
    /// the current mode is returned.
    pub fn begin_submit(&mut self) -> Option<AuthRequest> {
        if self.loading {
            return None;
        }
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }
        self.errors.clear();
        self.failure = None;
        self.loading = true;

        let email = self.values.email.trim().to_owned();
        let password = self.values.password.clone();
        Some(match self.variant {
            AuthVariant::Register => AuthRequest::Register { name: self.values.name.trim().to_owned(), email, password },
            AuthVariant::Login => AuthRequest::Login { email, password },
        })
    }

    /// Accept a social sign-in trigger.
    pub fn begin_social(&mut self, provider: SocialProvider) -> Option<AuthRequest> {
        if self.loading {
            return None;
        }
        self.failure = None;
        self.loading = true;
        Some(AuthRequest::Social(provider))
    }

    /// The page came back from the browser's back-forward cache while a
    /// social sign-in was pending. The browser left for the provider and
    /// returned without an outcome, so the form is usable again.
    ///
    /// Returns whether the busy flag was cleared.
    pub fn resume_after_restore(&mut self) -> bool {
        std::mem::replace(&mut self.loading, false)
    }

    /// Record the outcome of a delegated call and clear the busy flag.
    pub fn finish(&mut self, outcome: Result<(), String>) {
        self.loading = false;
        self.failure = outcome.err();
    }
}

fn required_message(field: Field) -> &'static str {
    match field {
        Field::Name => "Name is required",
        Field::Email => "Email is required",
        Field::Password => "Password is required",
    }
}

fn is_email_shaped(value: &str) -> bool {
    let mut parts = value.trim().split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}
