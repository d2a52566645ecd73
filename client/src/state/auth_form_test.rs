use super::*;

fn filled_login() -> AuthFormState {
    let mut state = AuthFormState::new();
    state.set_field(Field::Email, "ada@example.com".to_owned());
    state.set_field(Field::Password, "hunter22".to_owned());
    state
}

fn filled_register() -> AuthFormState {
    let mut state = filled_login();
    state.toggle_variant();
    state.set_field(Field::Name, "Ada".to_owned());
    state
}

// =============================================================
// Mode toggling
// =============================================================

#[test]
fn default_variant_is_login() {
    let state = AuthFormState::new();
    assert_eq!(state.variant, AuthVariant::Login);
    assert!(!state.loading);
}

#[test]
fn toggle_even_times_returns_to_start() {
    let mut state = AuthFormState::new();
    for _ in 0..4 {
        assert!(state.toggle_variant());
    }
    assert_eq!(state.variant, AuthVariant::Login);
}

#[test]
fn toggle_odd_times_yields_other_mode() {
    let mut state = AuthFormState::new();
    for _ in 0..3 {
        state.toggle_variant();
    }
    assert_eq!(state.variant, AuthVariant::Register);
}

#[test]
fn toggle_rejected_while_busy() {
    let mut state = filled_login();
    state.begin_submit();
    assert!(!state.toggle_variant());
    assert_eq!(state.variant, AuthVariant::Login);
}

#[test]
fn toggle_clears_errors_and_failure() {
    let mut state = AuthFormState::new();
    state.begin_submit();
    state.failure = Some("boom".to_owned());
    assert!(!state.errors.is_empty());
    state.toggle_variant();
    assert!(state.errors.is_empty());
    assert_eq!(state.failure, None);
}

#[test]
fn variant_copy_matches_mode() {
    assert_eq!(AuthVariant::Login.submit_label(), "Sign in");
    assert_eq!(AuthVariant::Register.submit_label(), "Register");
    assert_eq!(AuthVariant::Login.toggle_prompt(), "New to Messenger?");
    assert_eq!(AuthVariant::Register.toggle_prompt(), "Already have an account?");
    assert_eq!(AuthVariant::Login.toggle_label(), "Create an account");
    assert_eq!(AuthVariant::Register.toggle_label(), "Login");
}

// =============================================================
// Field visibility
// =============================================================

#[test]
fn name_field_only_in_register() {
    let mut state = AuthFormState::new();
    assert!(!state.shows_name_field());
    assert!(!state.visible_fields().contains(&Field::Name));

    state.toggle_variant();
    assert!(state.shows_name_field());
    assert_eq!(state.visible_fields(), &[Field::Name, Field::Email, Field::Password]);
}

#[test]
fn field_metadata() {
    assert_eq!(Field::Name.id(), "name");
    assert_eq!(Field::Email.label(), "Email Address");
    assert_eq!(Field::Email.input_type(), "email");
    assert_eq!(Field::Password.input_type(), "password");
}

// =============================================================
// Busy flag
// =============================================================

#[test]
fn controls_disabled_tracks_busy_flag() {
    let mut state = filled_login();
    assert!(!state.controls_disabled());
    state.begin_submit();
    assert!(state.controls_disabled());
    state.finish(Ok(()));
    assert!(!state.controls_disabled());
}

#[test]
fn set_field_ignored_while_busy() {
    let mut state = filled_login();
    state.begin_submit();
    state.set_field(Field::Email, "other@example.com".to_owned());
    assert_eq!(state.values.email, "ada@example.com");
}

#[test]
fn second_submit_rejected_while_busy() {
    let mut state = filled_login();
    assert!(state.begin_submit().is_some());
    assert!(state.begin_submit().is_none());
    assert!(state.begin_social(SocialProvider::Github).is_none());
}

#[test]
fn finish_with_failure_resets_busy_and_surfaces_message() {
    let mut state = filled_login();
    state.begin_submit();
    state.finish(Err("sign in failed: 401".to_owned()));
    assert!(!state.loading);
    assert_eq!(state.failure.as_deref(), Some("sign in failed: 401"));
}

#[test]
fn new_submission_clears_previous_failure() {
    let mut state = filled_login();
    state.begin_submit();
    state.finish(Err("nope".to_owned()));
    state.begin_submit();
    assert_eq!(state.failure, None);
}

// =============================================================
// Validation
// =============================================================

#[test]
fn empty_login_submit_surfaces_errors_without_busy() {
    let mut state = AuthFormState::new();
    assert_eq!(state.begin_submit(), None);
    assert!(!state.loading);
    assert_eq!(state.error_for(Field::Email), Some("Email is required"));
    assert_eq!(state.error_for(Field::Password), Some("Password is required"));
    assert_eq!(state.error_for(Field::Name), None);
}

#[test]
fn malformed_email_rejected() {
    let mut state = filled_login();
    state.set_field(Field::Email, "not-an-email".to_owned());
    assert_eq!(state.begin_submit(), None);
    assert_eq!(state.error_for(Field::Email), Some("Enter a valid email address"));

    state.set_field(Field::Email, "a@b@c".to_owned());
    assert!(state.validate().contains_key(&Field::Email));
}

#[test]
fn editing_field_clears_its_error() {
    let mut state = AuthFormState::new();
    state.begin_submit();
    state.set_field(Field::Email, "ada@example.com".to_owned());
    assert_eq!(state.error_for(Field::Email), None);
    assert!(state.error_for(Field::Password).is_some());
}

#[test]
fn register_requires_name_and_long_password() {
    let mut state = AuthFormState::new();
    state.toggle_variant();
    state.set_field(Field::Email, "ada@example.com".to_owned());
    state.set_field(Field::Password, "short".to_owned());
    let errors = state.validate();
    assert_eq!(errors.get(&Field::Name), Some(&"Name is required"));
    assert_eq!(errors.get(&Field::Password), Some(&"Password must be at least 8 characters"));
}

#[test]
fn login_accepts_short_password() {
    let mut state = filled_login();
    state.set_field(Field::Password, "pw".to_owned());
    assert!(state.validate().is_empty());
}

// =============================================================
// Requests
// =============================================================

#[test]
fn login_submit_builds_login_request() {
    let mut state = filled_login();
    state.set_field(Field::Email, "  ada@example.com ".to_owned());
    assert_eq!(
        state.begin_submit(),
        Some(AuthRequest::Login { email: "ada@example.com".to_owned(), password: "hunter22".to_owned() })
    );
    assert!(state.loading);
}

#[test]
fn register_submit_builds_register_request() {
    let mut state = filled_register();
    assert_eq!(
        state.begin_submit(),
        Some(AuthRequest::Register {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "hunter22".to_owned(),
        })
    );
}

#[test]
fn toggling_back_to_login_drops_name_from_submission() {
    let mut state = filled_register();
    state.toggle_variant();
    assert!(!state.shows_name_field());
    match state.begin_submit() {
        Some(AuthRequest::Login { email, .. }) => assert_eq!(email, "ada@example.com"),
        other => panic!("expected login request, got {other:?}"),
    }
}

#[test]
fn social_trigger_sets_busy() {
    let mut state = AuthFormState::new();
    assert_eq!(state.begin_social(SocialProvider::Google), Some(AuthRequest::Social(SocialProvider::Google)));
    assert!(state.loading);
}

#[test]
fn social_provider_ids() {
    assert_eq!(SocialProvider::Github.id(), "github");
    assert_eq!(SocialProvider::Google.id(), "google");
    assert_eq!(SocialProvider::ALL.map(SocialProvider::label), ["GitHub", "Google"]);
}

// =============================================================
// Returning to the page
// =============================================================

#[test]
fn restore_after_pending_social_sign_in_clears_busy() {
    let mut state = AuthFormState::new();
    state.begin_social(SocialProvider::Github);
    assert!(state.resume_after_restore());
    assert!(!state.controls_disabled());
    assert!(state.toggle_variant());
    assert_eq!(state.begin_social(SocialProvider::Google), Some(AuthRequest::Social(SocialProvider::Google)));
}

#[test]
fn restore_when_idle_changes_nothing() {
    let mut state = filled_login();
    assert!(!state.resume_after_restore());
    assert!(!state.loading);
    assert_eq!(state.values.email, "ada@example.com");
}

#[test]
fn redirect_error_code_becomes_failure_line() {
    let state = AuthFormState::with_redirect_error(Some("provider_unavailable"));
    assert_eq!(state.failure.as_deref(), Some("That sign-in provider is not available right now"));
    assert!(!state.loading);
    assert_eq!(state.variant, AuthVariant::Login);
}

#[test]
fn redirect_without_error_starts_clean() {
    let state = AuthFormState::with_redirect_error(None);
    assert_eq!(state.failure, None);
}
