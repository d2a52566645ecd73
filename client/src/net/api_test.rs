use super::*;

#[test]
fn social_sign_in_url_uses_provider_id() {
    assert_eq!(social_sign_in_url(SocialProvider::Github), "/auth/github");
    assert_eq!(social_sign_in_url(SocialProvider::Google), "/auth/google");
}

#[test]
fn failed_message_prefers_server_error() {
    assert_eq!(
        failed_message("registration", 409, Some("email already registered".to_owned())),
        "registration failed: email already registered"
    );
}

#[test]
fn failed_message_falls_back_to_status() {
    assert_eq!(failed_message("sign in", 401, None), "sign in failed: 401");
    assert_eq!(failed_message("sign in", 502, Some("  ".to_owned())), "sign in failed: 502");
}
