use super::*;

// =============================================================================
// DeployMode
// =============================================================================

#[test]
fn deploy_mode_production_exact() {
    assert_eq!(DeployMode::parse(Some("production")), DeployMode::Production);
}

#[test]
fn deploy_mode_production_case_and_whitespace() {
    assert_eq!(DeployMode::parse(Some("  Production ")), DeployMode::Production);
}

#[test]
fn deploy_mode_other_values_are_development() {
    for raw in ["development", "test", "prod", ""] {
        assert_eq!(DeployMode::parse(Some(raw)), DeployMode::Development, "raw={raw:?}");
    }
}

#[test]
fn deploy_mode_unset_is_development() {
    assert_eq!(DeployMode::parse(None), DeployMode::Development);
    assert!(!DeployMode::default().is_production());
}

#[test]
fn deploy_mode_as_str() {
    assert_eq!(DeployMode::Production.as_str(), "production");
    assert_eq!(DeployMode::Development.as_str(), "development");
}

// =============================================================================
// env_bool (unique var names per test)
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on", "TRUE", "  On "].iter().enumerate() {
        let key = format!("__MSG_TEST_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__MSG_TEST_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_and_unset_return_none() {
    let key = "__MSG_TEST_EB_INVALID_4417__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_bool("__MSG_TEST_EB_SURELY_UNSET_4418__"), None);
}
