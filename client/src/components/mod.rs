//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Leaf controls (`button`, `input`, `auth_social_button`) are pure functions
//! of their props; `auth_form` composes them around `AuthFormState`.

pub mod auth_form;
pub mod auth_social_button;
pub mod button;
pub mod input;
