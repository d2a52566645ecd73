//! Client-side state containers.
//!
//! DESIGN
//! ======
//! State types are plain structs wrapped in `RwSignal`s by the components
//! that own them, so transitions stay testable without a reactive runtime.

pub mod auth;
pub mod auth_form;
