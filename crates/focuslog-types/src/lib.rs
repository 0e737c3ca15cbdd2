//! Shared request/response types for the focuslog server. Kept free of
//! axum/rusqlite so the API and DB layers can both depend on it without
//! pulling in each other's stack.

pub mod api;
