/// Router Module Index
///
/// Splits the HTTP surface by what guards it. Admin-only handlers take the
/// `AdminSession` extractor, so the check travels with the handler rather than
/// depending on a layer being present.

/// Health check and the procedure endpoint. Procedures enforce their own access rules.
pub mod public;

/// Admin session lifecycle (`check-auth`, `login`, `logout`) and admin-only endpoints.
pub mod admin;
