// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Plain data plus pure functions. Nothing in here performs I/O; submission
// lives in `crate::submission`.
//
// ============================================================================

pub mod order;
