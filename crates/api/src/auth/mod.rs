//! Access-token issuance and validation.
//!
//! Password hashing lives in `streamify_services::password`, next to the
//! credential checks that use it.

pub mod jwt;
