//! Crate-level tests.
//!
//! - `properties`: proptest checks that hold across whole parses, such as
//!   memoization never changing a result and realized trees staying stable.
