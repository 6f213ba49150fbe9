//! Named default values, kept separate from [`super::Config`] so a caller
//! can refer to "the default" without constructing a whole config.

/// Smallest horizon tried by the outer retry loop.
pub const MIN_HORIZON: u32 = 0;

/// Largest horizon tried before the loop surfaces
/// [`crate::types::err::HorizonExhausted`].
pub const MAX_HORIZON: u32 = 20;
