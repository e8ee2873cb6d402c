mod dateline;
mod inferred;
mod iter;
#[cfg(feature = "serde")]
mod json;
mod properties;
mod scenarios;
