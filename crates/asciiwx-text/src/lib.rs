//! Text shaping for the weather panel: place-name normalization and
//! fixed-width measurement tokens.
//!
//! Every function here is total. Bad input degrades to a placeholder token
//! or an empty string; nothing returns an error or panics.

pub mod measure;
pub mod normalize;

pub use normalize::display_token;
