//! View-model helpers for the explorer shell.
//!
//! Pure functions over the gateway's types: no I/O, no rendering.
//!
//! - **Display** — persona labels, playtime, location, member-since date
//! - **Gallery** — shuffled trending list with case-insensitive search

pub mod display;
pub mod gallery;

pub use display::{
    PersonaState, format_location, format_member_since, format_playtime, format_recent_playtime,
};
pub use gallery::{Gallery, filter_games, matches_query};
