//! Components shared between pages.

pub mod nav;
pub mod ui;

pub use nav::Nav;
