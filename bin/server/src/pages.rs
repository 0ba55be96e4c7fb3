//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route,
//! along with any server functions specific to that page.

pub mod home;
pub mod login;

pub use home::HomePage;
pub use login::LoginPage;
