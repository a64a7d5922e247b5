//! crisis-hub web server.
//!
//! Serves the static resource-map page and the JSON API behind it: the
//! helpline chatbot, nearby resource search, and the theme preference.

pub mod app;
pub mod chat;
pub mod config;
pub mod error;
pub mod resources;
pub mod site;
pub mod state;
pub mod theme;
