//! Discord bot that relays questions and mentions to Google Gemini

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod app;
