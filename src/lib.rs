//! # Hourcast Telegram Bot
//!
//! A Telegram bot that greets a user, collects a short biography, optionally
//! a photo, then a location or city name, and replies with a one-hour-ahead
//! temperature forecast from the Open-Meteo API.

pub mod bot;
pub mod cities;
pub mod config;
pub mod dialogue;
pub mod report;
pub mod weather;
