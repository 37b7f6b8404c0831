//! HeroDex - Dota 2 hero browser built on tui-dispatch
//!
//! The library exposes the app's modules for the binary and for tests.

pub mod action;
pub mod api;
pub mod assets;
pub mod catalog;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod resolve;
pub mod state;
