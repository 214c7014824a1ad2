#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod admission;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod history;
pub mod prompt;
pub mod providers;
pub mod rewrite;
pub mod tone;

pub use config::Config;
pub use error::{ConfigError, Result, RewriteError, ToneError};
pub use rewrite::RewriteService;
pub use tone::{Detail, Formality, ToneSelection};
