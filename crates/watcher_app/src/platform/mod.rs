mod app;
mod callbacks;
mod cli;
mod config;
mod terminal;

pub use app::run;
