// Library root for the terminal front end.

pub mod app;
pub mod tui;
