// TUI widget modules for each screen panel.

pub mod banner;
pub mod category_picks;
pub mod confirm;
pub mod items;
pub mod order;
pub mod results;
pub mod setup;
pub mod status_bar;
pub mod transition;
