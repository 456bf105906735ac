mod statusbar;
mod tab_bar;

pub use statusbar::render_statusbar;
pub use tab_bar::render_tab_bar;
