pub mod add_site;
pub mod auth_panel;
pub mod notice;
pub mod quick_check;
pub mod status_badge;
pub mod timeline;
pub mod tooltip;
