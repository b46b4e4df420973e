//! HTML page handlers.

pub mod embed_widget;

pub use embed_widget::embed_widget_handler;
