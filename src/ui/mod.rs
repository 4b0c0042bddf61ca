//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能

pub mod form;
pub mod layout;
pub mod renderer;

// 公開API
pub use layout::{string_width, truncate_string, AppLayout};
pub use renderer::{draw, Renderer};
