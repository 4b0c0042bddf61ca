//! 入力処理モジュール
//!
//! キーバインドとイベントハンドリングを提供

pub mod event_handler;
pub mod keybinding;

// 公開API
pub use event_handler::{InputEvent, InputHandler};
pub use keybinding::{is_interrupt, is_press, to_edit_key, Action, KeyCombination, ListKeyMap};
