//! phonebook - 電話帳 TUI とマスク付き電話番号入力
//!
//! `+7 (XXX) XXX-XX-XX` 形式の入力マスクを中核に、連絡先の一覧・検索・
//! 追加・お気に入り・並び替えを提供する。

// マスク入力
pub mod field;
pub mod mask;

// データ層
pub mod contacts;
pub mod validation;

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;

// ロジック層
pub mod app;
pub mod input;

// 表示層
pub mod frontend;
pub mod ui;

// 公開API
pub use app::App;
pub use config::{AppConfig, CliOptions, StoreLocation};
pub use error::{PhonebookError, Result};
pub use field::{FieldEvent, LineField, PhoneInput, Selection, TextField};
pub use frontend::TuiApplication;
pub use mask::{format_display, CaretSettle, EditKey, KeyOutcome, MaskedPhoneEditor, RawDigits};
