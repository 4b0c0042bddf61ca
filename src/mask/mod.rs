//! マスク入力モジュール
//!
//! ロシアの携帯番号テンプレート `+7 (XXX) XXX-XX-XX` に沿って、
//! 入力中の表示文字列とキャレット位置を管理する

pub mod caret;
pub mod editor;
pub mod template;

// 公開API
pub use caret::CaretMover;
pub use editor::{CaretSettle, CaretTask, EditKey, KeyOutcome, MaskedPhoneEditor};
pub use template::{extract_digits, format_display, is_separator, RawDigits, MAX_DIGITS, PREFIX};
