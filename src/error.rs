//! エラーハンドリングシステム
//!
//! 電話帳アプリ全体で使用される統一されたエラー型とユーティリティを定義。
//! マスク入力エディタ自体は失敗しないため、ここに現れるのは
//! 保存・検証・画面・設定の各層のエラーのみ。

use std::time::{Duration, Instant};
use thiserror::Error;

use crate::contacts::ContactId;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum PhonebookError {
    /// 連絡先ストアのエラー
    #[error("Contact store operation failed: {0}")]
    Store(#[from] StoreError),

    /// 送信時の検証エラー
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 入出力エラー
    #[error("IO error: {message}")]
    Io { message: String },
}

/// 送信時の検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Имя не должно быть пустым")]
    EmptyName,

    #[error("Телефон должен быть в формате +7 (999) 999-99-99")]
    InvalidPhone { value: String },
}

/// 連絡先ストア固有のエラー
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Контакт не найден: {id}")]
    NotFound { id: ContactId },

    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("Ошибка чтения или записи файла {path}: {message}")]
    Io { path: String, message: String },

    #[error("Некорректный формат данных {path}: {message}")]
    Serialization { path: String, message: String },
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum UiError {
    #[error("Terminal initialization failed")]
    TerminalInit,

    #[error("Screen size too small: {width}x{height}")]
    ScreenTooSmall { width: u16, height: u16 },

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Missing value for option {option}")]
    MissingValue { option: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
    Fatal,
}

/// ステータス行に表示するエラー情報
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    /// 利用者向けメッセージ
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
    /// 表示開始時刻
    pub start_time: Instant,
    /// 表示持続時間
    pub duration: Duration,
}

impl ErrorDisplay {
    pub fn new(error: &PhonebookError) -> Self {
        let (message, level) = Self::format_error(error);
        Self::with_level(message, level)
    }

    /// 任意のメッセージを表示（成功通知など）
    pub fn with_level(message: impl Into<String>, level: ErrorLevel) -> Self {
        Self {
            message: message.into(),
            level,
            start_time: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    fn format_error(error: &PhonebookError) -> (String, ErrorLevel) {
        match error {
            PhonebookError::Validation(err) => (err.to_string(), ErrorLevel::Warning),
            PhonebookError::Store(StoreError::Invalid(err)) => (err.to_string(), ErrorLevel::Warning),
            PhonebookError::Store(err @ StoreError::NotFound { .. }) => {
                (err.to_string(), ErrorLevel::Error)
            }
            PhonebookError::Store(err) => (format!("Ошибка: {}", err), ErrorLevel::Error),
            PhonebookError::Ui(UiError::TerminalInit) => {
                ("Не удалось инициализировать терминал".to_string(), ErrorLevel::Fatal)
            }
            PhonebookError::Ui(UiError::ScreenTooSmall { width, height }) => (
                format!("Слишком маленький экран: {}x{}", width, height),
                ErrorLevel::Error,
            ),
            _ => (format!("Ошибка: {}", error), ErrorLevel::Error),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }
}

/// パニックハンドラの設定
///
/// 端末を raw モードのまま残さないよう、報告前に端末状態を戻す。
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut out = std::io::stdout();
        let _ = crossterm::execute!(out, crossterm::terminal::LeaveAlternateScreen);

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let message: &str = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic payload"
        };

        log::error!("PANIC at {}: {}", location, message);
        eprintln!("PANIC at {}: {}", location, message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, PhonebookError>;

/// ストア固有のResult型
pub mod store {
    pub type Result<T> = std::result::Result<T, super::StoreError>;
}

// std::io::Error から PhonebookError への変換
impl From<std::io::Error> for PhonebookError {
    fn from(error: std::io::Error) -> Self {
        PhonebookError::Io {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_warnings_with_form_message() {
        let error = PhonebookError::Validation(ValidationError::InvalidPhone {
            value: "+7 (912".to_string(),
        });
        let display = ErrorDisplay::new(&error);

        assert_eq!(display.level, ErrorLevel::Warning);
        assert_eq!(display.message, "Телефон должен быть в формате +7 (999) 999-99-99");
        assert!(!display.is_expired());
    }

    #[test]
    fn store_validation_is_unwrapped() {
        let error: PhonebookError = StoreError::from(ValidationError::EmptyName).into();
        let display = ErrorDisplay::new(&error);
        assert_eq!(display.message, "Имя не должно быть пустым");
    }

    #[test]
    fn not_found_mentions_id() {
        let error: PhonebookError = StoreError::NotFound { id: ContactId(42) }.into();
        let display = ErrorDisplay::new(&error);
        assert_eq!(display.level, ErrorLevel::Error);
        assert!(display.message.contains("42"));
    }

    #[test]
    fn error_display_expiry() {
        let mut display = ErrorDisplay::with_level("Контакт добавлен", ErrorLevel::Info);
        assert!(!display.is_expired());

        // 時間経過をシミュレート
        display.start_time = Instant::now() - Duration::from_secs(6);
        assert!(display.is_expired());
    }

    #[test]
    fn io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let error: PhonebookError = io.into();
        assert!(matches!(error, PhonebookError::Io { .. }));
    }
}
