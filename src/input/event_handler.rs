//! イベントハンドリング
//!
//! ターミナルイベントの読み取り

use crate::error::Result;
use crossterm::event::{self, Event, KeyEvent};
use std::time::Duration;

/// 入力ハンドラー
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// 入力タイムアウト
    timeout: Duration,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(100))
    }

    /// タイムアウト付きで入力ハンドラーを作成
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 次のイベントを待つ（タイムアウトまで）
    pub fn next_event(&self) -> Result<InputEvent> {
        if !event::poll(self.timeout)? {
            return Ok(InputEvent::Timeout);
        }
        Ok(InputEvent::from(event::read()?))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// アプリケーションへ渡す入力イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// 貼り付け（bracketed paste）
    Paste(String),
    /// ターミナルサイズ変更
    Resize { cols: u16, rows: u16 },
    Timeout,
    /// 無視（マウス等）
    Ignored,
}

impl From<Event> for InputEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key_event) => InputEvent::Key(key_event),
            Event::Paste(text) => InputEvent::Paste(text),
            Event::Resize(cols, rows) => InputEvent::Resize { cols, rows },
            Event::Mouse(_) | Event::FocusGained | Event::FocusLost => InputEvent::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_input_handler_creation() {
        let handler = InputHandler::new();
        assert_eq!(handler.timeout(), Duration::from_millis(100));

        let handler = InputHandler::with_timeout(Duration::from_millis(16));
        assert_eq!(handler.timeout(), Duration::from_millis(16));
    }

    #[test]
    fn test_event_conversion() {
        let key = KeyEvent::new(KeyCode::Char('7'), KeyModifiers::NONE);
        assert_eq!(InputEvent::from(Event::Key(key)), InputEvent::Key(key));
        assert_eq!(
            InputEvent::from(Event::Paste("+7 999".to_string())),
            InputEvent::Paste("+7 999".to_string())
        );
        assert_eq!(
            InputEvent::from(Event::Resize(80, 24)),
            InputEvent::Resize { cols: 80, rows: 24 }
        );
        assert_eq!(InputEvent::from(Event::FocusLost), InputEvent::Ignored);
    }
}
