//! TUIレイアウト管理
//!
//! 画面の領域分割と表示幅の計算

use crate::error::UiError;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use unicode_width::UnicodeWidthChar;

/// 最小画面サイズ
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

/// 画面全体のレイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// 検索欄（上部、枠付き3行）
    pub search: Rect,
    /// 連絡先一覧（中央、可変）
    pub list: Rect,
    /// ステータスライン（1行）
    pub status: Rect,
    /// キー操作の案内（最下部、1行）
    pub help: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect) -> Result<Self, UiError> {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return Err(UiError::ScreenTooSmall {
                width: area.width,
                height: area.height,
            });
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        Ok(Self {
            search: chunks[0],
            list: chunks[1],
            status: chunks[2],
            help: chunks[3],
        })
    }
}

/// 中央に置くモーダルの領域（画面からはみ出さない）
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// 文字列の表示幅
pub fn string_width(s: &str) -> usize {
    s.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

/// 指定幅で文字列を切り詰め（切った場合は末尾に `…`）
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if string_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut width = 0;
    let mut result = String::new();
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_splits_screen() {
        let layout = AppLayout::calculate(Rect::new(0, 0, 60, 20)).unwrap();
        assert_eq!(layout.search.height, 3);
        assert_eq!(layout.list.height, 15);
        assert_eq!(layout.status.y, 18);
        assert_eq!(layout.help.y, 19);
    }

    #[test]
    fn small_screen_is_rejected() {
        assert!(matches!(
            AppLayout::calculate(Rect::new(0, 0, 30, 20)),
            Err(UiError::ScreenTooSmall { width: 30, height: 20 })
        ));
    }

    #[test]
    fn centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(area, 50, 6);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 6);
        assert_eq!(rect.y, 2);
    }

    #[test]
    fn width_and_truncation() {
        assert_eq!(string_width("Анна"), 4);
        assert_eq!(string_width("山田"), 4);
        assert_eq!(truncate_string("Анна", 10), "Анна");
        assert_eq!(truncate_string("Александра", 6), "Алекс…");
        assert_eq!(truncate_string("山田太郎", 5), "山田…");
    }
}
