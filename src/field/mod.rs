//! テキストフィールドモジュール
//!
//! マスク入力エディタを載せるホスト側の1行入力欄と、
//! 遅延実行キューを提供

pub mod line_field;
pub mod microtask;
pub mod phone_input;

// 公開API
pub use line_field::LineField;
pub use microtask::MicrotaskQueue;
pub use phone_input::{FieldEvent, PhoneInput};

/// 選択範囲 `[start, end)`（文字単位）
///
/// `start == end` のときはキャレットのみ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// 折りたたまれた選択範囲（キャレット）
    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// 範囲を作成（順序は正規化する）
    pub fn range(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }
}

/// マスク入力エディタが要求するホスト側の契約
///
/// 値と選択範囲をプログラムから取得・設定できること。
/// 設定は呼び出し側から見て同期的に反映される。
pub trait TextField {
    /// 現在の表示文字列
    fn value(&self) -> &str;

    /// 表示文字列を書き換える
    fn set_value(&mut self, value: &str);

    /// 現在の選択範囲
    fn selection(&self) -> Selection;

    /// 選択範囲を設定（範囲外は丸める）
    fn set_selection(&mut self, start: usize, end: usize);

    /// キャレット位置（選択範囲の開始位置）
    fn caret(&self) -> usize {
        self.selection().start
    }

    /// キャレットを移動し選択を解除
    fn set_caret(&mut self, pos: usize) {
        self.set_selection(pos, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_range_is_normalised() {
        let sel = Selection::range(7, 3);
        assert_eq!(sel, Selection { start: 3, end: 7 });
        assert_eq!(sel.len(), 4);
        assert!(!sel.is_collapsed());
        assert!(Selection::caret(2).is_collapsed());
    }
}
