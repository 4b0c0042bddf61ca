//! 1行テキスト入力欄
//!
//! キャレットと選択範囲を持つ単純な入力欄。位置は文字単位で管理する。
//! プログラムから値を書き換えて内容が変わった場合、キャレットは末尾へ移る
//! （HTML の `<input>` と同じ振る舞い）。

use super::{Selection, TextField};
use crate::mask::EditKey;

/// 1行入力欄
#[derive(Debug, Clone, Default)]
pub struct LineField {
    /// 入力内容
    text: String,
    /// キャレット位置（文字単位）
    caret: usize,
    /// 選択の起点。`Some` のときは起点からキャレットまでが選択範囲
    anchor: Option<usize>,
    /// 最大文字数（`None` は無制限）
    max_chars: Option<usize>,
}

impl LineField {
    /// 空の入力欄を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値付きで作成（キャレットは末尾）
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self {
            text,
            caret,
            anchor: None,
            max_chars: None,
        }
    }

    /// 最大文字数を設定
    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 内容と選択を消去
    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
        self.anchor = None;
    }

    /// キャレットより前の部分（描画時のカーソル位置計算用）
    pub fn text_before_caret(&self) -> &str {
        &self.text[..self.byte_index(self.caret)]
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    fn has_selection(&self) -> bool {
        self.anchor.is_some_and(|anchor| anchor != self.caret)
    }

    fn delete_selection(&mut self) -> bool {
        let selection = self.selection();
        self.anchor = None;
        if selection.is_collapsed() {
            return false;
        }

        let start = self.byte_index(selection.start);
        let end = self.byte_index(selection.end);
        self.text.replace_range(start..end, "");
        self.caret = selection.start;
        true
    }

    /// キャレット位置へ文字列を挿入（選択範囲は置き換え）
    ///
    /// 内容が変化したら `true`。
    pub fn insert_str(&mut self, input: &str) -> bool {
        let changed = self.delete_selection();

        let mut insert: String = input.chars().filter(|ch| !ch.is_control()).collect();
        if let Some(max) = self.max_chars {
            let allowed = max.saturating_sub(self.len_chars());
            insert = insert.chars().take(allowed).collect();
        }
        if insert.is_empty() {
            return changed;
        }

        let at = self.byte_index(self.caret);
        self.text.insert_str(at, &insert);
        self.caret += insert.chars().count();
        true
    }

    /// キャレット前の1文字を削除（Backspace）
    pub fn delete_backward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        self.anchor = None;

        if self.caret == 0 {
            return false;
        }

        let start = self.byte_index(self.caret - 1);
        let end = self.byte_index(self.caret);
        self.text.replace_range(start..end, "");
        self.caret -= 1;
        true
    }

    /// キャレット後の1文字を削除（Delete）
    pub fn delete_forward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        self.anchor = None;

        if self.caret >= self.len_chars() {
            return false;
        }

        let start = self.byte_index(self.caret);
        let end = self.byte_index(self.caret + 1);
        self.text.replace_range(start..end, "");
        true
    }

    /// 選択を解除して左へ移動（選択中なら選択の先頭へ）
    pub fn move_left(&mut self) {
        if self.has_selection() {
            self.caret = self.selection().start;
        } else if self.caret > 0 {
            self.caret -= 1;
        }
        self.anchor = None;
    }

    /// 選択を解除して右へ移動（選択中なら選択の末尾へ）
    pub fn move_right(&mut self) {
        if self.has_selection() {
            self.caret = self.selection().end;
        } else if self.caret < self.len_chars() {
            self.caret += 1;
        }
        self.anchor = None;
    }

    pub fn move_home(&mut self) {
        self.caret = 0;
        self.anchor = None;
    }

    pub fn move_end(&mut self) {
        self.caret = self.len_chars();
        self.anchor = None;
    }

    /// 編集キーに既定の動作を適用
    ///
    /// 内容が変化したら `true`（ホストは続けて入力イベントを発行する）。
    pub fn apply_key(&mut self, key: EditKey) -> bool {
        match key {
            EditKey::Char(ch) => {
                let mut buf = [0u8; 4];
                self.insert_str(ch.encode_utf8(&mut buf))
            }
            EditKey::Backspace => self.delete_backward(),
            EditKey::Delete => self.delete_forward(),
            EditKey::Left => {
                self.move_left();
                false
            }
            EditKey::Right => {
                self.move_right();
                false
            }
            EditKey::Home => {
                self.move_home();
                false
            }
            EditKey::End => {
                self.move_end();
                false
            }
        }
    }
}

impl TextField for LineField {
    fn value(&self) -> &str {
        &self.text
    }

    fn set_value(&mut self, value: &str) {
        if self.text == value {
            return;
        }
        self.text = value.to_string();
        self.caret = self.len_chars();
        self.anchor = None;
    }

    fn selection(&self) -> Selection {
        match self.anchor {
            Some(anchor) => Selection::range(anchor, self.caret),
            None => Selection::caret(self.caret),
        }
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.len_chars();
        let start = start.min(len);
        let end = end.min(len);
        self.anchor = (start != end).then_some(start);
        self.caret = end;
    }
}
