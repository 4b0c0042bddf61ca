//! キーバインド
//!
//! 一覧画面のキー割り当てと、入力欄向けの編集キー変換

use crate::mask::EditKey;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

/// 一覧画面のアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SelectPrevious,
    SelectNext,
    /// 追加フォームを開く
    OpenForm,
    /// 検索欄へ移動
    FocusSearch,
    ToggleFavorite,
    /// 削除確認へ
    RequestDelete,
    /// 並び替え開始
    StartDrag,
    Reload,
    Quit,
}

/// キーの組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombination {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }
}

impl From<&KeyEvent> for KeyCombination {
    fn from(event: &KeyEvent) -> Self {
        // Shift 付きの文字は文字側に反映済み
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers.difference(KeyModifiers::SHIFT),
            _ => event.modifiers,
        };
        Self::new(event.code, modifiers)
    }
}

/// 一覧画面のキーマップ
#[derive(Debug, Clone)]
pub struct ListKeyMap {
    bindings: HashMap<KeyCombination, Action>,
}

impl ListKeyMap {
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
        };
        keymap.load_default_bindings();
        keymap
    }

    fn load_default_bindings(&mut self) {
        use Action::*;

        let bindings = [
            (KeyCombination::plain(KeyCode::Up), SelectPrevious),
            (KeyCombination::plain(KeyCode::Char('k')), SelectPrevious),
            (KeyCombination::ctrl('p'), SelectPrevious),
            (KeyCombination::plain(KeyCode::Down), SelectNext),
            (KeyCombination::plain(KeyCode::Char('j')), SelectNext),
            (KeyCombination::ctrl('n'), SelectNext),
            (KeyCombination::plain(KeyCode::Char('a')), OpenForm),
            (KeyCombination::plain(KeyCode::Char('/')), FocusSearch),
            (KeyCombination::plain(KeyCode::Char('f')), ToggleFavorite),
            (KeyCombination::plain(KeyCode::Char('d')), RequestDelete),
            (KeyCombination::plain(KeyCode::Delete), RequestDelete),
            (KeyCombination::plain(KeyCode::Char('m')), StartDrag),
            (KeyCombination::plain(KeyCode::Char('r')), Reload),
            (KeyCombination::plain(KeyCode::Char('q')), Quit),
        ];
        self.bindings.extend(bindings);
    }

    /// キーバインドを追加（既存の割り当ては上書き）
    pub fn bind(&mut self, key: KeyCombination, action: Action) {
        self.bindings.insert(key, action);
    }

    pub fn lookup(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(&KeyCombination::from(event)).copied()
    }
}

impl Default for ListKeyMap {
    fn default() -> Self {
        Self::new()
    }
}

/// どの画面でも効く終了キー（C-c）か
pub fn is_interrupt(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL)
}

/// 押下・リピートのみを処理対象にする（離しは無視）
pub fn is_press(event: &KeyEvent) -> bool {
    event.kind != KeyEventKind::Release
}

/// 入力欄に渡す編集キーへ変換
///
/// Ctrl/Alt 付きの文字は編集として扱わない。
pub fn to_edit_key(event: &KeyEvent) -> Option<EditKey> {
    match event.code {
        KeyCode::Char(ch) => {
            if event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                None
            } else {
                Some(EditKey::Char(ch))
            }
        }
        KeyCode::Backspace => Some(EditKey::Backspace),
        KeyCode::Delete => Some(EditKey::Delete),
        KeyCode::Left => Some(EditKey::Left),
        KeyCode::Right => Some(EditKey::Right),
        KeyCode::Home => Some(EditKey::Home),
        KeyCode::End => Some(EditKey::End),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_list_bindings() {
        let keymap = ListKeyMap::new();
        assert_eq!(keymap.lookup(&key(KeyCode::Char('a'))), Some(Action::OpenForm));
        assert_eq!(keymap.lookup(&key(KeyCode::Down)), Some(Action::SelectNext));
        assert_eq!(
            keymap.lookup(&KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL)),
            Some(Action::SelectPrevious)
        );
        assert_eq!(keymap.lookup(&key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn shifted_characters_ignore_shift() {
        let keymap = ListKeyMap::new();
        let slash = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::SHIFT);
        assert_eq!(keymap.lookup(&slash), Some(Action::FocusSearch));
    }

    #[test]
    fn custom_binding_overrides() {
        let mut keymap = ListKeyMap::new();
        keymap.bind(KeyCombination::plain(KeyCode::Char('q')), Action::Reload);
        assert_eq!(keymap.lookup(&key(KeyCode::Char('q'))), Some(Action::Reload));
    }

    #[test]
    fn edit_key_conversion() {
        assert_eq!(to_edit_key(&key(KeyCode::Char('5'))), Some(EditKey::Char('5')));
        assert_eq!(to_edit_key(&key(KeyCode::Backspace)), Some(EditKey::Backspace));
        assert_eq!(to_edit_key(&key(KeyCode::Home)), Some(EditKey::Home));
        assert_eq!(to_edit_key(&key(KeyCode::Enter)), None);

        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(to_edit_key(&ctrl_a), None);

        let upper = KeyEvent::new(KeyCode::Char('Я'), KeyModifiers::SHIFT);
        assert_eq!(to_edit_key(&upper), Some(EditKey::Char('Я')));
    }

    #[test]
    fn interrupt_detection() {
        assert!(is_interrupt(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_interrupt(&key(KeyCode::Char('c'))));
    }
}
