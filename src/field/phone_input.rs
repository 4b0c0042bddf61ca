//! 電話番号入力欄
//!
//! `LineField` にマスク入力エディタを組み込んだホストウィジェット。
//! イベントは DOM と同じ順序（keydown → 既定の編集 → input）で処理し、
//! 予約された補正タスクは次のイベントより前に消化する。

use super::{LineField, MicrotaskQueue, Selection, TextField};
use crate::mask::{CaretSettle, CaretTask, EditKey, MaskedPhoneEditor, RawDigits};

/// 入力欄に届くイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// フォーカス取得
    Focus,
    /// キー押下
    Key(EditKey),
    /// 貼り付け・自動入力
    Paste(String),
}

/// マスク付き電話番号入力欄
#[derive(Debug, Clone, Default)]
pub struct PhoneInput {
    field: LineField,
    editor: MaskedPhoneEditor,
    tasks: MicrotaskQueue<CaretTask>,
}

impl PhoneInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_caret_settle(settle: CaretSettle) -> Self {
        Self {
            editor: MaskedPhoneEditor::new().with_caret_settle(settle),
            ..Self::default()
        }
    }

    /// 1イベントを処理し、ターンの終わりに遅延タスクを消化する
    pub fn handle(&mut self, event: FieldEvent) {
        self.dispatch(event);
        self.finish_turn();
    }

    /// イベントを処理するが遅延タスクは残す
    ///
    /// 次に `handle` か `finish_turn` を呼ぶまでキャレット補正は反映されない。
    pub fn dispatch(&mut self, event: FieldEvent) {
        // 前のターンの補正は必ず先に反映する
        self.finish_turn();

        match event {
            FieldEvent::Focus => self.editor.on_focus(&mut self.field),
            FieldEvent::Key(key) => {
                let outcome = self.editor.on_key_down(&mut self.field, key);
                if outcome.is_suppressed() {
                    return;
                }
                if self.field.apply_key(key) {
                    self.editor.on_input(&mut self.field, &mut self.tasks);
                }
            }
            FieldEvent::Paste(text) => {
                if self.field.insert_str(&text) {
                    self.editor.on_input(&mut self.field, &mut self.tasks);
                }
            }
        }
    }

    /// 予約済みのキャレット補正を実行
    pub fn finish_turn(&mut self) {
        let editor = &self.editor;
        let field = &mut self.field;
        self.tasks.run_until_idle(|task, _| editor.run_task(field, task));
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.tasks.is_idle()
    }

    /// 表示文字列
    pub fn value(&self) -> &str {
        self.field.value()
    }

    pub fn caret(&self) -> usize {
        self.field.caret()
    }

    pub fn selection(&self) -> Selection {
        self.field.selection()
    }

    /// 表示中の数字列
    pub fn digits(&self) -> RawDigits {
        RawDigits::from_input(self.field.value())
    }

    /// 描画用のキャレット前テキスト
    pub fn text_before_caret(&self) -> &str {
        self.field.text_before_caret()
    }

    /// フォームのリセット（数字列は破棄される）
    pub fn reset(&mut self) {
        self.tasks.clear();
        self.field.clear();
    }
}
