//! マスク付き電話番号エディタ
//!
//! ホストのテキストフィールドから受け取る3つのイベント
//! （フォーカス・キー押下・入力）ごとに、表示文字列とキャレット位置を
//! 再計算する。内部状態は持たず、毎回フィールドの現在値から復元する。

use super::caret::CaretMover;
use super::template::{RawDigits, PREFIX, PREFIX_LEN};
use crate::field::{MicrotaskQueue, TextField};
use log::debug;
use serde::{Deserialize, Serialize};

/// エディタが関心を持つ編集キー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// 文字入力
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// キー押下の処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// ホストの既定の編集動作を続行
    Default,
    /// 既定の動作を抑止（エディタがキャレットを移動済み）
    Suppressed,
}

impl KeyOutcome {
    pub fn is_suppressed(self) -> bool {
        matches!(self, KeyOutcome::Suppressed)
    }
}

/// 次のターンで実行する補正タスク
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretTask {
    /// 書き戻し後のキャレットを数字の境界へ寄せる
    Settle,
}

/// 再整形後のキャレット補正をいつ行うか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaretSettle {
    /// ホストの反映を待ってから補正（次のターン）
    #[default]
    Deferred,
    /// 同期的に読み戻せるホスト向けに即時補正
    Immediate,
}

/// `+7 (XXX) XXX-XX-XX` 形式のマスク入力エディタ
#[derive(Debug, Clone, Default)]
pub struct MaskedPhoneEditor {
    settle: CaretSettle,
}

impl MaskedPhoneEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_caret_settle(mut self, settle: CaretSettle) -> Self {
        self.settle = settle;
        self
    }

    pub fn caret_settle(&self) -> CaretSettle {
        self.settle
    }

    /// フォーカス取得時
    ///
    /// 空欄またはプレフィックスのみなら、最初の数字の入力位置へキャレットを置く。
    pub fn on_focus<F: TextField + ?Sized>(&self, field: &mut F) {
        if field.value().is_empty() {
            field.set_value(PREFIX);
        } else if field.value() != PREFIX {
            return;
        }

        field.set_caret(PREFIX_LEN);
        debug!("phone field focused, caret placed after prefix");
    }

    /// キー押下時（ホストの既定動作より前）
    pub fn on_key_down<F: TextField + ?Sized>(&self, field: &mut F, key: EditKey) -> KeyOutcome {
        match key {
            EditKey::Backspace => self.backspace(field),
            EditKey::Delete => self.delete(field),
            _ => KeyOutcome::Default,
        }
    }

    /// Backspace: 直前が区切り文字なら削除せず、区切りの連なりを飛び越える
    fn backspace<F: TextField + ?Sized>(&self, field: &mut F) -> KeyOutcome {
        let selection = field.selection();
        if !selection.is_collapsed() {
            return KeyOutcome::Default;
        }

        let caret = selection.start;
        if !CaretMover::separator_before(field.value(), caret) {
            return KeyOutcome::Default;
        }

        let target = CaretMover::previous_digit_position(field.value(), caret);
        field.set_caret(target);
        debug!("backspace skipped separators: {} -> {}", caret, target);
        KeyOutcome::Suppressed
    }

    /// Delete: 直後が区切り文字なら、区切りの連なりを選択して既定動作を抑止
    ///
    /// 続けて Delete が押され、選択が区切りだけで構成され直後に数字がある場合は
    /// その数字まで選択を広げてホストに削除させる。
    fn delete<F: TextField + ?Sized>(&self, field: &mut F) -> KeyOutcome {
        let selection = field.selection();
        let value = field.value();

        if selection.is_collapsed() {
            let caret = selection.start;
            if !CaretMover::separator_at(value, caret) {
                return KeyOutcome::Default;
            }

            let end = CaretMover::next_digit_position(value, caret + 1);
            field.set_selection(caret, end);
            debug!("delete selected separator run {}..{}", caret, end);
            return KeyOutcome::Suppressed;
        }

        let covers_separators_only = value
            .chars()
            .skip(selection.start)
            .take(selection.len())
            .all(super::template::is_separator);
        let digit_follows = value
            .chars()
            .nth(selection.end)
            .is_some_and(|ch| ch.is_ascii_digit());

        if covers_separators_only && digit_follows {
            field.set_selection(selection.start, selection.end + 1);
        }
        KeyOutcome::Default
    }

    /// 内容変更後の再整形
    ///
    /// フィールドの値から数字列を取り出し直し、テンプレートに流し込んで
    /// 書き戻す。キャレット補正は設定に応じて即時または次のターンに行う。
    pub fn on_input<F: TextField + ?Sized>(
        &self,
        field: &mut F,
        tasks: &mut MicrotaskQueue<CaretTask>,
    ) -> RawDigits {
        let raw = RawDigits::from_input(field.value());
        let display = raw.to_display();

        debug!("reformat {:?} -> {:?}", field.value(), display);
        field.set_value(&display);

        match self.settle {
            CaretSettle::Deferred => tasks.schedule(CaretTask::Settle),
            CaretSettle::Immediate => self.run_task(field, CaretTask::Settle),
        }

        raw
    }

    /// 予約された補正タスクを実行
    pub fn run_task<F: TextField + ?Sized>(&self, field: &mut F, task: CaretTask) {
        match task {
            CaretTask::Settle => {
                let caret = field.caret();
                let settled = CaretMover::settle(field.value(), caret);
                field.set_caret(settled);
            }
        }
    }
}
