//! 連絡先一覧のコントローラ
//!
//! 読み込み状態やドラッグ中の項目を、グローバル変数ではなく
//! このインスタンスのフィールドとして保持する。ページ（アプリ起動）ごとに
//! 1つ作り、ストアへの要求と表示用の並びを仲介する。

use super::store::ContactApi;
use super::{Contact, ContactId};
use crate::error::Result;
use crate::validation::ContactDraft;
use log::warn;

/// 一覧の読み込み状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// まだ読み込んでいない
    Idle,
    Loaded,
    /// 読み込み失敗（メッセージ付き）
    Failed(String),
}

/// ドロップ先の位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPlacement {
    /// 対象の直前
    Above,
    /// 対象の直後
    Below,
}

/// 連絡先一覧コントローラ
#[derive(Debug)]
pub struct ContactsController<S> {
    /// 連絡先ストア
    api: S,
    /// 表示中の並び（お気に入りが先頭）
    contacts: Vec<Contact>,
    /// 現在の検索語
    query: String,
    /// 読み込み状態
    load_state: LoadState,
    /// ドラッグ中の連絡先
    dragged: Option<ContactId>,
}

impl<S: ContactApi> ContactsController<S> {
    pub fn new(api: S) -> Self {
        Self {
            api,
            contacts: Vec::new(),
            query: String::new(),
            load_state: LoadState::Idle,
            dragged: None,
        }
    }

    pub fn api(&self) -> &S {
        &self.api
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// 検索語を指定して一覧を読み込む
    ///
    /// ストア呼び出しは同期的で、戻るときには必ず `Loaded` か `Failed`
    /// になっている。失敗してもエラーは返さず、一覧を空にする。
    pub fn load(&mut self, query: &str) {
        self.query = query.trim().to_string();

        match self.api.list(&self.query) {
            Ok(contacts) => {
                self.contacts = favorites_first(contacts);
                self.load_state = LoadState::Loaded;
            }
            Err(err) => {
                warn!("failed to load contacts: {}", err);
                self.contacts.clear();
                self.load_state = LoadState::Failed(err.to_string());
            }
        }
    }

    /// 現在の検索語で読み込み直す
    pub fn reload(&mut self) {
        let query = self.query.clone();
        self.load(&query);
    }

    /// 入力内容を検証して追加し、一覧を読み込み直す
    pub fn add(&mut self, draft: &ContactDraft) -> Result<Contact> {
        let new_contact = draft.validate()?;
        let created = self.api.create(new_contact)?;
        self.reload();
        Ok(created)
    }

    pub fn delete(&mut self, id: ContactId) -> Result<()> {
        self.api.delete(id)?;
        self.reload();
        Ok(())
    }

    pub fn toggle_favorite(&mut self, id: ContactId) -> Result<Contact> {
        let updated = self.api.toggle_favorite(id)?;
        self.reload();
        Ok(updated)
    }

    fn position(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == id)
    }

    pub fn dragged(&self) -> Option<ContactId> {
        self.dragged
    }

    /// ドラッグ開始
    pub fn drag_start(&mut self, id: ContactId) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.dragged = Some(id);
        true
    }

    /// ドラッグ中の項目を `target` の前後へ移す
    ///
    /// お気に入りと通常の連絡先をまたぐ移動はできない。
    pub fn drag_over(&mut self, target: ContactId, placement: DropPlacement) -> bool {
        let Some(dragged) = self.dragged else {
            return false;
        };
        if dragged == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(dragged), self.position(target)) else {
            return false;
        };
        if self.contacts[from].is_favorite != self.contacts[to].is_favorite {
            return false;
        }

        let item = self.contacts.remove(from);
        let target_index = if from < to { to - 1 } else { to };
        let insert_at = match placement {
            DropPlacement::Above => target_index,
            DropPlacement::Below => target_index + 1,
        };
        self.contacts.insert(insert_at, item);
        true
    }

    /// ドラッグ中の項目を隣の項目の向こう側へ1つ動かす
    pub fn move_dragged(&mut self, up: bool) -> bool {
        let Some(index) = self.dragged.and_then(|id| self.position(id)) else {
            return false;
        };
        let neighbour = if up {
            index.checked_sub(1)
        } else {
            Some(index + 1).filter(|&i| i < self.contacts.len())
        };
        let Some(neighbour) = neighbour else {
            return false;
        };

        let target = self.contacts[neighbour].id;
        let placement = if up {
            DropPlacement::Above
        } else {
            DropPlacement::Below
        };
        self.drag_over(target, placement)
    }

    /// ドロップして現在の並びを保存する
    ///
    /// 保存に失敗した場合はストアの並びを読み込み直してからエラーを返す。
    pub fn drop_dragged(&mut self) -> Result<()> {
        if self.dragged.take().is_none() {
            return Ok(());
        }

        let ids: Vec<ContactId> = self.contacts.iter().map(|c| c.id).collect();
        if ids.is_empty() {
            return Ok(());
        }

        if let Err(err) = self.api.update_order(&ids) {
            warn!("failed to save contact order: {}", err);
            self.reload();
            return Err(err.into());
        }
        Ok(())
    }

    /// ドラッグ状態だけを解除（ドロップ後の後始末）
    pub fn drag_end(&mut self) {
        self.dragged = None;
    }

    /// ドラッグを取り消し、保存済みの並びに戻す
    pub fn cancel_drag(&mut self) {
        if self.dragged.take().is_some() {
            self.reload();
        }
    }
}

/// お気に入りを先頭に寄せる（各グループ内の順序は保つ）
fn favorites_first(contacts: Vec<Contact>) -> Vec<Contact> {
    let (mut favorites, regular): (Vec<_>, Vec<_>) =
        contacts.into_iter().partition(|c| c.is_favorite);
    favorites.extend(regular);
    favorites
}
