//! 連絡先モジュール
//!
//! 連絡先データ、検索、保存先（ストア）と画面側のコントローラを提供

pub mod controller;
pub mod search;
pub mod store;

// 公開API
pub use controller::{ContactsController, DropPlacement, LoadState};
pub use store::{ContactApi, JsonFileStore, MemoryStore};

use serde::{Deserialize, Serialize};
use std::fmt;

/// 連絡先の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 保存済みの連絡先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    /// `+7 (999) 999-99-99` 形式
    pub phone: String,
    #[serde(default)]
    pub is_favorite: bool,
    /// 同じグループ内での並び順
    #[serde(default)]
    pub order_index: i64,
}

/// 追加要求（検証済み）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub is_favorite: bool,
}
