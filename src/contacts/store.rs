//! 連絡先ストア
//!
//! 一覧・追加・削除・お気に入り切り替え・並び替えの5操作を
//! `ContactApi` として定義し、メモリ版と JSON ファイル版を提供する。

use super::search::filter_contacts;
use super::{Contact, ContactId, NewContact};
use crate::error::{store::Result, StoreError};
use crate::validation::{validate_name, validate_phone};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 連絡先ストアの操作
pub trait ContactApi {
    /// 並び順（お気に入り優先 → order_index → 名前）で一覧を返す
    ///
    /// `search` が空白のみなら全件。
    fn list(&self, search: &str) -> Result<Vec<Contact>>;

    /// 検証してから追加し、保存された連絡先を返す
    fn create(&mut self, contact: NewContact) -> Result<Contact>;

    fn delete(&mut self, id: ContactId) -> Result<()>;

    /// お気に入りを反転し、更新後の連絡先を返す
    fn toggle_favorite(&mut self, id: ContactId) -> Result<Contact>;

    /// 並び順を保存する
    ///
    /// 各 ID の `order_index` をリスト中の位置（0始まり）にする。
    /// 存在しない ID は無視する。
    fn update_order(&mut self, ids: &[ContactId]) -> Result<()>;
}

impl<T: ContactApi + ?Sized> ContactApi for Box<T> {
    fn list(&self, search: &str) -> Result<Vec<Contact>> {
        (**self).list(search)
    }

    fn create(&mut self, contact: NewContact) -> Result<Contact> {
        (**self).create(contact)
    }

    fn delete(&mut self, id: ContactId) -> Result<()> {
        (**self).delete(id)
    }

    fn toggle_favorite(&mut self, id: ContactId) -> Result<Contact> {
        (**self).toggle_favorite(id)
    }

    fn update_order(&mut self, ids: &[ContactId]) -> Result<()> {
        (**self).update_order(ids)
    }
}

/// メモリ上の連絡先ストア
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStore {
    /// 次に割り当てる ID
    next_id: u64,
    contacts: Vec<Contact>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            contacts: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn find_mut(&mut self, id: ContactId) -> Result<&mut Contact> {
        self.contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound { id })
    }

    /// 読み込んだデータの ID 採番を既存の最大値より後ろへ揃える
    fn repair_next_id(&mut self) {
        let max_id = self.contacts.iter().map(|c| c.id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactApi for MemoryStore {
    fn list(&self, search: &str) -> Result<Vec<Contact>> {
        let mut contacts = self.contacts.clone();
        contacts.sort_by(|a, b| {
            b.is_favorite
                .cmp(&a.is_favorite)
                .then(a.order_index.cmp(&b.order_index))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(filter_contacts(contacts, search))
    }

    fn create(&mut self, contact: NewContact) -> Result<Contact> {
        let name = validate_name(&contact.name)?;
        let phone = validate_phone(&contact.phone)?;

        let max_order = self
            .contacts
            .iter()
            .map(|c| c.order_index)
            .max()
            .unwrap_or(0)
            .max(0);

        let created = Contact {
            id: ContactId(self.next_id),
            name,
            phone,
            is_favorite: contact.is_favorite,
            order_index: max_order + 1,
        };
        self.next_id += 1;
        self.contacts.push(created.clone());

        info!("contact {} created", created.id);
        Ok(created)
    }

    fn delete(&mut self, id: ContactId) -> Result<()> {
        let index = self
            .contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::NotFound { id })?;
        self.contacts.remove(index);

        info!("contact {} deleted", id);
        Ok(())
    }

    fn toggle_favorite(&mut self, id: ContactId) -> Result<Contact> {
        let contact = self.find_mut(id)?;
        contact.is_favorite = !contact.is_favorite;
        debug!("contact {} favorite = {}", id, contact.is_favorite);
        Ok(contact.clone())
    }

    fn update_order(&mut self, ids: &[ContactId]) -> Result<()> {
        for (index, id) in ids.iter().enumerate() {
            if let Some(contact) = self.contacts.iter_mut().find(|c| c.id == *id) {
                contact.order_index = index as i64;
            }
        }
        debug!("order updated for {} contacts", ids.len());
        Ok(())
    }
}

/// JSON ファイルに永続化する連絡先ストア
///
/// 変更のたびにファイル全体を書き直す。
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// ファイルを開く（存在しなければ空のストア）
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let inner = if path.exists() {
            Self::read(&path)?
        } else {
            MemoryStore::new()
        };

        info!("contact store opened: {} ({} contacts)", path.display(), inner.len());
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<MemoryStore> {
        let content = fs::read_to_string(path).map_err(|err| io_error(path, err))?;
        let mut store: MemoryStore =
            serde_json::from_str(&content).map_err(|err| StoreError::Serialization {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
        store.repair_next_id();
        Ok(store)
    }

    fn write(path: &Path, store: &MemoryStore) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| io_error(path, err))?;
        }

        let json = serde_json::to_string_pretty(store).map_err(|err| StoreError::Serialization {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

        // 書きかけのファイルを残さないよう一時ファイル経由で置き換える
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|err| io_error(&tmp, err))?;
        fs::rename(&tmp, path).map_err(|err| io_error(path, err))?;
        Ok(())
    }

    /// 複製に変更を適用し、ファイルへの保存に成功したときだけ反映する
    fn commit<T>(&mut self, change: impl FnOnce(&mut MemoryStore) -> Result<T>) -> Result<T> {
        let mut staged = self.inner.clone();
        let value = change(&mut staged)?;
        Self::write(&self.path, &staged)?;
        self.inner = staged;
        Ok(value)
    }
}

impl ContactApi for JsonFileStore {
    fn list(&self, search: &str) -> Result<Vec<Contact>> {
        self.inner.list(search)
    }

    fn create(&mut self, contact: NewContact) -> Result<Contact> {
        self.commit(|store| store.create(contact))
    }

    fn delete(&mut self, id: ContactId) -> Result<()> {
        self.commit(|store| store.delete(id))
    }

    fn toggle_favorite(&mut self, id: ContactId) -> Result<Contact> {
        self.commit(|store| store.toggle_favorite(id))
    }

    fn update_order(&mut self, ids: &[ContactId]) -> Result<()> {
        self.commit(|store| store.update_order(ids))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
