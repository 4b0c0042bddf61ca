//! メインアプリケーション構造体
//!
//! 画面モードの管理とキー入力の振り分け。端末の操作は
//! `frontend::tui` が担い、ここは端末なしでテストできる状態だけを持つ。

use crate::contacts::{Contact, ContactApi, ContactId, ContactsController, LoadState};
use crate::error::{ErrorDisplay, ErrorLevel, PhonebookError};
use crate::field::{FieldEvent, LineField, PhoneInput, TextField};
use crate::input::{is_interrupt, is_press, to_edit_key, Action, InputEvent, ListKeyMap};
use crate::mask::CaretSettle;
use crate::validation::ContactDraft;
use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, info};

/// 名前欄の最大文字数
const NAME_MAX_CHARS: usize = 100;

/// 画面モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 一覧の閲覧
    List,
    /// 検索欄に入力中
    Search,
    /// 追加フォーム（モーダル）
    Form,
    /// 削除の確認待ち
    ConfirmDelete(ContactId),
    /// 並び替え中
    Drag,
}

/// フォーム内のフォーカス位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Name,
    Phone,
    Favorite,
}

impl FormFocus {
    fn next(self) -> Self {
        match self {
            FormFocus::Name => FormFocus::Phone,
            FormFocus::Phone => FormFocus::Favorite,
            FormFocus::Favorite => FormFocus::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormFocus::Name => FormFocus::Favorite,
            FormFocus::Phone => FormFocus::Name,
            FormFocus::Favorite => FormFocus::Phone,
        }
    }
}

/// 連絡先追加フォーム
#[derive(Debug, Clone)]
pub struct ContactForm {
    name: LineField,
    phone: PhoneInput,
    is_favorite: bool,
    focus: FormFocus,
}

impl ContactForm {
    pub fn new(settle: CaretSettle) -> Self {
        Self {
            name: LineField::new().with_max_chars(NAME_MAX_CHARS),
            phone: PhoneInput::with_caret_settle(settle),
            is_favorite: false,
            focus: FormFocus::Name,
        }
    }

    pub fn name(&self) -> &LineField {
        &self.name
    }

    pub fn phone(&self) -> &PhoneInput {
        &self.phone
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    fn focus_on(&mut self, focus: FormFocus) {
        self.focus = focus;
        if focus == FormFocus::Phone {
            self.phone.handle(FieldEvent::Focus);
        }
    }

    fn draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.value().to_string(),
            phone: self.phone.value().to_string(),
            is_favorite: self.is_favorite,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_on(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.focus_on(self.focus.previous()),
            _ => match self.focus {
                FormFocus::Name => {
                    if let Some(edit) = to_edit_key(key) {
                        self.name.apply_key(edit);
                    }
                }
                FormFocus::Phone => {
                    if let Some(edit) = to_edit_key(key) {
                        self.phone.handle(FieldEvent::Key(edit));
                    }
                }
                FormFocus::Favorite => {
                    if key.code == KeyCode::Char(' ') {
                        self.is_favorite = !self.is_favorite;
                    }
                }
            },
        }
    }

    fn paste(&mut self, text: &str) {
        match self.focus {
            FormFocus::Name => {
                self.name.insert_str(text);
            }
            FormFocus::Phone => self.phone.handle(FieldEvent::Paste(text.to_string())),
            FormFocus::Favorite => {}
        }
    }

    /// 入力内容を破棄して名前欄へ戻る
    fn reset(&mut self) {
        self.name.clear();
        self.phone.reset();
        self.is_favorite = false;
        self.focus = FormFocus::Name;
    }
}

/// 電話帳アプリケーション
pub struct App<S: ContactApi> {
    contacts: ContactsController<S>,
    search: LineField,
    form: ContactForm,
    mode: Mode,
    /// 一覧の選択位置
    selected: usize,
    keymap: ListKeyMap,
    status: Option<ErrorDisplay>,
    running: bool,
}

impl<S: ContactApi> App<S> {
    /// 作成して最初の一覧を読み込む
    pub fn new(api: S, settle: CaretSettle) -> Self {
        let mut app = Self {
            contacts: ContactsController::new(api),
            search: LineField::new(),
            form: ContactForm::new(settle),
            mode: Mode::List,
            selected: 0,
            keymap: ListKeyMap::new(),
            status: None,
            running: true,
        };
        app.contacts.load("");
        app
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn contacts(&self) -> &[Contact] {
        self.contacts.contacts()
    }

    pub fn load_state(&self) -> &LoadState {
        self.contacts.load_state()
    }

    pub fn dragged(&self) -> Option<ContactId> {
        self.contacts.dragged()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.contacts().get(self.selected)
    }

    pub fn search_field(&self) -> &LineField {
        &self.search
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn status(&self) -> Option<&ErrorDisplay> {
        self.status.as_ref()
    }

    /// 期限切れのステータス表示を消す
    pub fn tick(&mut self) {
        if self.status.as_ref().is_some_and(ErrorDisplay::is_expired) {
            self.status = None;
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(text) => self.handle_paste(&text),
            InputEvent::Resize { .. } | InputEvent::Timeout | InputEvent::Ignored => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if !is_press(&key) {
            return;
        }
        if is_interrupt(&key) {
            self.running = false;
            return;
        }

        match self.mode {
            Mode::List => self.handle_list_key(&key),
            Mode::Search => self.handle_search_key(&key),
            Mode::Form => self.handle_form_key(&key),
            Mode::ConfirmDelete(id) => self.handle_confirm_key(&key, id),
            Mode::Drag => self.handle_drag_key(&key),
        }
    }

    fn handle_paste(&mut self, text: &str) {
        match self.mode {
            Mode::Form => self.form.paste(text),
            Mode::Search => {
                if self.search.insert_str(text) {
                    self.apply_search();
                }
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: &KeyEvent) {
        let Some(action) = self.keymap.lookup(key) else {
            return;
        };
        debug!("list action: {:?}", action);

        match action {
            Action::SelectPrevious => self.selected = self.selected.saturating_sub(1),
            Action::SelectNext => {
                if self.selected + 1 < self.contacts().len() {
                    self.selected += 1;
                }
            }
            Action::OpenForm => self.open_form(),
            Action::FocusSearch => self.mode = Mode::Search,
            Action::ToggleFavorite => {
                if let Some(id) = self.selected_contact().map(|c| c.id) {
                    let result = self.contacts.toggle_favorite(id).map(|_| ());
                    self.report(result);
                    // 切り替えた連絡先を選択したままにする
                    self.select_contact(id);
                }
            }
            Action::RequestDelete => {
                if let Some(id) = self.selected_contact().map(|c| c.id) {
                    self.mode = Mode::ConfirmDelete(id);
                }
            }
            Action::StartDrag => {
                if let Some(id) = self.selected_contact().map(|c| c.id) {
                    if self.contacts.drag_start(id) {
                        self.mode = Mode::Drag;
                    }
                }
            }
            Action::Reload => {
                self.contacts.reload();
                self.clamp_selection();
            }
            Action::Quit => self.running = false,
        }
    }

    fn handle_search_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Enter => self.mode = Mode::List,
            KeyCode::Esc => {
                self.search.clear();
                self.apply_search();
                self.mode = Mode::List;
            }
            _ => {
                if let Some(edit) = to_edit_key(key) {
                    if self.search.apply_key(edit) {
                        self.apply_search();
                    }
                }
            }
        }
    }

    fn apply_search(&mut self) {
        let query = self.search.value().to_string();
        self.contacts.load(&query);
        self.selected = 0;
    }

    fn handle_form_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_form(),
            KeyCode::Enter => self.submit_form(),
            _ => self.form.handle_key(key),
        }
    }

    fn handle_confirm_key(&mut self, key: &KeyEvent, id: ContactId) {
        self.mode = Mode::List;
        if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            let result = self.contacts.delete(id);
            if result.is_ok() {
                self.show(ErrorLevel::Info, "Контакт удалён");
            }
            self.report(result);
            self.clamp_selection();
        }
    }

    fn handle_drag_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.contacts.move_dragged(true);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.contacts.move_dragged(false);
            }
            KeyCode::Enter | KeyCode::Char('m') => {
                let result = self.contacts.drop_dragged();
                self.report(result);
                self.mode = Mode::List;
            }
            KeyCode::Esc => {
                self.contacts.cancel_drag();
                self.mode = Mode::List;
            }
            _ => {}
        }

        match self.contacts.dragged() {
            Some(id) => self.select_contact(id),
            None => self.clamp_selection(),
        }
    }

    fn open_form(&mut self) {
        self.form.reset();
        self.mode = Mode::Form;
    }

    fn close_form(&mut self) {
        self.form.reset();
        self.mode = Mode::List;
    }

    fn submit_form(&mut self) {
        let draft = self.form.draft();
        match self.contacts.add(&draft) {
            Ok(contact) => {
                info!("contact {} added from form", contact.id);
                self.close_form();
                self.select_contact(contact.id);
                self.show(ErrorLevel::Info, "Контакт добавлен");
            }
            // フォームは開いたまま修正を待つ
            Err(err) => self.show_error(&err),
        }
    }

    fn select_contact(&mut self, id: ContactId) {
        match self.contacts().iter().position(|c| c.id == id) {
            Some(index) => self.selected = index,
            None => self.clamp_selection(),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.contacts().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn report(&mut self, result: crate::error::Result<()>) {
        if let Err(err) = result {
            self.show_error(&err);
        }
    }

    fn show_error(&mut self, error: &PhonebookError) {
        self.status = Some(ErrorDisplay::new(error));
    }

    fn show(&mut self, level: ErrorLevel, message: &str) {
        self.status = Some(ErrorDisplay::with_level(message, level));
    }
}
