//! 画面描画
//!
//! 検索欄・連絡先一覧・ステータスライン・追加モーダルを描画する。

use super::form::render_form;
use super::layout::{string_width, truncate_string, AppLayout};
use crate::app::{App, Mode};
use crate::contacts::{Contact, ContactApi, LoadState};
use crate::error::ErrorLevel;
use ratatui::{
    backend::Backend,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

/// 描画器
#[derive(Debug, Default)]
pub struct Renderer {
    /// 描画したフレーム数
    frame_count: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// メイン描画処理
    pub fn render<B: Backend, S: ContactApi>(
        &mut self,
        terminal: &mut Terminal<B>,
        app: &App<S>,
    ) -> io::Result<()> {
        terminal.draw(|frame| draw(frame, app))?;
        self.frame_count += 1;
        Ok(())
    }
}

/// 1フレーム分を描画
pub fn draw<S: ContactApi>(frame: &mut Frame<'_>, app: &App<S>) {
    let area = frame.area();
    let layout = match AppLayout::calculate(area) {
        Ok(layout) => layout,
        Err(err) => {
            let message = Paragraph::new(err.to_string()).style(Style::default().fg(Color::Red));
            frame.render_widget(message, area);
            return;
        }
    };

    let mut cursor = render_search(frame, layout.search, app);
    render_list(frame, layout.list, app);
    render_status_line(frame, layout.status, app);
    render_help(frame, layout.help, app.mode());

    if app.mode() == Mode::Form {
        cursor = render_form(frame, area, app.form());
    }

    // カーソル位置設定
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

fn render_search<S: ContactApi>(frame: &mut Frame<'_>, area: Rect, app: &App<S>) -> Option<Position> {
    let active = app.mode() == Mode::Search;
    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Поиск ")
        .border_style(border_style);
    let inner = block.inner(area);

    let text = app.search_field().text();
    let paragraph = if text.is_empty() && !active {
        Paragraph::new(Span::styled(
            "Имя или номер телефона",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(text.to_string())
    };
    frame.render_widget(paragraph.block(block), area);

    if !active {
        return None;
    }
    let column = string_width(app.search_field().text_before_caret())
        .min(inner.width.saturating_sub(1) as usize);
    Some(Position::new(inner.x + column as u16, inner.y))
}

fn render_list<S: ContactApi>(frame: &mut Frame<'_>, area: Rect, app: &App<S>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Контакты ({}) ", app.contacts().len()));

    let placeholder = match app.load_state() {
        LoadState::Idle => Some(Line::from("Загрузка контактов...")),
        LoadState::Failed(message) => Some(Line::styled(
            format!("Ошибка загрузки контактов: {}", message),
            Style::default().fg(Color::Red),
        )),
        LoadState::Loaded if app.contacts().is_empty() => Some(Line::styled(
            "Контакты не найдены",
            Style::default().fg(Color::DarkGray),
        )),
        LoadState::Loaded => None,
    };
    if let Some(line) = placeholder {
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    // 枠線と選択記号の分を除いた幅
    let width = (area.width as usize).saturating_sub(4);
    let dragged = app.dragged();
    let items: Vec<ListItem<'_>> = app
        .contacts()
        .iter()
        .map(|contact| {
            let is_dragged = dragged == Some(contact.id);
            contact_item(contact, width, is_dragged)
        })
        .collect();

    let highlight = if dragged.is_some() {
        Style::default().fg(Color::Black).bg(Color::Magenta)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn contact_item(contact: &Contact, width: usize, is_dragged: bool) -> ListItem<'static> {
    let marker = if contact.is_favorite { "♥ " } else { "♡ " };
    let text = truncate_string(
        &format!("{} ({})", contact.name, contact.phone),
        width.saturating_sub(string_width(marker)),
    );

    let mut style = if contact.is_favorite {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    if is_dragged {
        style = style.add_modifier(Modifier::BOLD);
    }

    ListItem::new(Line::from(vec![Span::raw(marker), Span::raw(text)])).style(style)
}

fn render_status_line<S: ContactApi>(frame: &mut Frame<'_>, area: Rect, app: &App<S>) {
    let line = if let Mode::ConfirmDelete(id) = app.mode() {
        let name = app
            .contacts()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or_default();
        Line::styled(
            format!("Вы уверены, что хотите удалить контакт {}? (y/n)", name),
            Style::default().fg(Color::Yellow),
        )
    } else if let Some(status) = app.status() {
        let color = match status.level {
            ErrorLevel::Info => Color::Green,
            ErrorLevel::Warning => Color::Yellow,
            ErrorLevel::Error | ErrorLevel::Fatal => Color::Red,
        };
        Line::styled(status.message.clone(), Style::default().fg(color))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame<'_>, area: Rect, mode: Mode) {
    let text = match mode {
        Mode::List => "a: добавить  /: поиск  f: избранное  d: удалить  m: переместить  q: выход",
        Mode::Search => "Enter: готово  Esc: сбросить поиск",
        Mode::Form => "Tab: следующее поле  Пробел: избранное  Enter: сохранить  Esc: закрыть",
        Mode::ConfirmDelete(_) => "y: удалить  любая другая клавиша: отмена",
        Mode::Drag => "↑/↓: переместить  Enter: сохранить порядок  Esc: отмена",
    };
    let text = truncate_string(text, area.width as usize);
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        area,
    );
}
