//! 連絡先追加モーダルの描画

use super::layout::{centered_rect, string_width, truncate_string};
use crate::app::{ContactForm, FormFocus};
use crate::field::TextField;
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MODAL_WIDTH: u16 = 48;
const MODAL_HEIGHT: u16 = 7;
/// ラベル列の幅
const LABEL_WIDTH: usize = 10;
/// 空の電話番号欄に出す見本
const PHONE_PLACEHOLDER: &str = "+7 (999) 999-99-99";

/// モーダルを描画し、入力欄のカーソル位置を返す
pub fn render_form(frame: &mut Frame<'_>, area: Rect, form: &ContactForm) -> Option<Position> {
    let modal = centered_rect(area, MODAL_WIDTH, MODAL_HEIGHT);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Новый контакт ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH);
    let focus = form.focus();

    let name = truncate_string(form.name().value(), value_width);
    let phone_line = if form.phone().value().is_empty() && focus != FormFocus::Phone {
        Span::styled(PHONE_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(form.phone().value().to_string())
    };
    let favorite = if form.is_favorite() { "[x]" } else { "[ ]" };

    let lines = vec![
        Line::from(vec![label("Имя", focus == FormFocus::Name), Span::raw(name)]),
        Line::from(vec![label("Телефон", focus == FormFocus::Phone), phone_line]),
        Line::from(vec![
            label("Избранное", focus == FormFocus::Favorite),
            Span::raw(favorite),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: сохранить  Esc: отмена",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    let (row, before_caret) = match focus {
        FormFocus::Name => (0, form.name().text_before_caret()),
        FormFocus::Phone => (1, form.phone().text_before_caret()),
        FormFocus::Favorite => return None,
    };
    let column = (LABEL_WIDTH + string_width(before_caret)).min(inner.width.saturating_sub(1) as usize);
    Some(Position::new(inner.x + column as u16, inner.y + row))
}

fn label(text: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Span::styled(format!("{:<width$}", text, width = LABEL_WIDTH), style)
}
