//! キャレット位置の補正
//!
//! 区切り文字の上でキャレットが止まらないように移動先を計算する。
//! 位置はすべて文字単位（0ベース）。

use super::template::is_separator;

/// キャレット移動ユーティリティ
pub struct CaretMover;

impl CaretMover {
    /// `pos` から左へ区切り文字を読み飛ばした位置
    ///
    /// 直前の文字が区切り文字でなくなるか、先頭に達するまで戻る。
    pub fn previous_digit_position(text: &str, pos: usize) -> usize {
        let chars: Vec<char> = text.chars().collect();
        let mut pos = pos.min(chars.len());

        while pos > 0 && is_separator(chars[pos - 1]) {
            pos -= 1;
        }

        pos
    }

    /// `pos` から右へ区切り文字を読み飛ばした位置
    pub fn next_digit_position(text: &str, pos: usize) -> usize {
        let chars: Vec<char> = text.chars().collect();
        let mut pos = pos.min(chars.len());

        while pos < chars.len() && is_separator(chars[pos]) {
            pos += 1;
        }

        pos
    }

    /// キャレット直前の文字が区切り文字か
    pub fn separator_before(text: &str, pos: usize) -> bool {
        pos > 0 && text.chars().nth(pos - 1).is_some_and(is_separator)
    }

    /// キャレット直後の文字が区切り文字か
    pub fn separator_at(text: &str, pos: usize) -> bool {
        text.chars().nth(pos).is_some_and(is_separator)
    }

    /// 再整形後のキャレットを数字の境界へ寄せる
    pub fn settle(text: &str, pos: usize) -> usize {
        Self::previous_digit_position(text, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_skips_separator_run() {
        let text = "+7 (999) ";
        assert_eq!(CaretMover::previous_digit_position(text, 9), 7);
        assert_eq!(CaretMover::previous_digit_position(text, 7), 7);
        assert_eq!(CaretMover::previous_digit_position(text, 4), 2);
    }

    #[test]
    fn previous_stops_at_start() {
        assert_eq!(CaretMover::previous_digit_position(" (", 2), 0);
        assert_eq!(CaretMover::previous_digit_position("", 0), 0);
    }

    #[test]
    fn next_skips_separator_run() {
        let text = "+7 (912) 345";
        assert_eq!(CaretMover::next_digit_position(text, 7), 9);
        assert_eq!(CaretMover::next_digit_position(text, 9), 9);
        assert_eq!(CaretMover::next_digit_position("+7 (", 2), 4);
    }

    #[test]
    fn positions_are_clamped_to_text_length() {
        assert_eq!(CaretMover::previous_digit_position("+7", 10), 2);
        assert_eq!(CaretMover::next_digit_position("+7", 10), 2);
    }

    #[test]
    fn neighbour_checks() {
        let text = "+7 (912) 3";
        assert!(CaretMover::separator_before(text, 4));
        assert!(!CaretMover::separator_before(text, 5));
        assert!(!CaretMover::separator_before(text, 0));
        assert!(CaretMover::separator_at(text, 7));
        assert!(!CaretMover::separator_at(text, 10));
    }
}
