//! 電話番号テンプレート
//!
//! `+7 (XXX) XXX-XX-XX` 形式の表示文字列と数字列の相互変換

use std::fmt;

/// 固定の国番号プレフィックス
pub const PREFIX: &str = "+7";

/// プレフィックスの文字数（フォーカス時のカーソル位置）
pub const PREFIX_LEN: usize = 2;

/// プレフィックスに続く加入者番号の最大桁数
pub const MAX_DIGITS: usize = 10;

/// 国番号として入力し直された場合に取り除く先頭の数字
const COUNTRY_DIGIT: char = '7';

/// 区切り文字かどうかを判定
///
/// プレフィックスの `+` と `7` は区切り文字に含めない。
pub fn is_separator(ch: char) -> bool {
    matches!(ch, '(' | ')' | '-' | ' ')
}

/// 数字以外の文字をすべて取り除く
pub fn extract_digits(text: &str) -> String {
    text.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

/// 表示テンプレートの元になる数字列（0〜10桁）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDigits {
    digits: String,
}

impl RawDigits {
    /// 空の数字列
    pub fn new() -> Self {
        Self::default()
    }

    /// 任意の入力文字列から数字列を復元
    ///
    /// 0. 先頭のテンプレートプレフィックス `+7` を読み飛ばす
    /// 1. 数字以外を除去
    /// 2. 先頭が `7` なら国番号の打ち直しとみなして除去する。
    ///    プレフィックスなしなら2桁以上のとき。プレフィックスありなら
    ///    その直後に何かが挿入されていて、かつ10桁を超えたときだけ
    /// 3. 10桁を超える分は黙って切り捨て
    pub fn from_input(text: &str) -> Self {
        let (mut digits, retyped_country) = match text.strip_prefix(PREFIX) {
            Some(rest) => {
                // 整形済みの表示ではプレフィックスの直後は ` (` か末尾
                let inserted_at_prefix = !rest.is_empty() && !rest.starts_with(" (");
                let digits = extract_digits(rest);
                let retyped = inserted_at_prefix && digits.len() > MAX_DIGITS;
                (digits, retyped)
            }
            None => {
                let digits = extract_digits(text);
                let retyped = digits.len() > 1;
                (digits, retyped)
            }
        };

        if retyped_country && digits.starts_with(COUNTRY_DIGIT) {
            digits.remove(0);
        }

        // ASCII数字のみなのでバイト単位の切り詰めで安全
        digits.truncate(MAX_DIGITS);

        Self { digits }
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// 10桁すべて埋まっているか
    pub fn is_complete(&self) -> bool {
        self.digits.len() == MAX_DIGITS
    }

    /// テンプレートに流し込んだ表示文字列を生成
    ///
    /// 各グループは最初の桁が揃った時点で区切りごと出力し、
    /// 途中のグループは埋め文字なしで切り詰める。
    pub fn to_display(&self) -> String {
        let d = self.digits.as_str();
        let mut out = String::with_capacity(18);
        out.push_str(PREFIX);

        if d.is_empty() {
            return out;
        }

        out.push_str(" (");
        out.push_str(&d[..d.len().min(3)]);

        if d.len() > 3 {
            out.push_str(") ");
            out.push_str(&d[3..d.len().min(6)]);
        }
        if d.len() > 6 {
            out.push('-');
            out.push_str(&d[6..d.len().min(8)]);
        }
        if d.len() > 8 {
            out.push('-');
            out.push_str(&d[8..]);
        }

        out
    }
}

impl fmt::Display for RawDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// 任意の文字列を正規の表示文字列へ整形
pub fn format_display(text: &str) -> String {
    RawDigits::from_input(text).to_display()
}
