//! 送信時の入力検証
//!
//! マスク入力は途中状態（10桁未満）を許すため、完全な番号かどうかは
//! 送信時にここで判定する。

use std::sync::OnceLock;

use regex::Regex;

use crate::contacts::NewContact;
use crate::error::ValidationError;

/// 送信可能な電話番号の形式
pub const PHONE_PATTERN: &str = r"^\+7 \(\d{3}\) \d{3}-\d{2}-\d{2}$";

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("PHONE_PATTERN is a valid regex"))
}

/// 電話番号が送信可能な形式か
pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone)
}

/// 名前の検証（前後の空白を除いて空でないこと）
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

/// 電話番号の検証
pub fn validate_phone(phone: &str) -> Result<String, ValidationError> {
    let phone = phone.trim();
    if !is_valid_phone(phone) {
        return Err(ValidationError::InvalidPhone {
            value: phone.to_string(),
        });
    }
    Ok(phone.to_string())
}

/// 追加フォームの入力内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub is_favorite: bool,
}

impl ContactDraft {
    /// 名前→電話番号の順に検証し、送信用の値を作る
    pub fn validate(&self) -> Result<NewContact, ValidationError> {
        let name = validate_name(&self.name)?;
        let phone = validate_phone(&self.phone)?;
        Ok(NewContact {
            name,
            phone,
            is_favorite: self.is_favorite,
        })
    }
}
