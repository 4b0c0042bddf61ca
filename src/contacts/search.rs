//! 連絡先の検索
//!
//! 名前は大文字小文字を区別しない部分一致、電話番号は数字だけを
//! 取り出した部分一致で判定する。

use super::Contact;
use crate::mask::extract_digits;

/// 前処理済みの検索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    lowered: String,
    digits: String,
}

impl SearchQuery {
    /// 空白のみの問い合わせは `None`（全件表示）
    pub fn parse(query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(Self {
            lowered: query.to_lowercase(),
            digits: extract_digits(query),
        })
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        if contact.name.to_lowercase().contains(&self.lowered) {
            return true;
        }
        // 数字を含まない問い合わせは電話番号に一致させない
        !self.digits.is_empty() && extract_digits(&contact.phone).contains(&self.digits)
    }
}

/// 問い合わせに一致する連絡先だけを残す
pub fn filter_contacts(contacts: Vec<Contact>, query: &str) -> Vec<Contact> {
    match SearchQuery::parse(query) {
        Some(query) => contacts.into_iter().filter(|c| query.matches(c)).collect(),
        None => contacts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::ContactId;

    fn contact(id: u64, name: &str, phone: &str) -> Contact {
        Contact {
            id: ContactId(id),
            name: name.to_string(),
            phone: phone.to_string(),
            is_favorite: false,
            order_index: id as i64,
        }
    }

    fn sample() -> Vec<Contact> {
        vec![
            contact(1, "Иван Иванов", "+7 (999) 123-45-67"),
            contact(2, "Мария Петрова", "+7 (912) 555-00-11"),
            contact(3, "Ivan Smith", "+7 (901) 000-12-34"),
        ]
    }

    fn ids(contacts: &[Contact]) -> Vec<u64> {
        contacts.iter().map(|c| c.id.0).collect()
    }

    #[test]
    fn name_match_ignores_case() {
        assert_eq!(ids(&filter_contacts(sample(), "иван")), vec![1]);
        assert_eq!(ids(&filter_contacts(sample(), "ИВАН")), vec![1]);
        assert_eq!(ids(&filter_contacts(sample(), "iVaN")), vec![3]);
    }

    #[test]
    fn phone_match_uses_digits_only() {
        assert_eq!(ids(&filter_contacts(sample(), "555")), vec![2]);
        assert_eq!(ids(&filter_contacts(sample(), "+7 (999) 123-45-67")), vec![1]);
        assert_eq!(ids(&filter_contacts(sample(), "000-12")), vec![3]);
    }

    #[test]
    fn blank_query_keeps_everything() {
        assert_eq!(filter_contacts(sample(), "   ").len(), 3);
    }

    #[test]
    fn no_results() {
        assert!(filter_contacts(sample(), "Несуществующий").is_empty());
    }

    #[test]
    fn punctuation_only_query_does_not_match_every_phone() {
        assert!(filter_contacts(sample(), "-").is_empty());
    }
}
