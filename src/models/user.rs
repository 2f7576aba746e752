//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Maximum stored length of a user language tag
const LANG_MAX_LEN: usize = 8;

/// Fallback language when the event user carries no language tag
const LANG_DEFAULT: &str = "ru";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub lang: String,
    pub is_premium: bool,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub is_subscribed: bool,
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Presence fields carried by one inbound event, ready to upsert.
///
/// Every field overwrites the stored value; an absent username clears the
/// column rather than keeping the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncUserRequest {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub lang: String,
    pub is_premium: bool,
}

impl SyncUserRequest {
    pub fn new(telegram_id: i64, username: Option<String>, lang: Option<&str>, is_premium: bool) -> Self {
        Self {
            telegram_id,
            username,
            lang: normalize_lang(lang),
            is_premium,
        }
    }
}

/// Normalize a Telegram language tag into the stored `lang` column value:
/// at most 8 characters, "ru" when missing or empty.
pub fn normalize_lang(lang: Option<&str>) -> String {
    match lang {
        Some(tag) if !tag.is_empty() => tag.chars().take(LANG_MAX_LEN).collect(),
        _ => LANG_DEFAULT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lang_default() {
        assert_eq!(normalize_lang(None), "ru");
        assert_eq!(normalize_lang(Some("")), "ru");
    }

    #[test]
    fn test_normalize_lang_passthrough() {
        assert_eq!(normalize_lang(Some("en")), "en");
        assert_eq!(normalize_lang(Some("pt-br")), "pt-br");
    }

    #[test]
    fn test_normalize_lang_truncation() {
        assert_eq!(normalize_lang(Some("zh-Hans-HK-extra")), "zh-Hans-");
        assert_eq!(normalize_lang(Some("12345678")), "12345678");
    }

    #[test]
    fn test_normalize_lang_truncates_on_char_boundary() {
        // 9 cyrillic characters, 18 bytes; truncation counts characters
        assert_eq!(normalize_lang(Some("абвгдежзи")), "абвгдежз");
    }

    #[test]
    fn test_sync_request_normalizes() {
        let request = SyncUserRequest::new(42, Some("alice".to_string()), None, true);
        assert_eq!(request.lang, "ru");
        assert!(request.is_premium);

        let request = SyncUserRequest::new(42, None, Some("en-GB-oed-x"), false);
        assert_eq!(request.lang, "en-GB-oe");
        assert_eq!(request.username, None);
    }
}
