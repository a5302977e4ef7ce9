// セッションストア（読み取り専用の契約と実装）

use super::models::{CurrentUser, USER_KEY};
use crate::shared::errors::{AppError, AppResult};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 現在のユーザーを読み取る
pub trait SessionReader: Send + Sync {
    fn get_current_user(&self) -> AppResult<CurrentUser>;
}

/// "user" キーの値（JSON文字列）を CurrentUser に変換する
fn parse_user(raw: Option<String>) -> AppResult<CurrentUser> {
    let raw = raw.ok_or_else(|| AppError::session(format!("{USER_KEY} キーがありません")))?;
    Ok(serde_json::from_str(&raw)?)
}

/// メモリ上のセッションストア
#[derive(Debug, Default)]
pub struct InMemorySession {
    items: Mutex<HashMap<String, String>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定したユーザーでログイン済みのセッションを作成
    pub fn with_user(user: &CurrentUser) -> AppResult<Self> {
        let session = Self::new();
        session.set_item(USER_KEY, &serde_json::to_string(user)?);
        Ok(session)
    }

    pub fn set_item(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}

impl SessionReader for InMemorySession {
    fn get_current_user(&self) -> AppResult<CurrentUser> {
        parse_user(self.get_item(USER_KEY))
    }
}

/// JSONファイルに保存されたセッションストア
///
/// ファイルはキーと文字列値のオブジェクト: `{"user": "{\"type\":\"Employee\",...}"}`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> AppResult<HashMap<String, String>> {
        if !self.path.exists() {
            debug!("セッションファイルがありません: {:?}", self.path);
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_items()?.remove(key))
    }

    /// 値を書き込む（ログイン画面などセッションの所有者が使う）
    pub fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let mut items = self.read_items()?;
        items.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&items)?)?;
        Ok(())
    }
}

impl SessionReader for FileSessionStore {
    fn get_current_user(&self) -> AppResult<CurrentUser> {
        parse_user(self.get_item(USER_KEY)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_session_user() {
        let session = InMemorySession::with_user(&CurrentUser::employee("a@a")).unwrap();
        let user = session.get_current_user().unwrap();
        assert_eq!(user.email, "a@a");
        assert!(user.is_employee());
    }

    #[test]
    fn test_missing_user_is_session_error() {
        let session = InMemorySession::new();
        let result = session.get_current_user();
        assert!(matches!(result, Err(AppError::Session(_))));
    }

    #[test]
    fn test_corrupted_user_is_json_error() {
        let session = InMemorySession::new();
        session.set_item(USER_KEY, "not json");
        assert!(matches!(session.get_current_user(), Err(AppError::Json(_))));
    }

    #[test]
    fn test_file_session_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("nested").join("session.json"));

        store
            .set_item(USER_KEY, r#"{"type":"Employee","email":"employee@test.com"}"#)
            .unwrap();
        store.set_item("jwt", "token").unwrap();

        let user = store.get_current_user().unwrap();
        assert_eq!(user.email, "employee@test.com");
        assert_eq!(store.get_item("jwt").unwrap().as_deref(), Some("token"));
    }

    #[test]
    fn test_file_session_store_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("session.json"));

        assert_eq!(store.get_item(USER_KEY).unwrap(), None);
        assert!(matches!(
            store.get_current_user(),
            Err(AppError::Session(_))
        ));
    }
}
