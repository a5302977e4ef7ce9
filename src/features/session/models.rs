use serde::{Deserialize, Serialize};

/// セッションストアで現在のユーザーを保持するキー
pub const USER_KEY: &str = "user";

/// 現在ログインしているユーザー
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentUser {
    /// "Employee" または "Admin"
    #[serde(rename = "type")]
    pub user_type: String,
    pub email: String,
}

impl CurrentUser {
    /// 従業員ユーザーを作成
    pub fn employee<S: Into<String>>(email: S) -> Self {
        Self {
            user_type: "Employee".to_string(),
            email: email.into(),
        }
    }

    /// 従業員かどうか
    pub fn is_employee(&self) -> bool {
        self.user_type == "Employee"
    }
}
