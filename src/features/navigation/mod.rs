// 画面遷移

/// アプリケーションのルート
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    /// ルートのパス
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
            Route::Dashboard => "#admin/dashboard",
        }
    }

    /// パスからルートを取得
    pub fn from_path(path: &str) -> Option<Self> {
        [Route::Login, Route::Bills, Route::NewBill, Route::Dashboard]
            .into_iter()
            .find(|route| route.path() == path)
    }
}

/// 画面遷移を行う（ビュー層から注入される）
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// 遷移要求をログに出すだけのナビゲーター（ヘッドレス実行用）
#[derive(Debug, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, path: &str) {
        match Route::from_path(path) {
            Some(route) => log::info!("画面遷移: {route:?} ({path})"),
            None => log::warn!("未知のパスへの画面遷移: {path}"),
        }
    }
}
