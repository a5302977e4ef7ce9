// 請求書一覧をAPIサーバーから取得して表示するコマンド

use billed_lib::features::bills::{sort_for_display, ProofImage, ProofModal};
use billed_lib::shared::config::{
    get_session_file_path, initialize_logging_system, load_environment_variables,
};
use billed_lib::shared::ErrorSeverity;
use billed_lib::{
    AppError, AppResult, BillsController, FileSessionStore, HttpStore, LoggingNavigator,
    SessionReader, Store,
};
use log::{error, info, warn};
use std::sync::Arc;

/// 端末上の証憑モーダル（内容をログに出すだけ）
struct TerminalModal;

impl ProofModal for TerminalModal {
    fn width(&self) -> u32 {
        800
    }

    fn set_content(&self, image: &ProofImage) {
        info!("証憑: {}", image.to_html());
    }

    fn show(&self) {}
}

async fn run() -> AppResult<()> {
    let session = FileSessionStore::new(get_session_file_path());
    match session.get_current_user() {
        Ok(user) if user.is_employee() => info!("ログインユーザー: {}", user.email),
        Ok(user) => warn!(
            "従業員以外のユーザーです: {} ({})",
            user.email, user.user_type
        ),
        Err(e) => warn!(
            "セッションの読み込みに失敗しました: {}: {e}",
            session.path().display()
        ),
    }

    let store: Arc<dyn Store> = Arc::new(HttpStore::from_env()?);
    let controller = BillsController::new(
        Some(store),
        Arc::new(LoggingNavigator),
        Arc::new(TerminalModal),
    );

    let mut bills = controller.get_bills().await?;
    sort_for_display(&mut bills);

    println!("{}", serde_json::to_string_pretty(&bills)?);
    Ok(())
}

/// 重要度に応じたレベルでエラーをログに出す
fn log_failure(e: &AppError) {
    match e.severity() {
        ErrorSeverity::Low => warn!("請求書一覧の取得に失敗しました: {e}"),
        ErrorSeverity::Medium | ErrorSeverity::High => {
            error!("請求書一覧の取得に失敗しました: {e} ({:?})", e.severity())
        }
    }
}

#[tokio::main]
async fn main() {
    load_environment_variables();
    initialize_logging_system();

    if let Err(e) = run().await {
        log_failure(&e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}
