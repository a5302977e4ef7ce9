// 請求書一覧画面のコントローラー

use super::models::DisplayBill;
use super::store::Store;
use super::view::{ElementAttributes, ProofImage, ProofModal, BILL_URL_ATTRIBUTE};
use crate::features::navigation::{Navigator, Route};
use crate::shared::errors::AppResult;
use log::{debug, info};
use std::sync::Arc;

/// 請求書一覧コントローラー
pub struct BillsController {
    store: Option<Arc<dyn Store>>,
    navigator: Arc<dyn Navigator>,
    modal: Arc<dyn ProofModal>,
}

impl BillsController {
    /// 依存を注入してコントローラーを作成
    ///
    /// # 引数
    /// * `store` - リモートストア（未設定の場合は一覧が空になる）
    /// * `navigator` - 画面遷移
    /// * `modal` - 証憑表示用モーダル
    pub fn new(
        store: Option<Arc<dyn Store>>,
        navigator: Arc<dyn Navigator>,
        modal: Arc<dyn ProofModal>,
    ) -> Self {
        Self {
            store,
            navigator,
            modal,
        }
    }

    /// 新規請求書ボタンのクリック
    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill.path());
    }

    /// 目のアイコンのクリック：証憑画像をモーダルで表示する
    ///
    /// 証憑URLを持たないアイコンの場合は何もしない
    pub fn handle_click_icon_eye(&self, icon: &dyn ElementAttributes) {
        let Some(url) = icon
            .attribute(BILL_URL_ATTRIBUTE)
            .filter(|url| !url.is_empty())
        else {
            debug!("証憑URLのないアイコンがクリックされました");
            return;
        };

        // 画像はモーダル幅の半分に収める
        let image = ProofImage {
            url,
            width: self.modal.width() / 2,
        };
        self.modal.set_content(&image);
        self.modal.show();
    }

    /// 請求書一覧を取得し、表示用に変換する
    ///
    /// 並び順はストアの返却順のまま。ストアのエラーは加工せずに返す。
    pub async fn get_bills(&self) -> AppResult<Vec<DisplayBill>> {
        let Some(store) = &self.store else {
            debug!("ストアが未設定のため、請求書一覧は空です");
            return Ok(Vec::new());
        };

        let bills = store.bills().list().await?;
        info!("請求書一覧を取得しました: count={}", bills.len());

        Ok(bills.into_iter().map(DisplayBill::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::bills::in_memory::InMemoryStore;
    use crate::features::bills::models::Bill;
    use crate::features::bills::test_support::{FakeElement, RecordingModal, RecordingNavigator};
    use crate::shared::errors::AppError;

    fn create_controller(
        store: Option<Arc<InMemoryStore>>,
    ) -> (BillsController, Arc<RecordingNavigator>, Arc<RecordingModal>) {
        let navigator = Arc::new(RecordingNavigator::default());
        let modal = Arc::new(RecordingModal::new(500));
        let controller = BillsController::new(
            store.map(|store| store as Arc<dyn Store>),
            navigator.clone(),
            modal.clone(),
        );
        (controller, navigator, modal)
    }

    #[test]
    fn test_click_new_bill_navigates_once() {
        let (controller, navigator, _) = create_controller(None);

        controller.handle_click_new_bill();

        assert_eq!(navigator.paths(), vec!["#employee/bill/new".to_string()]);
    }

    #[test]
    fn test_click_icon_eye_opens_modal() {
        let (controller, _, modal) = create_controller(None);
        let icon = FakeElement::with_attribute(
            BILL_URL_ATTRIBUTE,
            "https://localhost:3456/images/test.jpg",
        );

        controller.handle_click_icon_eye(&icon);

        assert_eq!(modal.show_calls(), 1);
        assert_eq!(
            modal.contents(),
            vec![ProofImage {
                url: "https://localhost:3456/images/test.jpg".to_string(),
                width: 250,
            }]
        );
    }

    #[test]
    fn test_click_icon_eye_without_url_is_noop() {
        let (controller, _, modal) = create_controller(None);

        controller.handle_click_icon_eye(&FakeElement::default());
        controller.handle_click_icon_eye(&FakeElement::with_attribute(BILL_URL_ATTRIBUTE, ""));

        assert_eq!(modal.show_calls(), 0);
        assert!(modal.contents().is_empty());
    }

    #[tokio::test]
    async fn test_get_bills_fetches_bills() {
        let store = Arc::new(InMemoryStore::with_fixtures());
        let (controller, _, _) = create_controller(Some(store.clone()));

        let result = controller.get_bills().await.unwrap();

        assert_eq!(store.list_calls(), 1);
        assert_eq!(result.len(), 4);
        assert_eq!(result[0].name, "encore");
        assert_eq!(result[3].name, "test2");
        assert_eq!(result[0].date, "4 Avr. 2004");
        assert_eq!(result[0].status, "En attente");
        assert_eq!(result[1].status, "Refusé");
        assert_eq!(result[2].status, "Accepté");
    }

    #[tokio::test]
    async fn test_get_bills_with_corrupted_date() {
        let store = Arc::new(InMemoryStore::with_bills(vec![Bill {
            id: "1".to_string(),
            status: "pending".to_string(),
            date: "date-invalide".to_string(),
            amount: 100.0,
            ..Bill::default()
        }]));
        let (controller, _, _) = create_controller(Some(store));

        let result = controller.get_bills().await.unwrap();

        assert_eq!(result[0].date, "date-invalide");
        assert_eq!(result[0].status, "En attente");
    }

    #[tokio::test]
    async fn test_get_bills_fails_with_404() {
        let store = Arc::new(InMemoryStore::with_fixtures());
        store.fail_next_list("Erreur 404");
        let (controller, _, _) = create_controller(Some(store));

        let error = controller.get_bills().await.unwrap_err();

        assert!(matches!(&error, AppError::Store(message) if message == "Erreur 404"));
        assert_eq!(error.to_string(), "Erreur 404");
    }

    #[tokio::test]
    async fn test_get_bills_fails_with_500() {
        let store = Arc::new(InMemoryStore::with_fixtures());
        store.fail_next_list("Erreur 500");
        let (controller, _, _) = create_controller(Some(store));

        let error = controller.get_bills().await.unwrap_err();

        assert_eq!(error.to_string(), "Erreur 500");
    }

    #[tokio::test]
    async fn test_get_bills_without_store() {
        let (controller, _, _) = create_controller(None);
        assert!(controller.get_bills().await.unwrap().is_empty());
    }
}
