// 一覧表示の並び替え
//
// 並び替えは表示する側で一度だけ行う（get_bills はストアの順序を変えない）

use super::models::DisplayBill;
use crate::shared::utils::compare_dates_desc;

/// 表示用に新しい順（日付の降順）へ並び替える
///
/// 元の日付（raw_date）で比較する。解析できない日付は末尾に並ぶ。
pub fn sort_for_display(bills: &mut [DisplayBill]) {
    bills.sort_by(|a, b| compare_dates_desc(&a.raw_date, &b.raw_date));
}
