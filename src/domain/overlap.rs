use chrono::NaiveDate;

/// 純粋関数：2つの半開区間 `[start_a, end_a)` と `[start_b, end_b)` が重なるか
///
/// チェックアウト日は排他的に扱う。
/// 日付Dにチェックアウトする宿泊と日付Dにチェックインする宿泊は重ならない。
///
/// 呼び出し側で `end > start` が検証済みであることを前提とする。
pub fn overlaps(start_a: NaiveDate, end_a: NaiveDate, start_b: NaiveDate, end_b: NaiveDate) -> bool {
    start_a < end_b && end_a > start_b
}
