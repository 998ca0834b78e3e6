#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyStats {
    pub total_this_month: i64,
    // Confirmed を完了扱いとする
    pub completed_this_month: i64,
    pub pending_all_time: i64,
    pub month: String,
    pub year: i32,
}
