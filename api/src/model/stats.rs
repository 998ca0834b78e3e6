use kernel::model::stats::MonthlyStats;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatsResponse {
    pub total_this_month: i64,
    pub completed_this_month: i64,
    pub pending_all_time: i64,
    pub month: String,
    pub year: i32,
}

impl From<MonthlyStats> for MonthlyStatsResponse {
    fn from(value: MonthlyStats) -> Self {
        let MonthlyStats {
            total_this_month,
            completed_this_month,
            pending_all_time,
            month,
            year,
        } = value;
        Self {
            total_this_month,
            completed_this_month,
            pending_all_time,
            month,
            year,
        }
    }
}
