use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::stats::show_monthly_stats;

pub fn build_stats_routers() -> Router<AppRegistry> {
    Router::new().route("/stats/monthly", get(show_monthly_stats))
}
