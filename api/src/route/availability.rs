use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::availability::{
    block_date, delete_availability, set_availability, show_availability_list, show_slots,
};

pub fn build_availability_routers() -> Router<AppRegistry> {
    let availability_routers = Router::new()
        .route("/", get(show_availability_list))
        .route("/", post(set_availability))
        .route("/:availability_id", delete(delete_availability));

    Router::new()
        .nest("/availability", availability_routers)
        .route("/blocked-dates/:date", post(block_date))
        .route("/slots/:date", get(show_slots))
}
