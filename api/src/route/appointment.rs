use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::appointment::{
    cancel_appointment, confirm_appointment, create_appointment, show_appointment,
    show_appointment_list,
};

pub fn build_appointment_routers() -> Router<AppRegistry> {
    let appointment_routers = Router::new()
        .route("/", post(create_appointment))
        .route("/", get(show_appointment_list))
        .route("/:appointment_id", get(show_appointment))
        .route("/:appointment_id/confirm", put(confirm_appointment))
        .route("/:appointment_id/cancel", put(cancel_appointment));

    Router::new().nest("/appointments", appointment_routers)
}
