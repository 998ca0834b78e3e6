use super::{
    appointment::build_appointment_routers, availability::build_availability_routers,
    client::build_client_routers, health::build_health_check_routers,
    stats::build_stats_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_availability_routers())
        .merge(build_appointment_routers())
        .merge(build_client_routers())
        .merge(build_stats_routers());
    Router::new().nest("/api/v1", router)
}
