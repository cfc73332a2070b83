//! Domain model types for delivery route planning.
//!
//! Provides the core abstractions: delivery stops with bag counts and
//! geocoded coordinates, vehicle types ordered by capacity, routes as
//! ordered groups of stop ids, and the route plan that partitions a run's
//! stops across routes.

mod plan;
mod route;
mod stop;
mod vehicle;

pub use plan::RoutePlan;
pub use route::Route;
pub use stop::Stop;
pub use vehicle::{Fleet, VehicleType};
