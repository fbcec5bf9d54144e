//! Seams between the planning core and its collaborators.

use crate::error::RouteError;
use crate::route::Route;

/// Provides a driving route between two `(lng, lat)` endpoints.
///
/// Implementations talk to a routing backend and may fail; callers that
/// must not fail wrap them in [`crate::fallback::FallbackRouteProvider`].
pub trait RouteProvider {
    fn route_for(&self, from: (f64, f64), to: (f64, f64)) -> Result<Route, RouteError>;

    /// Short backend name for logging.
    fn name(&self) -> &str;
}

impl<P: RouteProvider + ?Sized> RouteProvider for Box<P> {
    fn route_for(&self, from: (f64, f64), to: (f64, f64)) -> Result<Route, RouteError> {
        (**self).route_for(from, to)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
