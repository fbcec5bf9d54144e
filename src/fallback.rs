//! Route acquisition that always produces a route.

use tracing::warn;

use crate::error::RouteError;
use crate::location::Location;
use crate::route::Route;
use crate::traits::RouteProvider;

/// Wraps a routing backend and substitutes [`Route::placeholder`] on any
/// failure, so planning never has to handle a routing error.
///
/// `None` as the backend means no routing backend is configured.
#[derive(Debug, Clone)]
pub struct FallbackRouteProvider<P> {
    inner: Option<P>,
}

impl<P: RouteProvider> FallbackRouteProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner: Some(inner) }
    }

    pub fn placeholder_only() -> Self {
        Self { inner: None }
    }

    /// Routes between two normalized locations.
    pub fn route_between(&self, pickup: &Location, dropoff: &Location) -> Route {
        let (Some(from), Some(to)) = (pickup.coord(), dropoff.coord()) else {
            warn!(
                pickup = %pickup.label,
                dropoff = %dropoff.label,
                "missing endpoint coordinates, using placeholder route"
            );
            return Route::placeholder();
        };

        match self.route_for(from, to) {
            Ok(route) => route,
            Err(err) => {
                warn!(error = %err, "routing failed, using placeholder route");
                Route::placeholder()
            }
        }
    }
}

impl<P: RouteProvider> RouteProvider for FallbackRouteProvider<P> {
    fn route_for(&self, from: (f64, f64), to: (f64, f64)) -> Result<Route, RouteError> {
        let inner = self.inner.as_ref().ok_or(RouteError::NotConfigured)?;
        inner.route_for(from, to)
    }

    fn name(&self) -> &str {
        self.inner.as_ref().map_or("placeholder", |inner| inner.name())
    }
}
