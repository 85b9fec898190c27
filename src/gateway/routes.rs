use axum::routing::{any, get, MethodRouter};

use super::handlers;
use super::GatewayState;

/// The closed set of routes the gateway serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `GET /car/{id}` → `Lookup`
    CarById,
    /// `GET /car/` with the id segment left out.
    CarMissingId,
    /// `GET /cars` → `BulkFetch`
    AllCars,
    /// Reserved paths with no behaviour yet.
    Placeholder,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::CarById,
        Route::CarMissingId,
        Route::AllCars,
        Route::Placeholder,
    ];

    pub fn paths(self) -> &'static [&'static str] {
        match self {
            Route::CarById => &["/car/:id"],
            Route::CarMissingId => &["/car", "/car/"],
            Route::AllCars => &["/cars"],
            Route::Placeholder => &["/car/microservice"],
        }
    }

    pub(super) fn handler(self) -> MethodRouter<GatewayState> {
        match self {
            Route::CarById => get(handlers::car_by_id).fallback(handlers::placeholder),
            Route::CarMissingId => get(handlers::car_missing_id).fallback(handlers::placeholder),
            Route::AllCars => get(handlers::all_cars).fallback(handlers::placeholder),
            Route::Placeholder => any(handlers::placeholder),
        }
    }
}
