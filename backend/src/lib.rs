pub mod cancel;
pub mod config;
pub mod directions;
pub mod display;
pub mod error;
pub mod gpx_export;
pub mod handlers;
pub mod itinerary;
pub mod kv_store;
pub mod location;
pub mod models;
mod phrasebook;
pub mod route_builder;
pub mod routing;
pub mod translation;
pub mod weather;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    routing::{get, post},
};

use crate::config::AppConfig;
use crate::directions::{DirectionsService, OsrmDirections, StraightLineDirections};
use crate::display::{MapDisplay, ViewportMargin};
use crate::error::AppError;
use crate::kv_store::FileStore;
use crate::location::{LocationFeed, LocationTracker, StageLocator};
use crate::route_builder::RouteBuilder;
use crate::translation::{TranslationService, Translator};
use crate::weather::WeatherService;

const WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct AppState {
    pub display: Arc<MapDisplay>,
    pub builder: RouteBuilder,
    pub translation: TranslationService,
    pub weather: Arc<WeatherService>,
    pub locator: Arc<StageLocator>,
    pub location: LocationFeed,
    pub tracker: Arc<Mutex<LocationTracker>>,
}

impl AppState {
    /// Wire every service from configuration. Without `DIRECTIONS_URL` the
    /// day routes are straight lines between stops.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let directions: Arc<dyn DirectionsService> = match &config.directions_url {
            Some(url) => {
                tracing::info!("walking directions from {url}");
                Arc::new(OsrmDirections::new(url.clone(), config.directions_timeout)?)
            }
            None => {
                tracing::info!("DIRECTIONS_URL not set, using straight-line directions");
                Arc::new(StraightLineDirections::default())
            }
        };
        Self::with_directions(directions, config)
    }

    pub fn with_directions(
        directions: Arc<dyn DirectionsService>,
        config: &AppConfig,
    ) -> Result<Self, AppError> {
        let builder = RouteBuilder::new(directions).with_overview_throttle(config.overview_throttle);
        let weather = WeatherService::new(
            config.weather_url.clone(),
            FileStore::new(config.cache_dir.clone()),
            WEATHER_TIMEOUT,
        )?;

        Ok(Self {
            display: Arc::new(MapDisplay::new(builder.clone(), ViewportMargin::default())),
            builder,
            translation: TranslationService::new(
                Arc::new(Translator::new()),
                config.translation_latency,
            ),
            weather: Arc::new(weather),
            locator: Arc::new(StageLocator::new(itinerary::itinerary())),
            location: LocationFeed::default(),
            tracker: Arc::new(Mutex::new(LocationTracker::default())),
        })
    }

    /// Keep `tracker` in sync with the location feed. Must run inside a Tokio runtime.
    pub fn spawn_location_tracking(&self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(LocationTracker::follow(
            self.tracker.clone(),
            self.location.subscribe(),
        ))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/itinerary", get(handlers::list_itinerary))
        .route("/api/itinerary/:day", get(handlers::get_day))
        .route("/api/itinerary/:day/route", get(handlers::get_day_route))
        .route("/api/map", get(handlers::get_map))
        .route("/api/map/focus", post(handlers::focus_map))
        .route("/api/map/cancel", post(handlers::cancel_map))
        .route("/api/translate", post(handlers::translate))
        .route("/api/nearest", get(handlers::nearest_stage))
        .route("/api/weather", get(handlers::weather))
        .route(
            "/api/location",
            get(handlers::get_location).post(handlers::report_location),
        )
        .with_state(state)
}
