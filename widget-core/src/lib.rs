//! Core library for the weather widget.
//!
//! This crate defines:
//! - Configuration and the remembered-city storage
//! - Abstraction over weather sources (proxy endpoint, weatherstack)
//! - The view state, its reducer and the HTML renderer
//! - The search popup state machine and the UI adapter seam
//! - [`Widget`], which ties them together
//!
//! It is used by `widget-cli`, but any host that can implement
//! [`UiAdapter`] can drive it.

pub mod config;
pub mod error;
pub mod model;
pub mod popup;
pub mod provider;
pub mod render;
pub mod state;
pub mod storage;
pub mod ui;
pub mod widget;

pub use config::{Config, FALLBACK_CITY, SourceConfig};
pub use error::FetchError;
pub use model::{PayloadLocation, WeatherPayload};
pub use popup::{Popup, PopupState};
pub use provider::{SourceId, WeatherSource};
pub use render::{pick_icon, render};
pub use state::{ViewState, WeatherProp, WeatherProperty, reduce};
pub use storage::{CityStore, FileCityStore, MemoryCityStore};
pub use ui::{Listener, UiAdapter, UiEvent};
#[cfg(any(test, feature = "test-support"))]
pub use ui::RecordingUi;
pub use widget::{FetchOrigin, FetchOutcome, RequestTicket, Widget};
