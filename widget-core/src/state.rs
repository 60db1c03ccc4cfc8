//! The widget's view-model and the reducer that produces it.
//!
//! A [`ViewState`] is never patched in place: every successful fetch builds
//! a fresh one from the payload and the previous state.

use std::ops::Index;

use crate::model::WeatherPayload;

/// The six property tiles, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeatherProp {
    Cloud,
    Humidity,
    Pressure,
    Visibility,
    UvIndex,
    Wind,
}

impl WeatherProp {
    pub const ALL: [WeatherProp; 6] = [
        WeatherProp::Cloud,
        WeatherProp::Humidity,
        WeatherProp::Pressure,
        WeatherProp::Visibility,
        WeatherProp::UvIndex,
        WeatherProp::Wind,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn default_icon(self) -> &'static str {
        match self {
            Self::Cloud => "cloud.png",
            Self::Humidity => "humidity.png",
            Self::Pressure => "gauge.png",
            Self::Visibility => "visibility.png",
            Self::UvIndex => "uv-index.png",
            Self::Wind => "wind.png",
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            Self::Cloud => "CLOUD COVER",
            Self::Humidity => "HUMIDITY",
            Self::Pressure => "PRESSURE",
            Self::Visibility => "VISIBILITY",
            Self::UvIndex => "UV INDEX",
            Self::Wind => "WIND SPEED",
        }
    }

    /// Display string for a raw reading, e.g. `1012` -> `"1012 mb"`.
    pub fn format_value(self, n: f64) -> String {
        match self {
            Self::Cloud | Self::Humidity => format!("{n}%"),
            Self::Pressure => format!("{n} mb"),
            Self::Visibility => format!("{n} km"),
            Self::UvIndex => format!("{n} of 10"),
            Self::Wind => format!("{n} km/h"),
        }
    }

    fn reading(self, payload: &WeatherPayload) -> f64 {
        match self {
            Self::Cloud => payload.cloudcover,
            Self::Humidity => payload.humidity,
            Self::Pressure => payload.pressure,
            Self::Visibility => payload.visibility,
            Self::UvIndex => payload.uv_index,
            Self::Wind => payload.wind_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherProperty {
    pub icon: String,
    pub title: String,
    /// `None` until the first successful fetch.
    pub value: Option<String>,
}

impl WeatherProperty {
    fn initial(prop: WeatherProp) -> Self {
        Self {
            icon: prop.default_icon().to_string(),
            title: prop.default_title().to_string(),
            value: None,
        }
    }
}

/// All six tiles; a key can never be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Properties([WeatherProperty; 6]);

impl Properties {
    pub fn get(&self, prop: WeatherProp) -> &WeatherProperty {
        &self.0[prop.index()]
    }

    /// Tiles in [`WeatherProp::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (WeatherProp, &WeatherProperty)> {
        WeatherProp::ALL.into_iter().zip(self.0.iter())
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self(WeatherProp::ALL.map(WeatherProperty::initial))
    }
}

impl Index<WeatherProp> for Properties {
    type Output = WeatherProperty;

    fn index(&self, prop: WeatherProp) -> &WeatherProperty {
        self.get(prop)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub city: Option<String>,
    pub temperature: f64,
    /// "HH:MM AM/PM".
    pub observation_time: String,
    pub weather_descriptions: Vec<String>,
    pub is_day: bool,
    pub properties: Properties,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            city: None,
            temperature: 0.0,
            observation_time: "00:00 AM".to_string(),
            weather_descriptions: Vec::new(),
            is_day: true,
            properties: Properties::default(),
        }
    }
}

impl ViewState {
    /// The only description that is ever displayed.
    pub fn current_description(&self) -> Option<&str> {
        self.weather_descriptions.first().map(String::as_str)
    }
}

/// Merge a payload into a new state. Icons and titles carry over from
/// `prior`, each tile from its own key.
pub fn reduce(payload: &WeatherPayload, prior: &ViewState) -> ViewState {
    let properties = Properties(WeatherProp::ALL.map(|prop| WeatherProperty {
        value: Some(prop.format_value(prop.reading(payload))),
        ..prior.properties[prop].clone()
    }));

    ViewState {
        city: Some(payload.location.name.clone()),
        temperature: payload.temperature,
        observation_time: payload.observation_time.clone(),
        weather_descriptions: payload.weather_descriptions.clone(),
        is_day: payload.is_day == "yes",
        properties,
    }
}
