use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Format of the observation time reported by every source, e.g. "10:00 AM".
pub const OBSERVATION_TIME_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadLocation {
    pub name: String,
}

/// Current conditions for one city, normalized across sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub temperature: f64,
    pub observation_time: String,
    pub weather_descriptions: Vec<String>,
    /// "yes" or "no".
    pub is_day: String,
    pub pressure: f64,
    pub cloudcover: f64,
    pub humidity: f64,
    pub visibility: f64,
    pub uv_index: f64,
    pub wind_speed: f64,
    pub location: PayloadLocation,
}

impl WeatherPayload {
    /// Reject payloads that decoded but would render as garbage.
    pub fn validate(self) -> Result<Self, FetchError> {
        if self.is_day != "yes" && self.is_day != "no" {
            return Err(FetchError::Malformed(format!(
                "is_day must be \"yes\" or \"no\", got {:?}",
                self.is_day
            )));
        }

        NaiveTime::parse_from_str(self.observation_time.trim(), OBSERVATION_TIME_FORMAT).map_err(
            |e| {
                FetchError::Malformed(format!(
                    "observation_time {:?} is not HH:MM AM/PM: {e}",
                    self.observation_time
                ))
            },
        )?;

        let numbers = [
            ("temperature", self.temperature),
            ("pressure", self.pressure),
            ("cloudcover", self.cloudcover),
            ("humidity", self.humidity),
            ("visibility", self.visibility),
            ("uv_index", self.uv_index),
            ("wind_speed", self.wind_speed),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FetchError::Malformed(format!("{name} is not a finite number")));
        }

        if self.location.name.trim().is_empty() {
            return Err(FetchError::Malformed("location name is empty".to_string()));
        }

        Ok(self)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::paris;
    use super::*;

    #[test]
    fn well_formed_payload_validates() {
        assert!(paris().validate().is_ok());
    }

    #[test]
    fn unknown_day_flag_is_malformed() {
        let mut p = paris();
        p.is_day = "maybe".into();
        assert!(matches!(p.validate(), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn observation_time_must_be_twelve_hour_clock() {
        let mut p = paris();
        p.observation_time = "25:61".into();
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("observation_time"));

        let mut p = paris();
        p.observation_time = "12:14 PM".into();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn missing_field_fails_to_decode() {
        let json = serde_json::json!({
            "temperature": 20,
            "observation_time": "10:00 AM",
            "weather_descriptions": ["Sunny"],
            "is_day": "yes",
            "location": { "name": "Paris" }
        });
        let res: Result<WeatherPayload, _> = serde_json::from_value(json);
        assert!(res.is_err());
    }
}
