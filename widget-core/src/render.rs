//! HTML serialization of a [`ViewState`].

use maud::{Markup, html};

use crate::state::{Properties, ViewState};

/// Icon used when the description matches no known condition.
pub const DEFAULT_WEATHER_ICON: &str = "the.png";

const PLACEHOLDER_VALUE: &str = "--";

/// Known conditions, matched case-insensitively against the whole description.
const ATMOSPHERE_ICONS: [(&str, &str); 5] = [
    ("SUNNY", "sunny.png"),
    ("OVERCAST", "cloud.png"),
    ("PARTLY CLOUDY", "partly.png"),
    ("CLEAR", "clear.png"),
    ("FOG", "fog.png"),
];

pub fn pick_icon(description: Option<&str>) -> &'static str {
    let Some(description) = description else {
        return DEFAULT_WEATHER_ICON;
    };

    ATMOSPHERE_ICONS
        .iter()
        .find(|(name, _)| description.to_uppercase() == *name)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_WEATHER_ICON)
}

fn properties_markup(properties: &Properties) -> Markup {
    html! {
        @for (_, prop) in properties.iter() {
            div class="property" {
                div class="property-icon" {
                    img src={ "./img/icons/" (prop.icon) } alt="";
                }
                div class="property-info" {
                    div class="property-info__value" {
                        (prop.value.as_deref().unwrap_or(PLACEHOLDER_VALUE))
                    }
                    div class="property-info__description" { (prop.title) }
                }
            }
        }
    }
}

/// The widget's root fragment. Contains the `id="city"` label the popup
/// toggle is bound to.
pub fn render(state: &ViewState) -> Markup {
    let description = state.current_description();

    html! {
        div.container."is-day"[state.is_day] {
            div class="top" {
                div class="city" {
                    div class="city-subtitle" { "Weather Today in" }
                    div class="city-title" id="city" {
                        span { (state.city.as_deref().unwrap_or_default()) }
                    }
                }
                div class="city-info" {
                    div class="top-left" {
                        img class="icon" src={ "./img/" (pick_icon(description)) } alt="";
                        div class="description" { (description.unwrap_or_default()) }
                    }
                    div class="top-right" {
                        div class="city-info__subtitle" { "as of " (state.observation_time) }
                        div class="city-info__title" { (state.temperature) "°" }
                    }
                }
            }
            div id="properties" { (properties_markup(&state.properties)) }
        }
    }
}
