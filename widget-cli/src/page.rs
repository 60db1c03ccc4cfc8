//! Static host page around the widget's root fragment.

use anyhow::{Context, Result};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::{collections::HashSet, fs, path::Path};

use widget_core::{Listener, UiAdapter};

/// Page model the widget draws into. Holds only the latest state of each
/// element, so it stays the same size however long a session runs.
#[derive(Debug, Default)]
pub struct PageUi {
    fragment: Option<String>,
    bound: HashSet<Listener>,
    popup_visible: bool,
    search_input: String,
    notice: Option<String>,
}

impl PageUi {
    /// Whether the widget has drawn into `#root` yet.
    pub fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

impl UiAdapter for PageUi {
    fn render_fragment(&mut self, html: &str) {
        self.fragment = Some(html.to_string());
        self.bound.remove(&Listener::CityLabelClick);
    }

    fn bind(&mut self, listener: Listener) {
        if self.bound.insert(listener) {
            tracing::trace!("Listening on #{}", listener.element_id());
        }
    }

    fn unbind(&mut self, listener: Listener) {
        if self.bound.remove(&listener) {
            tracing::trace!("Stopped listening on #{}", listener.element_id());
        }
    }

    fn set_popup_visible(&mut self, visible: bool) {
        self.popup_visible = visible;
    }

    fn set_search_input(&mut self, text: &str) {
        self.search_input = text.to_string();
    }

    fn show_notice(&mut self, notice: Option<&str>) {
        self.notice = notice.map(str::to_string);
    }
}

pub fn page_html(ui: &PageUi) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Weather" }
                link rel="stylesheet" href="./style.css";
            }
            body {
                @if let Some(notice) = &ui.notice {
                    div class="notice" { (notice) }
                }
                // Already serialized by the widget.
                div id="root" { (PreEscaped(ui.fragment.as_deref().unwrap_or_default())) }
                div.popup.active[ui.popup_visible] id="popup" {
                    button class="popup-close" id="close" type="button" { "×" }
                    form class="search-form" id="form" {
                        input
                            class="search-input"
                            id="text-input"
                            name="city"
                            type="text"
                            value=(ui.search_input)
                            placeholder="City";
                        button class="search-submit" type="submit" { "Search" }
                    }
                }
            }
        }
    }
}

/// Write the page to `out`, or to stdout when no path is given.
pub fn write_page(ui: &PageUi, out: Option<&Path>) -> Result<()> {
    let html = page_html(ui).into_string();

    match out {
        Some(path) => {
            fs::write(path, html)
                .with_context(|| format!("Failed to write page: {}", path.display()))?;
            tracing::info!("Wrote page to {}", path.display());
        }
        None => println!("{html}"),
    }

    Ok(())
}
