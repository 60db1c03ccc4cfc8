//! The widget: owns the view state and popup, and drives fetch → reduce →
//! render in response to UI events.
//!
//! Every fetch carries a [`RequestTicket`] stamped with a sequence number.
//! Only the completion of the most recently issued ticket is applied; older
//! ones are dropped so a slow response can never overwrite a newer one.

use crate::{
    FetchError, WeatherPayload, WeatherSource,
    popup::{Popup, PopupState},
    render::render,
    state::{ViewState, reduce},
    storage::CityStore,
    ui::{Listener, UiAdapter, UiEvent},
};

/// Why a fetch was started; decides what happens on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    Startup,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    city: String,
    origin: FetchOrigin,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// What a completed fetch did to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// New state reduced and rendered.
    Applied,
    /// Source failed; state untouched, notice shown.
    Failed,
    /// A newer request was issued meanwhile; response discarded.
    Stale,
}

#[derive(Debug)]
pub struct Widget<U: UiAdapter> {
    source: Box<dyn WeatherSource>,
    store: Box<dyn CityStore>,
    ui: U,
    default_city: String,
    state: ViewState,
    popup: Popup,
    query: String,
    rendered: bool,
    last_seq: u64,
    in_flight: Option<u64>,
}

impl<U: UiAdapter> Widget<U> {
    pub fn new(
        source: Box<dyn WeatherSource>,
        store: Box<dyn CityStore>,
        ui: U,
        default_city: impl Into<String>,
    ) -> Self {
        Self {
            source,
            store,
            ui,
            default_city: default_city.into(),
            state: ViewState::default(),
            popup: Popup::default(),
            query: String::new(),
            rendered: false,
            last_seq: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn popup_state(&self) -> PopupState {
        self.popup.state()
    }

    /// Current content of the search input.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn store(&self) -> &dyn CityStore {
        self.store.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Empty or blank queries resolve to the fallback city.
    fn resolve_city(&self, query: Option<&str>) -> String {
        query
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(self.default_city.as_str())
            .to_string()
    }

    /// Remembered city, or the fallback if there is none or it can't be read.
    pub fn initial_city(&self) -> String {
        let remembered = match self.store.load_city() {
            Ok(city) => city,
            Err(e) => {
                tracing::warn!("Could not read remembered city, using default: {:#}", e);
                None
            }
        };
        self.resolve_city(remembered.as_deref())
    }

    fn issue_ticket(&mut self, city: String, origin: FetchOrigin) -> RequestTicket {
        self.last_seq += 1;
        self.in_flight = Some(self.last_seq);
        RequestTicket {
            seq: self.last_seq,
            city,
            origin,
        }
    }

    /// First load: fetch the remembered (or default) city and render it.
    pub async fn start(&mut self) -> FetchOutcome {
        let city = self.initial_city();
        tracing::info!("Loading weather for '{}'", city);

        let ticket = self.issue_ticket(city, FetchOrigin::Startup);
        let result = self.source.fetch_weather(ticket.city()).await;
        self.complete(ticket, result)
    }

    /// Validate the typed query and issue a search ticket. `None` means the
    /// submission was a no-op.
    pub fn dispatch_search(&mut self) -> Option<RequestTicket> {
        let city = self.query.trim();
        if city.is_empty() {
            tracing::debug!("Ignoring search submission with empty city");
            return None;
        }

        let city = city.to_string();
        tracing::info!("Searching weather for '{}'", city);
        Some(self.issue_ticket(city, FetchOrigin::Search))
    }

    /// Apply the result of a fetch, unless a newer request superseded it.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<WeatherPayload, FetchError>,
    ) -> FetchOutcome {
        if ticket.seq != self.last_seq {
            tracing::debug!(
                "Dropping response #{} for '{}', latest request is #{}",
                ticket.seq,
                ticket.city,
                self.last_seq
            );
            return FetchOutcome::Stale;
        }
        self.in_flight = None;

        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Weather update for '{}' failed: {}", ticket.city, e);
                let notice = e.user_message(&ticket.city);
                self.ui.show_notice(Some(notice.as_str()));
                return FetchOutcome::Failed;
            }
        };

        self.state = reduce(&payload, &self.state);
        self.render();
        self.ui.show_notice(None);

        if ticket.origin == FetchOrigin::Search {
            if let Err(e) = self.store.save_city(&ticket.city) {
                tracing::warn!("Could not remember city '{}': {:#}", ticket.city, e);
            }
            self.query.clear();
            self.ui.set_search_input("");
            if self.popup.is_open() {
                self.popup.toggle(&mut self.ui);
            }
        }

        tracing::info!(
            "Showing {}° in {}",
            self.state.temperature,
            self.state.city.as_deref().unwrap_or_default()
        );
        FetchOutcome::Applied
    }

    /// Serialize the current state into `#root` and rebind the city label.
    pub fn render(&mut self) {
        let html = render(&self.state).into_string();
        self.ui.render_fragment(&html);
        self.ui.bind(Listener::CityLabelClick);
        self.rendered = true;
    }

    /// Whether an element the event comes from currently has a listener.
    fn accepts(&self, event: &UiEvent) -> bool {
        match event.listener() {
            Listener::CityLabelClick => self.rendered,
            Listener::InputChange | Listener::CloseClick | Listener::FormSubmit => {
                self.popup.is_open()
            }
        }
    }

    fn toggle_popup(&mut self) -> PopupState {
        let next = self.popup.toggle(&mut self.ui);
        if next == PopupState::Open {
            self.query = self.state.city.clone().unwrap_or_default();
            self.ui.set_search_input(&self.query);
        }
        next
    }

    /// Handle one UI event. Returns the fetch outcome when the event led to
    /// a fetch.
    pub async fn handle(&mut self, event: UiEvent) -> Option<FetchOutcome> {
        if !self.accepts(&event) {
            tracing::debug!("No listener bound for {:?}, ignoring", event);
            return None;
        }

        match event {
            UiEvent::CityLabelClicked | UiEvent::CloseClicked => {
                self.toggle_popup();
                None
            }
            UiEvent::InputChanged(text) => {
                self.query = text;
                None
            }
            UiEvent::FormSubmitted => {
                let ticket = self.dispatch_search()?;
                let result = self.source.fetch_weather(ticket.city()).await;
                Some(self.complete(ticket, result))
            }
        }
    }
}
