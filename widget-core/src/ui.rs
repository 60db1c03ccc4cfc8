//! Seam between the widget and whatever hosts its markup.

/// Interaction hooks the widget can attach to page elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Click on `#city`; recreated by every render.
    CityLabelClick,
    /// Typing into `#text-input`.
    InputChange,
    /// Click on `#close`.
    CloseClick,
    /// Submission of `#form`.
    FormSubmit,
}

impl Listener {
    /// Element id the listener hangs off.
    pub fn element_id(&self) -> &'static str {
        match self {
            Listener::CityLabelClick => "city",
            Listener::InputChange => "text-input",
            Listener::CloseClick => "close",
            Listener::FormSubmit => "form",
        }
    }
}

/// Events the host delivers back to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    CityLabelClicked,
    InputChanged(String),
    CloseClicked,
    FormSubmitted,
}

impl UiEvent {
    pub fn listener(&self) -> Listener {
        match self {
            UiEvent::CityLabelClicked => Listener::CityLabelClick,
            UiEvent::InputChanged(_) => Listener::InputChange,
            UiEvent::CloseClicked => Listener::CloseClick,
            UiEvent::FormSubmitted => Listener::FormSubmit,
        }
    }
}

pub trait UiAdapter {
    /// Replace the whole content of `#root`.
    fn render_fragment(&mut self, html: &str);

    fn bind(&mut self, listener: Listener);

    fn unbind(&mut self, listener: Listener);

    /// Show or hide `#popup`.
    fn set_popup_visible(&mut self, visible: bool);

    /// Set the value of `#text-input`.
    fn set_search_input(&mut self, text: &str);

    /// Show a status line outside `#root`, or clear it with `None`.
    fn show_notice(&mut self, notice: Option<&str>);
}

/// Records every call so tests can assert on what the widget asked for.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone)]
pub struct RecordingUi {
    pub fragment: Option<String>,
    pub render_count: usize,
    pub bound: Vec<Listener>,
    pub bind_calls: Vec<Listener>,
    pub unbind_calls: Vec<Listener>,
    pub popup_visible: bool,
    pub search_input: String,
    pub notice: Option<String>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingUi {
    pub fn is_bound(&self, listener: Listener) -> bool {
        self.bound.contains(&listener)
    }
}

#[cfg(any(test, feature = "test-support"))]
impl UiAdapter for RecordingUi {
    fn render_fragment(&mut self, html: &str) {
        self.fragment = Some(html.to_string());
        self.render_count += 1;
        // The old label is gone along with its listener.
        self.bound.retain(|l| *l != Listener::CityLabelClick);
    }

    fn bind(&mut self, listener: Listener) {
        self.bind_calls.push(listener);
        if !self.bound.contains(&listener) {
            self.bound.push(listener);
        }
    }

    fn unbind(&mut self, listener: Listener) {
        self.unbind_calls.push(listener);
        self.bound.retain(|l| *l != listener);
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
