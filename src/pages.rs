/// Top-level pages, keyed by their web routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    RealTimeParking,
    DataInsights,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::RealTimeParking, Page::DataInsights];

    pub fn route(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::RealTimeParking => "/real-time-parking",
            Page::DataInsights => "/data-insights",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::RealTimeParking => "Real-Time Parking",
            Page::DataInsights => "Data Insights",
        }
    }

    /// Unknown routes fall back to the home page.
    pub fn from_route(route: &str) -> Page {
        let route = route.trim_end_matches('/');
        Page::ALL
            .into_iter()
            .find(|p| p.route().trim_end_matches('/') == route)
            .unwrap_or(Page::Home)
    }
}
