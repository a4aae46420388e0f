use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Local, Utc};
use iced::{
    Alignment, Border, Color, Element, Length, Shadow, Subscription, Task, Theme, Vector,
    event, keyboard,
    widget::{
        Column, Space, TextInput, button,
        canvas::{Cache, Canvas},
        center, column, container, row, scrollable, stack, text, text_input,
    },
};
use melbourne_parking::{
    api::{ApiError, ApiReply, AreaKey, PredictionApiClient, TrendsApiClient},
    config::AppConfig,
    documents::{self, DocumentCatalog, EmbeddedDocument, InsightCard},
    export,
    pages::Page,
    prediction::{AvailabilityClass, PredictionField, PredictionOutcome, PredictionPanel},
    style::Palette,
    tabs::{Direction, Tab, TabController},
    traits::Clock,
    trends::{LOADING_STATUS, TrendsPanel, TrendsState},
    widgets::heatmap::AvailabilityHeatmap,
};
use thiserror::Error;

/// Typed Application Errors
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Could not open document: {0}")]
    Document(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

// --- STATE STRUCTS ---

/// Everything owned by one mount of the real-time parking page.
struct RealTimeState {
    mount: u64,
    tabs: TabController,
    prediction: PredictionPanel,
    trends: TrendsPanel,
    loaded_area: Option<AreaKey>,
    loaded_at: Option<DateTime<Utc>>,
    heatmap_cache: Cache,
    heatmap_tooltip_cache: Cache,
}

impl RealTimeState {
    fn new(mount: u64) -> Self {
        Self {
            mount,
            tabs: TabController::new(),
            prediction: PredictionPanel::new(),
            trends: TrendsPanel::new(),
            loaded_area: None,
            loaded_at: None,
            heatmap_cache: Cache::new(),
            heatmap_tooltip_cache: Cache::new(),
        }
    }
}

struct ExportState {
    status: Option<String>,
}

pub struct ParkingApp {
    config: Arc<AppConfig>,
    client: Arc<TrendsApiClient>,
    predictor: Option<Arc<PredictionApiClient>>,
    clock: Arc<dyn Clock>,
    palette: Palette,
    documents: DocumentCatalog,
    page: Page,
    error: Option<AppError>,
    mounts: u64,

    // Grouped State
    realtime: RealTimeState,
    export: ExportState,
}

#[derive(Debug, Clone)]
pub enum Message {
    ChartInteraction, // Mapped from widget interaction

    // Navigation
    Navigate(Page),
    TabSelected(Tab),
    TabKey(Direction),

    // Predict panel
    PredictionFieldChanged(PredictionField, String),
    SubmitPrediction,
    PredictionLoaded {
        mount: u64,
        seq: u64,
        result: Result<ApiReply, ApiError>,
    },

    // History panel
    TrendsAreaChanged(String),
    TrendsZoneChanged(String),
    LoadTrends,
    TrendsLoaded {
        mount: u64,
        seq: u64,
        area: AreaKey,
        result: Result<ApiReply, ApiError>,
    },

    // Documents & Export
    OpenDocument(String),
    DocumentOpened(Result<(), AppError>),
    ExportTrends,
    ExportCompleted(Result<String, AppError>),
    ClearExportStatus,
}

impl ParkingApp {
    pub fn new(
        config: Arc<AppConfig>,
        client: TrendsApiClient,
        predictor: Option<PredictionApiClient>,
        clock: Arc<dyn Clock>,
    ) -> (Self, Task<Message>) {
        let documents = DocumentCatalog::new(&config.documents);
        let app = Self {
            config,
            client: Arc::new(client),
            predictor: predictor.map(Arc::new),
            clock,
            palette: Palette::default(),
            documents,
            page: Page::default(),
            error: None,
            mounts: 0,
            realtime: RealTimeState::new(0),
            export: ExportState { status: None },
        };
        (app, Task::none())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChartInteraction => Task::none(),
            Message::Navigate(page) => {
                if page != self.page {
                    tracing::debug!("Navigating to {}", page.route());
                    if page == Page::RealTimeParking {
                        self.mounts += 1;
                        self.realtime = RealTimeState::new(self.mounts);
                    }
                    self.page = page;
                    self.error = None;
                }
                Task::none()
            }
            Message::TabSelected(tab) => {
                self.realtime.tabs.select(tab);
                Task::none()
            }
            Message::TabKey(direction) => {
                if self.page == Page::RealTimeParking {
                    self.realtime.tabs.handle_directional_key(direction);
                }
                Task::none()
            }
            Message::PredictionFieldChanged(field, value) => {
                self.realtime.tabs.blur();
                self.realtime.prediction.update_field(field, value);
                Task::none()
            }
            Message::SubmitPrediction => {
                self.realtime.tabs.blur();
                let Some(predictor) = self.predictor.clone() else {
                    let outcome = self.realtime.prediction.submit();
                    tracing::debug!("Prediction outcome: {}", outcome.message());
                    return Task::none();
                };
                let Some(ticket) = self.realtime.prediction.begin_request() else {
                    return Task::none();
                };
                tracing::info!(
                    "Requesting prediction #{} for {} at {}",
                    ticket.seq,
                    ticket.request.area,
                    ticket.request.time
                );
                let mount = self.realtime.mount;
                let seq = ticket.seq;
                Task::perform(
                    async move { predictor.predict(&ticket.request).await },
                    move |result| Message::PredictionLoaded { mount, seq, result },
                )
            }
            Message::PredictionLoaded { mount, seq, result } => {
                if mount != self.realtime.mount {
                    tracing::debug!("Dropping prediction response from an unmounted page");
                    return Task::none();
                }
                if self.realtime.prediction.finish_request(seq, result)
                    && let Some(outcome) = self.realtime.prediction.outcome()
                {
                    tracing::debug!("Prediction outcome: {}", outcome.message());
                }
                Task::none()
            }
            Message::TrendsAreaChanged(value) => {
                self.realtime.tabs.blur();
                self.realtime.trends.update_area(value);
                Task::none()
            }
            Message::TrendsZoneChanged(value) => {
                self.realtime.tabs.blur();
                self.realtime.trends.update_zone(value);
                Task::none()
            }
            Message::LoadTrends => {
                self.realtime.tabs.blur();
                self.realtime.heatmap_cache.clear();
                let Some(ticket) = self.realtime.trends.begin_load() else {
                    return Task::none();
                };
                tracing::info!("Loading trends #{} for '{}'", ticket.seq, ticket.area);
                let client = self.client.clone();
                let mount = self.realtime.mount;
                Task::perform(
                    async move {
                        let result = client.fetch_trends(&ticket.area).await;
                        (ticket, result)
                    },
                    move |(ticket, result)| Message::TrendsLoaded {
                        mount,
                        seq: ticket.seq,
                        area: ticket.area,
                        result,
                    },
                )
            }
            Message::TrendsLoaded {
                mount,
                seq,
                area,
                result,
            } => {
                if mount != self.realtime.mount {
                    tracing::debug!("Dropping trends response from an unmounted page");
                    return Task::none();
                }
                if self.realtime.trends.finish_load(seq, result) {
                    self.realtime.heatmap_cache.clear();
                    if matches!(self.realtime.trends.state(), TrendsState::Loaded(_)) {
                        self.realtime.loaded_area = Some(area);
                        self.realtime.loaded_at = Some(self.clock.now_utc());
                    } else {
                        self.realtime.loaded_area = None;
                        self.realtime.loaded_at = None;
                    }
                }
                Task::none()
            }
            Message::OpenDocument(url) => {
                self.realtime.tabs.blur();
                Task::perform(
                    async move {
                        tokio::task::spawn_blocking(move || {
                            documents::open_in_browser(&url)
                                .map_err(|e| AppError::Document(e.to_string()))
                        })
                        .await
                        .map_err(|e| AppError::Unknown(e.to_string()))?
                    },
                    Message::DocumentOpened,
                )
            }
            Message::DocumentOpened(result) => {
                match result {
                    Ok(()) => self.error = None,
                    Err(e) => {
                        tracing::warn!("{}", e);
                        self.error = Some(e);
                    }
                }
                Task::none()
            }
            Message::ExportTrends => {
                self.realtime.tabs.blur();
                let (Some(summary), Some(street)) = (
                    self.realtime.trends.summary().cloned(),
                    self.realtime.loaded_area.as_ref().map(AreaKey::to_string),
                ) else {
                    return Task::none();
                };
                self.export.status = Some("Exporting...".to_string());
                let export_time = self.clock.now_utc();
                Task::perform(
                    async move {
                        let path = tokio::task::spawn_blocking(move || {
                            export::export_to_dir(
                                &summary,
                                &street,
                                &export::default_export_dir(),
                                export_time,
                            )
                            .map_err(|e| AppError::Io(format!("{:#}", e)))
                        })
                        .await
                        .map_err(|e| AppError::Unknown(e.to_string()))??;
                        Ok(path.to_string_lossy().to_string())
                    },
                    Message::ExportCompleted,
                )
            }
            Message::ExportCompleted(result) => {
                match result {
                    Ok(path) => self.export.status = Some(format!("Saved to {}", path)),
                    Err(e) => {
                        self.error = Some(e);
                        self.export.status = Some("Export failed".to_string());
                    }
                }
                Task::perform(
                    async {
                        tokio::time::sleep(Duration::from_secs(4)).await;
                    },
                    |_| Message::ClearExportStatus,
                )
            }
            Message::ClearExportStatus => {
                self.export.status = None;
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let app_layout: Element<'_, Message> = match self.page {
            Page::Home => self.view_home(),
            page => {
                let content = match page {
                    Page::DataInsights => self.view_data_insights(),
                    _ => self.view_real_time(),
                };
                let main_area = container(column![
                    self.view_header(),
                    Space::new().height(20),
                    scrollable(content).height(Length::Fill)
                ])
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(30);

                row![self.view_sidebar(), main_area]
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into()
            }
        };

        if let Some(msg) = &self.export.status {
            let palette = self.palette;
            let toast = container(text(msg).size(14).color(palette.text_bright))
                .padding([12, 24])
                .style(move |_| container::Style {
                    background: Some(palette.bg_card.into()),
                    border: Border {
                        radius: 20.0.into(),
                        width: 1.0,
                        color: palette.accent_green,
                    },
                    shadow: Shadow {
                        color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
                        offset: Vector::new(0.0, 4.0),
                        blur_radius: 10.0,
                    },
                    ..Default::default()
                });
            stack![
                app_layout,
                container(toast)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Alignment::Center)
                    .padding(30)
            ]
            .into()
        } else {
            app_layout
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.page != Page::RealTimeParking {
            return Subscription::none();
        }
        // Arrow keys captured by a focused text input never reach the tab strip.
        event::listen_with(|ev, status, _window_id| {
            if status == event::Status::Captured {
                return None;
            }
            match ev {
                iced::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match key {
                    keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => {
                        Some(Message::TabKey(Direction::Previous))
                    }
                    keyboard::Key::Named(keyboard::key::Named::ArrowRight) => {
                        Some(Message::TabKey(Direction::Next))
                    }
                    _ => None,
                },
                _ => None,
            }
        })
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // --- VIEW COMPONENTS ---

    fn view_home(&self) -> Element<'_, Message> {
        let palette = self.palette;

        let nav_link = |label: &'static str, page: Page| {
            button(text(label).size(19).color(palette.text_bright))
                .on_press(Message::Navigate(page))
                .padding([4, 0])
                .style(|_, _| button::Style {
                    background: None,
                    ..Default::default()
                })
        };

        let header = column![
            text("MELBOURNE PARKING")
                .size(29)
                .font(iced::font::Font::MONOSPACE)
                .color(palette.text_bright),
            row![
                nav_link("Real-Time Parking", Page::RealTimeParking),
                nav_link("Data Insights", Page::DataInsights),
            ]
            .spacing(30)
        ]
        .spacing(8);

        let hero = column![
            text("Melbourne - Make Park Easy")
                .size(48)
                .color(palette.text_bright),
            Space::new().height(20),
            button(text("Find Parking").size(18))
                .on_press(Message::Navigate(Page::RealTimeParking))
                .padding([10, 25])
                .style(move |_, _| button::Style {
                    background: Some(palette.accent_blue.into()),
                    text_color: palette.text_bright,
                    border: Border {
                        radius: 25.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                })
        ]
        .align_x(Alignment::Center);

        container(column![
            container(header).padding([20, 40]),
            center(hero)
        ])
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| container::Style {
            background: Some(palette.bg_dark.into()),
            ..Default::default()
        })
        .into()
    }

    fn view_sidebar(&self) -> Element<'_, Message> {
        let palette = self.palette;
        let sidebar_width = self.config.window.sidebar_width;

        let brand = column![
            text("MELBOURNE")
                .size(28)
                .font(iced::font::Font::MONOSPACE)
                .color(palette.accent_blue),
            text("PARKING").size(14).color(palette.text_muted),
        ];

        let nav_btn = |label: &'static str, page: Page| {
            let is_active = self.page == page;
            let bg = if is_active {
                palette.accent_blue
            } else {
                Color::TRANSPARENT
            };
            let txt = if is_active {
                palette.text_bright
            } else {
                palette.text_muted
            };
            button(text(label).color(txt).size(16))
                .on_press(Message::Navigate(page))
                .style(move |_, _| button::Style {
                    background: Some(bg.into()),
                    border: Border {
                        radius: 8.0.into(),
                        ..Default::default()
                    },
                    text_color: txt,
                    ..Default::default()
                })
                .width(Length::Fill)
                .padding(12)
        };

        container(column![
            brand,
            Space::new().height(40),
            nav_btn("← Home", Page::Home),
            Space::new().height(10),
            nav_btn("Real-Time Parking", Page::RealTimeParking),
            Space::new().height(10),
            nav_btn("Data Insights", Page::DataInsights),
        ])
        .width(Length::Fixed(sidebar_width))
        .height(Length::Fill)
        .style(move |_| container::Style {
            background: Some(palette.bg_card.into()),
            border: Border {
                color: palette.stroke_dim,
                width: 1.0,
                ..Default::default()
            },
            ..Default::default()
        })
        .padding(20)
        .into()
    }

    fn view_header(&self) -> Element<'_, Message> {
        let palette = self.palette;

        let status = if let Some(e) = &self.error {
            row![
                container(text("!").size(12).color(palette.bg_dark))
                    .padding([2, 6])
                    .style(move |_| container::Style {
                        background: Some(palette.accent_red.into()),
                        border: Border {
                            radius: 10.0.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }),
                text(e.to_string()).size(14).color(palette.accent_red)
            ]
            .spacing(8)
            .align_y(Alignment::Center)
        } else if self.page == Page::RealTimeParking {
            let last_loaded = self
                .realtime
                .loaded_at
                .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "--:--:--".to_string());
            row![
                text(format!("Trends loaded: {}", last_loaded))
                    .size(14)
                    .color(palette.text_muted)
            ]
        } else {
            row![]
        };

        let title = match self.page {
            Page::DataInsights => "Parking & Traffic Insights",
            page => page.title(),
        };

        row![
            text(title).size(28).color(palette.text_bright),
            Space::new().width(Length::Fill),
            status,
        ]
        .align_y(Alignment::Center)
        .into()
    }

    fn view_real_time(&self) -> Element<'_, Message> {
        let palette = self.palette;
        let tabs = &self.realtime.tabs;

        let tab_btn = |tab: Tab| {
            let active = tabs.active() == tab;
            button(text(tab.label()).size(14))
                .on_press(Message::TabSelected(tab))
                .padding([8, 16])
                .style(move |_, _| {
                    if active {
                        primary_btn_style(palette)
                    } else {
                        secondary_btn_style(palette)
                    }
                })
        };
        let strip = Tab::ALL
            .into_iter()
            .fold(row![].spacing(10), |strip, tab| strip.push(tab_btn(tab)));

        let panel = match tabs.active() {
            Tab::RealTime => self.view_real_time_panel(),
            Tab::Predict => self.view_predict_panel(),
            Tab::History => self.view_history_panel(),
        };

        column![
            document_frame(palette, &self.documents.live_map),
            card_container(palette, column![strip, Space::new().height(20), panel])
                .width(Length::Fill)
        ]
        .spacing(20)
        .into()
    }

    fn view_real_time_panel(&self) -> Element<'_, Message> {
        let palette = self.palette;
        column![
            text("Live bay status is shown on the map above.")
                .size(14)
                .color(palette.text_bright),
            text("The map refreshes itself every minute.")
                .size(12)
                .color(palette.text_muted),
            Space::new().height(10),
            button(text("Open live map").size(12))
                .on_press(Message::OpenDocument(self.documents.live_map.url.clone()))
                .padding([8, 12])
                .style(move |_, _| secondary_btn_style(palette))
        ]
        .spacing(6)
        .into()
    }

    fn view_predict_panel(&self) -> Element<'_, Message> {
        let palette = self.palette;
        let panel = &self.realtime.prediction;
        let query = panel.query();

        let field = |label: &'static str, placeholder: &'static str, f: PredictionField| {
            column![
                text(label).size(12).color(palette.text_muted),
                styled_input(
                    palette,
                    placeholder,
                    query.field(f),
                    panel.is_flagged(f),
                    move |v| Message::PredictionFieldChanged(f, v)
                )
                .on_submit(Message::SubmitPrediction)
                .width(Length::Fixed(200.0))
            ]
            .spacing(4)
        };

        let form = row![
            field("Location", "e.g., Collins St", PredictionField::Location),
            field("Date", "YYYY-MM-DD", PredictionField::Date),
            field("Time", "HH:MM", PredictionField::Time),
            button(text("Predict").size(12))
                .on_press(Message::SubmitPrediction)
                .padding([8, 12])
                .style(move |_, _| primary_btn_style(palette))
        ]
        .spacing(10)
        .align_y(Alignment::End);

        let mut content = Column::new().spacing(16).push(form);
        if panel.is_pending() {
            content = content.push(text(LOADING_STATUS).size(14).color(palette.text_muted));
        } else if let Some(outcome) = panel.outcome() {
            let color = match outcome {
                PredictionOutcome::Recommendation {
                    class: AvailabilityClass::MostLikelyAvailable,
                    ..
                } => palette.accent_green,
                PredictionOutcome::Recommendation {
                    class: AvailabilityClass::NotPossible,
                    ..
                } => palette.accent_red,
                PredictionOutcome::Incomplete { .. } => palette.accent_orange,
                PredictionOutcome::Failed { .. } => palette.accent_red,
            };
            content = content.push(text(outcome.message()).size(16).color(color));
            if let Some(details) = outcome.details() {
                content = content.push(text(details).size(12).color(palette.text_muted));
            }
        }
        content.into()
    }

    fn view_history_panel(&self) -> Element<'_, Message> {
        let palette = self.palette;
        let trends = &self.realtime.trends;

        let controls = row![
            styled_input(
                palette,
                "e.g., Swanston Street",
                &trends.query().area,
                false,
                Message::TrendsAreaChanged
            )
            .on_submit(Message::LoadTrends)
            .width(Length::Fixed(280.0)),
            styled_input(
                palette,
                "Zone (optional), e.g., 7539",
                &trends.query().zone,
                false,
                Message::TrendsZoneChanged
            )
            .on_submit(Message::LoadTrends)
            .width(Length::Fixed(180.0)),
            button(text("Load trends").size(12))
                .on_press(Message::LoadTrends)
                .padding([8, 12])
                .style(move |_, _| primary_btn_style(palette))
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let status_color = match trends.state() {
            TrendsState::Failed(_) => palette.accent_red,
            TrendsState::Loaded(_) => palette.accent_green,
            TrendsState::Idle | TrendsState::Loading => palette.text_muted,
        };

        let mut content = Column::new()
            .spacing(14)
            .push(controls)
            .push(text(trends.status()).size(14).color(status_color));

        if let Some(summary) = trends.summary() {
            let heatmap = Canvas::new(AvailabilityHeatmap {
                summary,
                palette,
                cache: &self.realtime.heatmap_cache,
                tooltip_cache: &self.realtime.heatmap_tooltip_cache,
            })
            .width(Length::Fill)
            .height(Length::Fixed(240.0));

            content = content
                .push(
                    row![
                        text(summary.summary_line())
                            .size(12)
                            .color(palette.text_muted),
                        Space::new().width(Length::Fill),
                        button(text("Export CSV").size(12))
                            .on_press(Message::ExportTrends)
                            .padding([8, 12])
                            .style(move |_, _| secondary_btn_style(palette))
                    ]
                    .align_y(Alignment::Center),
                )
                .push(Element::from(heatmap).map(|_| Message::ChartInteraction));
        }

        if let Some(pretty) = trends.pretty_payload() {
            content = content.push(
                container(
                    scrollable(
                        text(pretty)
                            .size(12)
                            .font(iced::font::Font::MONOSPACE)
                            .color(palette.text_bright),
                    )
                    .height(Length::Fixed(260.0)),
                )
                .padding(12)
                .width(Length::Fill)
                .style(move |_| container::Style {
                    background: Some(palette.bg_dark.into()),
                    border: Border {
                        radius: 8.0.into(),
                        width: 1.0,
                        color: palette.stroke_dim,
                    },
                    ..Default::default()
                }),
            );
        }

        content.into()
    }

    fn view_data_insights(&self) -> Element<'_, Message> {
        let palette = self.palette;
        let subtitle = text(
            "EPIC 1.0 Visualisations: Vehicle Ownership Growth & Melbourne Population Trends",
        )
        .size(16)
        .color(palette.text_muted);

        self.documents
            .insights
            .iter()
            .fold(
                Column::new().spacing(24).push(subtitle),
                |col, card| col.push(insight_card(palette, card)),
            )
            .into()
    }
}

// --- HELPER FUNCTIONS ---
fn card_container<'a>(
    palette: Palette,
    content: impl Into<Element<'a, Message>>,
) -> container::Container<'a, Message> {
    container(content).padding(24).style(move |_| container::Style {
        background: Some(palette.bg_card.into()),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 16.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
            offset: Vector::new(0.0, 4.0),
            blur_radius: 10.0,
        },
        ..Default::default()
    })
}

/// Fixed-size frame standing in for the embedded document. Nothing is read from it.
fn document_frame<'a>(palette: Palette, doc: &'a EmbeddedDocument) -> Element<'a, Message> {
    let body = column![
        text(&doc.title).size(18).color(palette.text_bright),
        text(&doc.url)
            .size(12)
            .font(iced::font::Font::MONOSPACE)
            .color(palette.text_muted),
        Space::new().height(10),
        button(text("Open in browser").size(12))
            .on_press(Message::OpenDocument(doc.url.clone()))
            .padding([8, 12])
            .style(move |_, _| primary_btn_style(palette))
    ]
    .spacing(6)
    .align_x(Alignment::Center);

    container(center(body))
        .width(Length::Fixed(doc.width))
        .height(Length::Fixed(doc.height))
        .style(move |_| container::Style {
            background: Some(palette.bg_dark.into()),
            border: Border {
                radius: 12.0.into(),
                width: 1.0,
                color: palette.stroke_dim,
            },
            ..Default::default()
        })
        .into()
}

fn insight_card<'a>(palette: Palette, card: &'a InsightCard) -> Element<'a, Message> {
    let badge = |label: &'static str| {
        container(text(label).size(12).color(palette.text_bright))
            .padding([4, 8])
            .style(move |_| container::Style {
                background: Some(palette.bg_dark.into()),
                border: Border {
                    radius: 999.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            })
    };

    card_container(
        palette,
        column![
            text(card.heading).size(20).color(palette.text_bright),
            text(card.description).size(14).color(palette.text_muted),
            Space::new().height(10),
            document_frame(palette, &card.document),
            row![badge(card.badges[0]), badge(card.badges[1])].spacing(16),
        ]
        .spacing(6),
    )
    .width(Length::Fill)
    .into()
}

fn styled_input<'a>(
    palette: Palette,
    placeholder: &str,
    val: &str,
    flagged: bool,
    on_change: impl Fn(String) -> Message + 'a,
) -> TextInput<'a, Message> {
    text_input(placeholder, val)
        .on_input(on_change)
        .padding(8)
        .size(12)
        .style(move |_, status| {
            let border_color = if flagged {
                palette.accent_red
            } else if matches!(status, text_input::Status::Focused { .. }) {
                palette.accent_blue
            } else {
                palette.stroke_dim
            };
            text_input::Style {
                background: palette.bg_dark.into(),
                border: Border {
                    color: border_color,
                    width: 1.0,
                    radius: 6.0.into(),
                },
                icon: palette.text_muted,
                placeholder: palette.text_muted,
                value: palette.text_bright,
                selection: palette.accent_blue,
            }
        })
}

fn primary_btn_style(palette: Palette) -> button::Style {
    button::Style {
        background: Some(palette.accent_blue.into()),
        text_color: palette.text_bright,
        border: Border {
            radius: 6.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn secondary_btn_style(palette: Palette) -> button::Style {
    button::Style {
        background: Some(palette.bg_dark.into()),
        text_color: palette.text_bright,
        border: Border {
            radius: 6.0.into(),
            color: palette.stroke_dim,
            width: 1.0,
        },
        ..Default::default()
    }
}
