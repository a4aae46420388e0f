#[cfg(feature = "gui")]
mod app;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use melbourne_parking::{
    api::{PredictionApiClient, TrendsApiClient},
    config::AppConfig,
    report::TrendsReport,
    trends::TrendsPanel,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[cfg(feature = "gui")]
use melbourne_parking::SystemClock;

#[cfg(feature = "gui")]
use crate::app::{Message, ParkingApp};

#[derive(Parser, Debug)]
#[command(name = "melbourne-parking")]
#[command(about = "Melbourne parking availability client - GUI or headless trends lookup")]
struct Args {
    /// Look up historical trends for this street without opening a window
    #[arg(long)]
    street: Option<String>,

    /// Look up historical trends for this zone without opening a window
    #[arg(long)]
    zone: Option<String>,

    /// Override the trends service base URL
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let headless = args.street.is_some() || args.zone.is_some();

    // Initialize logging
    #[cfg(feature = "gui")]
    let filter = if headless {
        EnvFilter::builder()
            .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
            .parse_lossy("melbourne_parking=debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
            .parse_lossy("melbourne_parking=debug,fontdb=error,wgpu=warn,naga=warn")
    };

    #[cfg(not(feature = "gui"))]
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .parse_lossy("melbourne_parking=debug");

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(base_url) = args.base_url {
        config.trends.base_url = base_url;
    }
    let config = Arc::new(config);

    let client = TrendsApiClient::new(&config.trends, &config.network)?;
    tracing::info!("Trends endpoint: {}", client.endpoint());

    if headless {
        let mut panel = TrendsPanel::new();
        panel.update_area(args.street.unwrap_or_default());
        panel.update_zone(args.zone.unwrap_or_default());
        return run_headless(client, panel);
    }

    let predictor = PredictionApiClient::from_config(&config.prediction, &config.network)?;
    match &predictor {
        Some(p) => tracing::info!("Prediction endpoint: {}", p.endpoint()),
        None => tracing::info!("No prediction service configured, using local answers"),
    }

    #[cfg(feature = "gui")]
    {
        run_gui(config, client, predictor)
    }
    #[cfg(not(feature = "gui"))]
    {
        let _ = predictor;
        anyhow::bail!("GUI mode not available. Build with --features gui or pass --street/--zone")
    }
}

/// Run one trends lookup through the panel state machine and print the result.
fn run_headless(client: TrendsApiClient, mut panel: TrendsPanel) -> Result<ExitCode> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(panel.load_trends(&client));

    let report = TrendsReport::from_panel(&panel);
    println!("{}", report.render());
    Ok(report.exit_code())
}

/// Run in GUI mode - desktop application
#[cfg(feature = "gui")]
fn run_gui(
    config: Arc<AppConfig>,
    client: TrendsApiClient,
    predictor: Option<PredictionApiClient>,
) -> Result<ExitCode> {
    let window_width = config.window.width;
    let window_height = config.window.height;
    let title = config.window.title.clone();

    let app = iced::application(
        move || {
            ParkingApp::new(
                config.clone(),
                client.clone(),
                predictor.clone(),
                Arc::new(SystemClock),
            )
        },
        update,
        view,
    )
    .title(move |_: &ParkingApp| title.clone())
    .subscription(subscription)
    .theme(theme)
    .window(iced::window::Settings {
        size: iced::Size::new(window_width, window_height),
        ..Default::default()
    })
    .antialiasing(true);

    app.run().context("Failed to run application")?;

    Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "gui")]
fn update(app: &mut ParkingApp, message: Message) -> iced::Task<Message> {
    app.update(message)
}

#[cfg(feature = "gui")]
fn view(app: &ParkingApp) -> iced::Element<'_, Message> {
    app.view()
}

#[cfg(feature = "gui")]
fn subscription(app: &ParkingApp) -> iced::Subscription<Message> {
    app.subscription()
}

#[cfg(feature = "gui")]
fn theme(app: &ParkingApp) -> iced::Theme {
    app.theme()
}
