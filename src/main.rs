//! Feedback report server.
//!
//! Loads configuration from the environment, connects to the survey store,
//! and serves the report endpoints.

use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feedback_report::adapters::http::{report_router, ReportAppState};
use feedback_report::adapters::{
    HtmlReportRenderer, MarkdownReportRenderer, PandocReportRenderer, PostgresSurveyReader,
    QuickChartConfig, QuickChartProvider,
};
use feedback_report::config::{AppConfig, ServerConfig};
use feedback_report::domain::report::ReportStatisticsBuilder;
use feedback_report::ports::{ChartImageProvider, ReportFormat, ReportRenderer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    info!(
        environment = ?config.server.environment,
        format = %config.report.format,
        numbering = ?config.report.index_numbering,
        "Starting feedback report server"
    );

    let pool = config.database.pool_options().connect(&config.database.url).await?;
    if config.database.run_migrations {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let state = ReportAppState {
        survey_reader: Arc::new(PostgresSurveyReader::new(pool)),
        renderer: build_renderer(&config)?,
        builder: ReportStatisticsBuilder::new(config.report.index_numbering),
        fetch_timeout: config.report.fetch_timeout(),
    };

    let app = with_middleware(report_router().with_state(state), &config.server);

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    info!(%address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn build_renderer(config: &AppConfig) -> Result<Arc<dyn ReportRenderer>, Box<dyn std::error::Error>> {
    let chart = || -> Result<Arc<dyn ChartImageProvider>, Box<dyn std::error::Error>> {
        let provider = QuickChartProvider::new(QuickChartConfig::from(&config.chart))?;
        Ok(Arc::new(provider))
    };

    let renderer: Arc<dyn ReportRenderer> = match config.report.format {
        ReportFormat::Pdf => Arc::new(
            PandocReportRenderer::from_config(&config.report).with_chart_provider(chart()?),
        ),
        ReportFormat::Html => Arc::new(HtmlReportRenderer::new().with_chart_provider(chart()?)),
        ReportFormat::Markdown => Arc::new(MarkdownReportRenderer::new()),
    };
    Ok(renderer)
}

fn with_middleware(app: Router, server: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    app.layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
