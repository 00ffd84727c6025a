use crate::cli::ServeArgs;
use crate::infra::{file_editor, memory_editor, AppState};
use crate::routes::with_service_routes;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use vacancy_studio::config::AppConfig;
use vacancy_studio::error::AppError;
use vacancy_studio::telemetry;
use vacancy_studio::workflows::vacancy::templates::{
    shared_editor, template_router, KeyValueStore, VacancyEditor,
};

pub(crate) fn editor_app<S>(editor: VacancyEditor<S>) -> Router
where
    S: KeyValueStore + 'static,
{
    with_service_routes(template_router(shared_editor(editor)))
}

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let router = if args.ephemeral {
        info!("templates kept in memory for this run");
        editor_app(memory_editor(&config.templates.storage_key))
    } else {
        info!(
            dir = %config.templates.data_dir.display(),
            key = %config.templates.storage_key,
            "templates persisted to disk"
        );
        editor_app(file_editor(&config.templates))
    };

    let app = router
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "vacancy studio ready");

    axum::serve(listener, app).await?;
    Ok(())
}
