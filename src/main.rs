use anyhow::Result;
use rgw_overview::ceph_api::CephClient;
use rgw_overview::services::{
    AuthStorage, FaviconService, MultiClusterService, SummaryService, TaskManagerService,
};
use rgw_overview::workbench::{WorkbenchDeps, WorkbenchSupervisor};
use rgw_overview::*;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;

    let client = Arc::new(CephClient::new(&app_config.ceph)?);
    let auth = client
        .login(&app_config.ceph.username, &app_config.ceph.password)
        .await
        .map_err(|e| anyhow::anyhow!("login to {}: {}", client.base_url(), e))?;
    if auth.pwd_update_required {
        tracing::warn!(username = %auth.username, "management API requests a password update");
    }
    let auth_storage = Arc::new(AuthStorage::from_login(&auth));

    let polling = &app_config.polling;
    let summary = Arc::new(SummaryService::new(client.clone(), polling.summary_interval_ms));
    let multi_cluster = Arc::new(MultiClusterService::new(
        client.clone(),
        polling.multi_cluster_interval_ms,
        polling.token_status_interval_ms,
    ));
    let favicon = Arc::new(FaviconService::new(summary.subscribe()));

    let mut workbench = WorkbenchSupervisor::new(WorkbenchDeps {
        permissions: auth_storage.clone(),
        summary: summary.clone(),
        task_manager: Arc::new(TaskManagerService::new()),
        multi_cluster: multi_cluster.clone(),
        favicon: favicon.clone(),
    });
    workbench.start();

    let app = routes::app(
        routes::RouteDeps {
            rgw: client.clone(),
            health: client.clone(),
            summary,
            multi_cluster,
            favicon,
            permissions: auth_storage,
        },
        Arc::new(AtomicUsize::new(0)),
    );
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    workbench.stop().await;
    served?;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("Received shutdown signal");
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
