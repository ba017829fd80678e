use std::net::SocketAddr;

use error_stack::ResultExt;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use kernel::KernelError;
use server::config::ServerConfig;
use server::error::StackTrace;
use server::handler::AppModule;
use server::logging;
use server::route::LoanRouter;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let _guard = logging::init("loan-service");

    let config = ServerConfig::from_env(8081)?;
    let app = AppModule::new().await?;
    app.pgpool().migrate_loans().await?;

    let router = axum::Router::new()
        .route_loan()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(app);

    let bind = SocketAddr::from(([0, 0, 0, 0], config.port()));
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to listen on {bind}"))?;
    tracing::info!("loan-service listening on {bind}");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
