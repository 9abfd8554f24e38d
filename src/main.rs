use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use saathi_backend::config::EnvironmentConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🛡️ Saathi - API de rutas seguras");
    info!("================================");

    let config = EnvironmentConfig::from_env()?;
    let addr = config.server_addr();
    info!("⚙️ Entorno: {} | store: {:?}", config.environment, config.storage);
    if config.is_development() {
        info!("🧪 Modo desarrollo: cookie de sesión sin flag Secure");
    }

    let state = match saathi_backend::build_state(config).await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Error inicializando la aplicación: {:#}", e);
            return Err(e);
        }
    };

    let app = saathi_backend::create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   POST /api/register | /api/login | /api/logout, GET /api/user");
    info!("   GET|POST /api/routes, GET|POST /api/routes/:routeId/reviews");
    info!("   GET /api/saathis, GET|POST /api/saathi/requests");
    info!("   PATCH /api/saathi/requests/:requestId/status");
    info!("   POST /api/emergency/alert");
    info!("   GET /api/maps/geocode, GET /api/maps/route");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
