use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use rota_certa_backend::config::environment::EnvironmentConfig;
use rota_certa_backend::database::connection::{create_pool, run_migrations};
use rota_certa_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Carregar variáveis de ambiente
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚚 ROTA CERTA - Backend de Gestão de Frota");
    info!("==========================================");

    let config = EnvironmentConfig::default();

    // Inicializar banco de dados
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Erro conectando ao banco de dados: {}", e);
            return Err(e);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        error!("❌ Erro executando migrations: {}", e);
        return Err(e);
    }
    info!("✅ Banco de dados pronto");

    let state = AppState::new(pool, config.clone());
    let app = rota_certa_backend::app(state);

    let addr = config.server_url();
    info!("🌐 Servidor iniciando em http://{}", addr);
    info!("🔍 Endpoints disponíveis:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/register - Cadastrar usuário");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Sessão atual");
    info!("   PUT  /api/auth/profile - Editar perfil");
    info!("🚗 Veículos:");
    info!("   POST /api/vehicle - Cadastrar veículo (admin)");
    info!("   GET  /api/vehicle - Listar veículos");
    info!("   GET  /api/vehicle/:id - Obter veículo");
    info!("   PUT  /api/vehicle/:id - Editar veículo (admin)");
    info!("   GET  /api/vehicle/subscribe - Live-query da frota (SSE)");
    info!("📋 Checklists:");
    info!("   POST /api/checklist/heavy - Checklist frota pesada");
    info!("   POST /api/checklist/light - Checklist frota leve");
    info!("   GET  /api/checklist - Listar checklists");
    info!("   GET  /api/checklist/:id - Obter checklist");
    info!("   GET  /api/checklist/subscribe - Live-query (SSE)");
    info!("🔧 Manutenção (admin):");
    info!("   GET  /api/maintenance - Listar solicitações");
    info!("   PUT  /api/maintenance/:id/status - Atualizar status");
    info!("   GET  /api/maintenance/subscribe - Live-query (SSE)");
    info!("📊 Relatórios:");
    info!("   GET  /api/report/dashboard - Resumo da frota");
    info!("   GET  /api/report/unified - Relatório unificado (admin)");
    info!("   GET  /api/report/checklist/:id/pdf - Exportar PDF (admin)");
    info!("   GET  /api/report/checklist/:id/text - Exportar texto (admin)");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("falha ao instalar handler de Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("falha ao instalar handler de SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Encerrando servidor...");
}
