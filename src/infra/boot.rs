use crate::infra::config::{AppConfig, Config};
use crate::tools::registry::build_registry_from_config;
use crate::tools::tool_router::factory_with_registry;
use std::net::SocketAddr;

pub async fn run_server() -> anyhow::Result<()> {
    let cfg = Config::from_env();
    cfg.validate()?;
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        deprecate_rest = cfg.deprecate_rest,
        "BOOT edu-mcp-gateway"
    );

    let app_cfg = AppConfig::from_env_and_toml();
    let registry = build_registry_from_config(&app_cfg);

    // Stdio mode: run MCP over stdio ONLY (no HTTP).
    if cfg.mode == "stdio" {
        registry.announce("stdio");
        crate::infra::runtime::mcp_transport::serve_stdio(factory_with_registry(registry))
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = if cfg.deprecate_rest {
        crate::infra::http_app::build_app_default(registry.clone())
    } else {
        crate::infra::http_app::build_app_with_rest(registry.clone())
    };

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    registry.announce(&format!("http://{}", listener.local_addr()?));
    axum::serve(listener, app).await?;
    Ok(())
}
