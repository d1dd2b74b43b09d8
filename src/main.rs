use std::sync::Arc;

use sentinel_backend::config::Config;
use sentinel_backend::session::Sessions;
use sentinel_backend::solana::VaultClient;
use sentinel_backend::theme::Theme;
use sentinel_backend::{app, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let theme = Theme::named(&config.theme).unwrap_or_else(|| {
        eprintln!("unknown theme '{}', falling back to cyber", config.theme);
        Theme::cyber()
    });

    println!("🔐 Sentinel vault backend");
    println!("   program: {}", config.program_id);
    println!("   mint:    {}", config.token_mint);
    println!("   rpc:     {}", config.rpc_url);
    println!("   theme:   {}", theme.name);

    let state = AppState {
        client: Arc::new(VaultClient::new(&config)),
        sessions: Sessions::default(),
        theme,
    };

    let listener = TcpListener::bind(&config.bind_addr).await?;
    println!("🚀 Dashboard API on http://{}", config.bind_addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
