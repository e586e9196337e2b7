use clap::Parser;

use usersdb::cli::{Cli, Commands, LogFormat};
use usersdb::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "usersdb=debug,sqlx=warn".to_string());

    if cli.log_format == LogFormat::Json {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;
    tracing::debug!(config = ?app_state.config, "state initialised");

    match cli.command {
        Commands::Migrate => {
            app_state.migrate().await?;
            tracing::info!("migrations applied");
        }
        Commands::Create { email, password } => {
            let mut users = app_state.users()?;
            let id = users.create_new(&email, &password).await?;
            println!("{}", id);
        }
        Commands::Show { email } => {
            let mut users = app_state.users()?;
            match users.get_by_email(&email).await? {
                Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
                None => {
                    tracing::warn!(%email, "user not found");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
