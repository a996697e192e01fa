use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use poem::{listener::TcpListener, Server};

use itemstash_backend::api::build_app;
use itemstash_backend::app_data::AppData;
use itemstash_backend::cli::{self, Cli, Commands};
use itemstash_backend::config::{self, AppSettings, SecretManager};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    if let Err(e) = config::init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = AppSettings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    match args.command() {
        Commands::Migrate => cli::migrate::run_migrations(&settings).await?,
        Commands::Serve => {
            let app_data = prepare(settings).await?;
            serve(&app_data).await?;
        }
        Commands::CreateUser {
            name,
            email,
            status,
        } => {
            let app_data = prepare(settings).await?;
            let (profile, password) = cli::create_user::create_user(
                &app_data.auth_service,
                name.clone(),
                email.clone(),
                (*status).into(),
            )
            .await?;
            cli::create_user::print_created_user(&profile, &password);
        }
    }

    Ok(())
}

/// Load secrets, connect, migrate and wire the application
async fn prepare(settings: AppSettings) -> Result<AppData, Box<dyn std::error::Error>> {
    // Missing or weak secrets abort here, before anything binds
    let secret_manager = Arc::new(SecretManager::init()?);

    let db = config::init_database(&settings).await?;
    config::migrate_database(&db).await?;

    Ok(AppData::init(db, settings, secret_manager).await?)
}

async fn serve(app_data: &AppData) -> Result<(), Box<dyn std::error::Error>> {
    let address = app_data.settings.server_address();
    let public_url = format!("http://localhost:{}", app_data.settings.server_port());
    let app = build_app(app_data, &format!("{}/api", public_url));

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at {}/swagger", public_url);

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
