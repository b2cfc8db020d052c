use clap::Args;
use serde_json::json;

use crate::auth::password::hash_password;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgUserStore};

#[derive(Args, Debug)]
pub struct SeedArgs {
    #[arg(long, default_value = "Admin", help = "Display name of the admin user")]
    pub name: String,

    #[arg(long, default_value = "admin@mail.com", help = "Login email of the admin user")]
    pub email: String,

    #[arg(long, default_value = "admin123", help = "Password for a newly created admin user")]
    pub password: String,
}

pub async fn handle(args: SeedArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let database = DatabaseManager::connect_lazy(&config.database)?;
    let users = PgUserStore::new(database.pool().clone());

    let hash = hash_password(&args.password)?;
    let (id, created) = users.first_or_create(&args.name, &args.email, &hash).await?;
    database.close().await;

    let message = if created {
        format!("Created admin user {}", args.email)
    } else {
        format!("Admin user {} already exists", args.email)
    };
    output_success(&output_format, &message, Some(json!({ "id": id, "created": created })))
}
