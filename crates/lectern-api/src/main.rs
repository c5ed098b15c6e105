#![forbid(unsafe_code)]

//! Lectern API server
//!
//! Dev entry point: reads the auth configuration from the environment,
//! seeds an in-memory directory, and serves the auth surface.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use lectern_api::password::hash_password;
use lectern_api::{router, AppState, MemoryDirectory};
use lectern_auth::{AuthConfig, TokenService};
use lectern_core::{Permission, PermissionSet, RoleId, RoleRecord, UserId, UserRecord};

/// Lectern API server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind
    #[arg(short, long, default_value = "127.0.0.1:8080", env = "LECTERN_BIND")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // TokenService::new validates the configuration, including the
    // super-admin wildcard literal, so a bad deployment fails here.
    let config = AuthConfig::from_env();
    let tokens = Arc::new(TokenService::new(&config)?);
    let directory = Arc::new(seed_directory()?);

    let app = router(AppState { tokens, directory });

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    log::info!("listening on {}", args.bind);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed the in-memory directory with an administrator and an instructor.
fn seed_directory() -> Result<MemoryDirectory> {
    let directory = MemoryDirectory::new();

    let admin_role = RoleRecord {
        id: RoleId::new(),
        name: "administrator".to_string(),
        permissions: PermissionSet::from_iter([Permission::All]),
    };
    let instructor_role = RoleRecord {
        id: RoleId::new(),
        name: "instructor".to_string(),
        permissions: PermissionSet::from_iter([
            Permission::ViewCourses,
            Permission::CreateCourse,
            Permission::EditCourse,
            Permission::UploadFiles,
            Permission::ViewReports,
        ]),
    };

    let admin_password =
        std::env::var("LECTERN_ADMIN_PASSWORD").unwrap_or_else(|_| "lectern-admin".to_string());
    let instructor_password = std::env::var("LECTERN_INSTRUCTOR_PASSWORD")
        .unwrap_or_else(|_| "lectern-instructor".to_string());

    directory.upsert_user(UserRecord {
        id: UserId::new(),
        email: "admin@lectern.local".to_string(),
        password_hash: hash_password(&admin_password)?,
        role_id: admin_role.id,
        active: true,
    });
    directory.upsert_user(UserRecord {
        id: UserId::new(),
        email: "instructor@lectern.local".to_string(),
        password_hash: hash_password(&instructor_password)?,
        role_id: instructor_role.id,
        active: true,
    });
    directory.upsert_role(admin_role);
    directory.upsert_role(instructor_role);

    log::info!("seeded admin@lectern.local and instructor@lectern.local");
    Ok(directory)
}
