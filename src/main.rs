use chrono::NaiveDate;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orgql::config::Config;
use orgql::db::{AppState, create_pool, init_db, queries};
use orgql::error::Result;
use orgql::graphql;
use orgql::handlers;
use orgql::jwt::TokenService;
use orgql::models::{CreateEmployee, CreateOrganization, CreateUser};

#[derive(Parser, Debug)]
#[command(name = "orgql")]
#[command(about = "GraphQL API for organizations and employees")]
struct Cli {
    /// Seed the database with dev data (user, organization, employees)
    #[arg(long)]
    seed: bool,

    /// Create a login account and exit. Requires --password.
    #[arg(long, value_name = "USERNAME", requires = "password")]
    create_user: Option<String>,

    /// Password for --create-user
    #[arg(long, requires = "create_user")]
    password: Option<String>,

    /// Print the GraphQL schema (SDL) and exit
    #[arg(long)]
    print_schema: bool,
}

/// Creates the first account from BOOTSTRAP_USERNAME / BOOTSTRAP_PASSWORD
/// when the users table is empty.
fn bootstrap_first_user(state: &AppState, username: &str, password: &str) -> Result<()> {
    let conn = state.db.get()?;

    if queries::count_users(&conn)? > 0 {
        tracing::info!("Users already exist, skipping bootstrap");
        return Ok(());
    }

    let user = queries::create_user(
        &conn,
        &CreateUser {
            username: username.to_string(),
            password: password.to_string(),
        },
    )?;

    tracing::info!("Bootstrap user created: {} (id: {})", user.username, user.id);
    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

/// Seeds a dev login, one organization, and two employees.
/// Only runs in dev mode and when no users exist.
fn seed_dev_data(state: &AppState) -> Result<()> {
    let conn = state.db.get()?;

    if queries::count_users(&conn)? > 0 {
        tracing::info!("Database already has data, skipping seed");
        return Ok(());
    }

    tracing::info!("============================================");
    tracing::info!("SEEDING DEV DATA");
    tracing::info!("============================================");

    let user = queries::create_user(
        &conn,
        &CreateUser {
            username: "dev".to_string(),
            password: "dev".to_string(),
        },
    )?;
    tracing::info!("User: {} (password: dev)", user.username);

    let org = queries::create_organization(
        &conn,
        &CreateOrganization {
            id: 1,
            name: "Dev Org".to_string(),
            establish_date: Some(date(1999, 4, 1)),
            ord_id: Some(1001),
        },
    )?;
    tracing::info!("Organization: {} (id: {})", org.name, org.id);

    for (employee_id, name, joining_date) in [
        (101, "Alice", date(2004, 1, 5)),
        (102, "Bob", date(2012, 9, 17)),
    ] {
        let employee = queries::create_employee(
            &conn,
            &CreateEmployee {
                employee_id,
                name: name.to_string(),
                joining_date,
                relieving_date: None,
                organization_id: org.id,
            },
        )?;
        tracing::info!("Employee: {} (id: {})", employee.name, employee.employee_id);
    }

    tracing::info!("============================================");
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.print_schema {
        println!("{}", graphql::sdl());
        return;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orgql=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if config.dev_mode {
        tracing::info!("Running in DEVELOPMENT mode");
    }
    if config.uses_dev_secret() {
        tracing::warn!("JWT_SECRET not set, using the built-in dev secret");
    }

    let db_pool = create_pool(&config.database_path).expect("Failed to create database pool");
    {
        let conn = db_pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize database");
    }

    let state = AppState {
        db: db_pool,
        tokens: TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl_secs),
    };
    tracing::info!("Access tokens expire after {}s", state.tokens.ttl_secs());

    // One-shot account creation, then exit without serving
    if let (Some(username), Some(password)) = (&cli.create_user, &cli.password) {
        let conn = state.db.get().expect("Failed to get connection");
        let input = CreateUser {
            username: username.clone(),
            password: password.clone(),
        };
        match queries::create_user(&conn, &input) {
            Ok(user) => println!("Created user {} (id: {})", user.username, user.id),
            Err(e) => {
                eprintln!("Failed to create user: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if cli.seed {
        if !config.dev_mode {
            tracing::warn!("--seed flag ignored: not in dev mode (set ORGQL_ENV=dev)");
        } else if let Err(e) = seed_dev_data(&state) {
            tracing::error!("Failed to seed dev data: {}", e);
        }
    }

    if let Some(ref bootstrap) = config.bootstrap_user
        && let Err(e) = bootstrap_first_user(&state, &bootstrap.username, &bootstrap.password)
    {
        tracing::error!("Failed to create bootstrap user: {}", e);
    }

    if config.dev_mode {
        tracing::info!("GraphiQL explorer enabled: GET /graphql");
    }

    let app = handlers::router(state, config.dev_mode).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("orgql server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
