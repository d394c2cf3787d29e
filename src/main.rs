use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use content_hub::{
    api::{
        create_router,
        middleware::operator_guard::{OperatorGuard, OperatorGuardConfig},
        router::AppState,
    },
    application::{
        ports::{ActivityRepository, CategoryRepository, FileStore, InformationRepository},
        use_cases::{
            CreateActivityUseCase, CreateCategoryUseCase, CreateInformationUseCase,
            DeleteActivityUseCase, DeleteInformationUseCase, DownloadFileUseCase,
            GetActivityUseCase, GetInformationUseCase, ListActivitiesUseCase,
            ListCategoriesUseCase, ListInformationUseCase, UpdateActivityUseCase,
            UpdateInformationUseCase,
        },
    },
    infrastructure::{
        audit::TracingAuditSink,
        persistence::{
            PostgresActivityRepository, PostgresCategoryRepository,
            PostgresInformationRepository,
        },
        storage::LocalFileStore,
    },
    Config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with structured logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .init();

    info!("Starting ContentHub service");

    // Load configuration
    let config = Config::from_env();
    config.validate()?;
    info!("Configuration loaded and validated");

    // Initialize database connection pool
    info!("Connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            e
        })?;

    // Run database migrations
    info!("Running database migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            e
        })?;

    // Initialize infrastructure layer
    let information_repo: Arc<dyn InformationRepository> =
        Arc::new(PostgresInformationRepository::new(pool.clone()));
    let activity_repo: Arc<dyn ActivityRepository> =
        Arc::new(PostgresActivityRepository::new(pool.clone()));
    let category_repo: Arc<dyn CategoryRepository> =
        Arc::new(PostgresCategoryRepository::new(pool.clone()));

    let file_store = Arc::new(LocalFileStore::new(config.storage_root.clone()));
    file_store.init().await?;
    let file_store: Arc<dyn FileStore> = file_store;

    info!("Infrastructure layer initialized");

    // Initialize use cases (application layer)
    let state = AppState {
        pool: Arc::new(pool.clone()),
        create_information: Arc::new(CreateInformationUseCase::new(
            Arc::clone(&information_repo),
            Arc::clone(&category_repo),
            Arc::clone(&file_store),
        )),
        get_information: Arc::new(GetInformationUseCase::new(Arc::clone(&information_repo))),
        list_information: Arc::new(ListInformationUseCase::new(Arc::clone(&information_repo))),
        update_information: Arc::new(UpdateInformationUseCase::new(
            Arc::clone(&information_repo),
            Arc::clone(&category_repo),
            Arc::clone(&file_store),
        )),
        delete_information: Arc::new(DeleteInformationUseCase::new(
            Arc::clone(&information_repo),
            Arc::clone(&file_store),
        )),
        create_activity: Arc::new(CreateActivityUseCase::new(
            Arc::clone(&activity_repo),
            Arc::clone(&category_repo),
            Arc::clone(&file_store),
        )),
        get_activity: Arc::new(GetActivityUseCase::new(Arc::clone(&activity_repo))),
        list_activities: Arc::new(ListActivitiesUseCase::new(Arc::clone(&activity_repo))),
        update_activity: Arc::new(UpdateActivityUseCase::new(
            Arc::clone(&activity_repo),
            Arc::clone(&category_repo),
            Arc::clone(&file_store),
        )),
        delete_activity: Arc::new(DeleteActivityUseCase::new(
            Arc::clone(&activity_repo),
            Arc::clone(&file_store),
        )),
        list_categories: Arc::new(ListCategoriesUseCase::new(Arc::clone(&category_repo))),
        create_category: Arc::new(CreateCategoryUseCase::new(Arc::clone(&category_repo))),
        download_file: Arc::new(DownloadFileUseCase::new(Arc::clone(&file_store))),
    };

    info!("Application layer initialized");

    // Operator guard with the configured policy
    let guard_config = OperatorGuardConfig::default()
        .with_policy(config.sanitization_policy())
        .with_max_body_bytes(config.max_json_body_bytes);
    let guard = OperatorGuard::new(guard_config, Arc::new(TracingAuditSink));

    // Create router
    let app = create_router(state, guard);

    // Start server
    info!("Listening on {}", config.listen_addr);
    let listener = TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
