use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::models::user::User;
use crate::domain::ports::{BookingRepository, Clock, HotelRepository, RoomTypeRepository, UserRepository};
use crate::domain::services::{auth_service::AuthService, booking_service::BookingService};
use crate::error::AppError;
use crate::infra::clock::SystemClock;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_hotel_repo::PostgresHotelRepo,
    postgres_room_type_repo::PostgresRoomTypeRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_hotel_repo::SqliteHotelRepo,
    sqlite_room_type_repo::SqliteRoomTypeRepo, sqlite_user_repo::SqliteUserRepo,
};

pub struct Repositories {
    pub hotel_repo: Arc<dyn HotelRepository>,
    pub room_type_repo: Arc<dyn RoomTypeRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub user_repo: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn sqlite(pool: SqlitePool) -> Self {
        Self {
            hotel_repo: Arc::new(SqliteHotelRepo::new(pool.clone())),
            room_type_repo: Arc::new(SqliteRoomTypeRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            user_repo: Arc::new(SqliteUserRepo::new(pool)),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            hotel_repo: Arc::new(PostgresHotelRepo::new(pool.clone())),
            room_type_repo: Arc::new(PostgresRoomTypeRepo::new(pool.clone())),
            booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
            user_repo: Arc::new(PostgresUserRepo::new(pool)),
        }
    }
}

/// Wires services on top of the given repositories and clock.
pub fn assemble_state(config: &Config, repos: Repositories, clock: Arc<dyn Clock>) -> AppState {
    let auth_service = Arc::new(AuthService::new(config));
    let booking_service = Arc::new(BookingService::new(
        repos.hotel_repo.clone(),
        repos.room_type_repo.clone(),
        repos.booking_repo,
        clock,
    ));

    AppState {
        config: config.clone(),
        hotel_repo: repos.hotel_repo,
        room_type_repo: repos.room_type_repo,
        user_repo: repos.user_repo,
        auth_service,
        booking_service,
    }
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let repos = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;
        Repositories::postgres(pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;
        Repositories::sqlite(pool)
    };

    let state = assemble_state(config, repos, Arc::new(SystemClock));

    if let Err(e) = seed_admin(&state).await {
        warn!("Admin seeding failed: {}", e);
    }

    state
}

/// Creates the configured admin account if it does not exist yet.
pub async fn seed_admin(state: &AppState) -> Result<(), AppError> {
    let (Some(email), Some(password)) = (&state.config.admin_email, &state.config.admin_password) else {
        return Ok(());
    };

    if state.user_repo.find_by_email(email).await?.is_some() {
        return Ok(());
    }

    let password_hash = state.auth_service.hash_password(password)?;
    let admin = User::new_admin("Administrator".to_string(), email.clone(), password_hash);
    state.user_repo.create(&admin).await?;
    info!("Seeded admin account {}", email);
    Ok(())
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
