use hotel_booking_backend::{
    api::router::create_router,
    config::Config,
    domain::models::user::User,
    domain::ports::Clock,
    infra::factory::{assemble_state, Repositories},
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;
use chrono::{DateTime, Days, Duration, NaiveDate, SubsecRound, Utc};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};

/// A clock that only moves when a test tells it to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub clock: Arc<ManualClock>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(StdDuration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            admin_email: None,
            admin_password: None,
        };

        let clock = Arc::new(ManualClock::new(Utc::now().trunc_subsecs(3)));
        let state = Arc::new(assemble_state(&config, Repositories::sqlite(pool.clone()), clock.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            clock,
        }
    }

    pub fn clock_date(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    /// A `YYYY-MM-DD` date `days` after the test clock's current day.
    pub fn date_in(&self, days: u64) -> String {
        (self.clock_date() + Days::new(days)).format("%Y-%m-%d").to_string()
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> StatusCode {
        let (status, _) = self.request("POST", "/api/auth/register", None, Some(json!({
            "name": name, "email": email, "password": password
        }))).await;
        status
    }

    pub async fn signup_and_login(&self, email: &str) -> AuthHeaders {
        let status = self.register("Guest", email, "guest-pass-123").await;
        assert_eq!(status, StatusCode::CREATED, "registration failed for {}", email);
        self.login(email, "guest-pass-123").await
    }

    pub async fn admin(&self) -> AuthHeaders {
        let email = format!("admin-{}@hotel.test", Uuid::new_v4());
        let hash = self.state.auth_service.hash_password("admin-pass-123").unwrap();
        let admin = User::new_admin("Admin".to_string(), email.clone(), hash);
        self.state.user_repo.create(&admin).await.unwrap();
        self.login(&email, "admin-pass-123").await
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthHeaders {
        let payload = json!({ "email": email, "password": password });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start + end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, auth: Option<&AuthHeaders>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token);
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    /// Creates a hotel priced at `hotel_price` with one room type priced at `room_price`.
    pub async fn seed_catalog(&self, admin: &AuthHeaders, hotel_price: f64, room_price: f64) -> (String, String) {
        let (status, hotel) = self.request("POST", "/api/hotels", Some(admin), Some(json!({
            "name": "Seaside Inn",
            "location": "Lisbon",
            "description": "By the water",
            "price": hotel_price,
            "image": "https://img.example/seaside.jpg"
        }))).await;
        assert_eq!(status, StatusCode::CREATED);
        let hotel_id = hotel["id"].as_str().unwrap().to_string();

        let (status, room) = self.request("POST", "/api/roomtypes", Some(admin), Some(json!({
            "name": "Deluxe",
            "price": room_price,
            "hotel_id": hotel_id
        }))).await;
        assert_eq!(status, StatusCode::CREATED);
        let room_type_id = room["id"].as_str().unwrap().to_string();

        (hotel_id, room_type_id)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
