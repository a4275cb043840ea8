use crate::domain::{models::room_type::RoomType, ports::RoomTypeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresRoomTypeRepo {
    pool: PgPool,
}

impl PostgresRoomTypeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomTypeRepository for PostgresRoomTypeRepo {
    async fn create(&self, room_type: &RoomType) -> Result<RoomType, AppError> {
        sqlx::query_as::<_, RoomType>(
            "INSERT INTO room_types (id, name, price, hotel_id, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
            .bind(&room_type.id).bind(&room_type.name).bind(room_type.price)
            .bind(&room_type.hotel_id).bind(room_type.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RoomType>, AppError> {
        sqlx::query_as::<_, RoomType>("SELECT * FROM room_types WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<RoomType>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, RoomType>("SELECT * FROM room_types WHERE id = ANY($1)").bind(ids).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<RoomType>, AppError> {
        sqlx::query_as::<_, RoomType>("SELECT * FROM room_types ORDER BY hotel_id ASC, price ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_hotel(&self, hotel_id: &str) -> Result<Vec<RoomType>, AppError> {
        sqlx::query_as::<_, RoomType>("SELECT * FROM room_types WHERE hotel_id = $1 ORDER BY price ASC").bind(hotel_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, room_type: &RoomType) -> Result<RoomType, AppError> {
        sqlx::query_as::<_, RoomType>("UPDATE room_types SET name = $1, price = $2, hotel_id = $3 WHERE id = $4 RETURNING *")
            .bind(&room_type.name).bind(room_type.price).bind(&room_type.hotel_id).bind(&room_type.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Room type not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM room_types WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Room type not found".into())); }
        Ok(())
    }
}
