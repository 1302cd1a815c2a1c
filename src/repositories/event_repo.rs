//! Event repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, DatabaseErrorConverter};
use crate::models::{Event, NewEvent};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, new_event: NewEvent) -> Result<Event, AppError>;
}

#[derive(Clone)]
pub struct PgEventRepository {
    pool: AsyncDbPool,
}

impl PgEventRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, new_event: NewEvent) -> Result<Event, AppError> {
        use crate::schema::events::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(events)
            .values(&new_event)
            .returning(Event::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "create event"))
    }
}
