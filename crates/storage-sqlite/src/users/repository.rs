use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use networth_core::users::{User, UserRepositoryTrait};
use networth_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;

/// Repository for managing user rows in the database
pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn first_user(&self) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let result = users::table
            .select(UserDB::as_select())
            .order(users::created_at.asc())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(result.map(User::from))
    }

    async fn ensure_default(&self, username: &str) -> Result<User> {
        let username = username.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let existing = users::table
                    .select(UserDB::as_select())
                    .order(users::created_at.asc())
                    .first::<UserDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                if let Some(user) = existing {
                    return Ok(user.into());
                }

                let user_db = UserDB {
                    id: uuid::Uuid::new_v4().to_string(),
                    username,
                    created_at: chrono::Utc::now().naive_utc(),
                };
                let result_db = diesel::insert_into(users::table)
                    .values(&user_db)
                    .get_result::<UserDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db.into())
            })
            .await
    }
}
