use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use networth_core::assets::{Asset, AssetRepositoryTrait, NewAsset};
use networth_core::Result;

use super::model::AssetDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::assets;

/// Repository for managing asset data in the database
pub struct AssetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AssetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AssetRepositoryTrait for AssetRepository {
    fn get_by_id(&self, asset_id: &str) -> Result<Asset> {
        let mut conn = get_connection(&self.pool)?;

        let result = assets::table
            .select(AssetDB::as_select())
            .find(asset_id)
            .first::<AssetDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(result.into())
    }

    fn get_by_ticker(&self, ticker: &str) -> Result<Option<Asset>> {
        let mut conn = get_connection(&self.pool)?;

        let result = assets::table
            .select(AssetDB::as_select())
            .filter(assets::ticker.eq(ticker))
            .first::<AssetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(result.map(Asset::from))
    }

    fn list(&self) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;

        let results = assets::table
            .select(AssetDB::as_select())
            .order((assets::category.asc(), assets::name.asc()))
            .load::<AssetDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Asset::from).collect())
    }

    fn list_by_ids(&self, asset_ids: &[String]) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;

        let results = assets::table
            .select(AssetDB::as_select())
            .filter(assets::id.eq_any(asset_ids))
            .load::<AssetDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Asset::from).collect())
    }

    /// Inserts the asset or, when the ticker already exists, refreshes its
    /// name, category and price.
    async fn upsert(&self, new_asset: NewAsset) -> Result<Asset> {
        new_asset.validate()?;
        let asset_db: AssetDB = new_asset.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                let updated = diesel::update(assets::table)
                    .filter(assets::ticker.eq(&asset_db.ticker))
                    .set((
                        assets::name.eq(&asset_db.name),
                        assets::category.eq(&asset_db.category),
                        assets::current_price.eq(&asset_db.current_price),
                        assets::last_updated.eq(&asset_db.last_updated),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                if updated == 0 {
                    diesel::insert_into(assets::table)
                        .values(&asset_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                let result_db = assets::table
                    .select(AssetDB::as_select())
                    .filter(assets::ticker.eq(&asset_db.ticker))
                    .first::<AssetDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db.into())
            })
            .await
    }

    async fn update_price(
        &self,
        ticker: &str,
        price: Decimal,
        as_of: NaiveDateTime,
    ) -> Result<()> {
        let ticker = ticker.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(assets::table)
                    .filter(assets::ticker.eq(&ticker))
                    .set((
                        assets::current_price.eq(price.to_string()),
                        assets::last_updated.eq(as_of),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
