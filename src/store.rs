use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{NewMovie, Review},
    ranking::RankedMovie,
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All movies, best rated first. Unrated rows sort last in SQLite.
    pub async fn list_by_rating(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find()
            .order_by_desc(movie::Column::Rating)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, new: NewMovie) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            title: Set(Some(new.title)),
            year: Set(new.year),
            description: Set(new.description),
            img: Set(Some(new.img)),
            ..Default::default()
        };
        let movie = model.insert(&self.db).await?;
        debug!(id = movie.id, title = ?movie.title, "movie created");
        Ok(movie)
    }

    pub async fn get(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or_else(|| not_found(id))
    }

    pub async fn update_review(&self, id: i32, review: Review) -> AppResult<()> {
        let result = movie::Entity::update_many()
            .col_expr(movie::Column::Rating, Expr::value(Some(review.rating)))
            .col_expr(movie::Column::Review, Expr::value(review.review))
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        debug!(id = id, rating = review.rating, "movie reviewed");
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        debug!(id = id, "movie deleted");
        Ok(())
    }

    /// Persists computed ranks, touching only rows whose stored rank changed.
    pub async fn sync_rankings(&self, ranked: &[RankedMovie]) -> AppResult<usize> {
        let stale: Vec<&RankedMovie> =
            ranked.iter().filter(|r| r.movie.ranking != Some(r.rank)).collect();
        if stale.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;
        for r in &stale {
            movie::Entity::update_many()
                .col_expr(movie::Column::Ranking, Expr::value(r.rank))
                .filter(movie::Column::Id.eq(r.movie.id))
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        debug!(updated = stale.len(), "rankings synced");
        Ok(stale.len())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("movie {id}"))
}
