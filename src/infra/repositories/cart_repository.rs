//! Cart repository.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;

use super::entities::cart::{self, ActiveModel, Entity as CartEntity};
use super::entities::product::{self, Entity as ProductEntity};
use super::user_repository::insert_error;
use crate::domain::{CartDraft, CartItem, CartView, Product};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cart repository trait.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn find_by_uid_and_pid(&self, uid: i32, pid: i32) -> AppResult<Option<CartItem>>;

    async fn find_by_cid(&self, cid: i32) -> AppResult<Option<CartItem>>;

    /// Insert a row, or add `draft.num` to the existing `(uid, pid)` row.
    ///
    /// The price captured by the first insert is kept.
    async fn upsert(&self, draft: CartDraft) -> AppResult<CartItem>;

    /// Add `delta` to the quantity in place; `None` when the row is gone
    async fn add_num(&self, cid: i32, delta: i32, modified_user: String)
        -> AppResult<Option<CartItem>>;

    /// Cart rows of a user joined with their products, newest first
    async fn list_views_by_uid(&self, uid: i32) -> AppResult<Vec<CartView>>;

    /// Cart rows with the given ids joined with their products, newest first
    async fn list_views_by_cids(&self, cids: Vec<i32>) -> AppResult<Vec<CartView>>;

    async fn delete_by_cid(&self, cid: i32) -> AppResult<u64>;
}

/// SeaORM implementation of [`CartRepository`]
pub struct CartStore<C> {
    conn: Arc<C>,
}

impl<C> CartStore<C> {
    pub fn new(conn: Arc<C>) -> Self {
        Self { conn }
    }
}

/// Rows whose product has been removed from the catalogue are dropped.
fn into_views(rows: Vec<(cart::Model, Option<product::Model>)>) -> Vec<CartView> {
    rows.into_iter()
        .filter_map(|(cart, product)| {
            product.map(|p| CartView::new(CartItem::from(cart), Product::from(p)))
        })
        .collect()
}

#[async_trait]
impl<C> CartRepository for CartStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_uid_and_pid(&self, uid: i32, pid: i32) -> AppResult<Option<CartItem>> {
        let result = CartEntity::find()
            .filter(cart::Column::Uid.eq(uid))
            .filter(cart::Column::Pid.eq(pid))
            .one(self.conn.as_ref())
            .await?;

        Ok(result.map(CartItem::from))
    }

    async fn find_by_cid(&self, cid: i32) -> AppResult<Option<CartItem>> {
        let result = CartEntity::find_by_id(cid).one(self.conn.as_ref()).await?;

        Ok(result.map(CartItem::from))
    }

    async fn upsert(&self, draft: CartDraft) -> AppResult<CartItem> {
        let now = chrono::Utc::now();
        let on_conflict = OnConflict::columns([cart::Column::Uid, cart::Column::Pid])
            .values([
                (
                    cart::Column::Num,
                    Expr::col((CartEntity, cart::Column::Num)).add(draft.num),
                ),
                (
                    cart::Column::ModifiedUser,
                    Expr::value(draft.username.clone()),
                ),
                (cart::Column::ModifiedTime, Expr::value(now)),
            ])
            .to_owned();

        let active_model = ActiveModel {
            uid: Set(draft.uid),
            pid: Set(draft.pid),
            price: Set(draft.price),
            num: Set(draft.num),
            created_user: Set(draft.username.clone()),
            created_time: Set(now),
            modified_user: Set(draft.username),
            modified_time: Set(now),
            ..Default::default()
        };

        let model = CartEntity::insert(active_model)
            .on_conflict(on_conflict)
            .exec_with_returning(self.conn.as_ref())
            .await
            .map_err(insert_error)?;

        Ok(CartItem::from(model))
    }

    async fn add_num(
        &self,
        cid: i32,
        delta: i32,
        modified_user: String,
    ) -> AppResult<Option<CartItem>> {
        let models = CartEntity::update_many()
            .col_expr(
                cart::Column::Num,
                Expr::col((CartEntity, cart::Column::Num)).add(delta),
            )
            .col_expr(cart::Column::ModifiedUser, Expr::value(modified_user))
            .col_expr(cart::Column::ModifiedTime, Expr::value(chrono::Utc::now()))
            .filter(cart::Column::Cid.eq(cid))
            .exec_with_returning(self.conn.as_ref())
            .await?;

        Ok(models.into_iter().next().map(CartItem::from))
    }

    async fn list_views_by_uid(&self, uid: i32) -> AppResult<Vec<CartView>> {
        let rows = CartEntity::find()
            .find_also_related(ProductEntity)
            .filter(cart::Column::Uid.eq(uid))
            .order_by_desc(cart::Column::CreatedTime)
            .all(self.conn.as_ref())
            .await?;

        Ok(into_views(rows))
    }

    async fn list_views_by_cids(&self, cids: Vec<i32>) -> AppResult<Vec<CartView>> {
        if cids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = CartEntity::find()
            .find_also_related(ProductEntity)
            .filter(cart::Column::Cid.is_in(cids))
            .order_by_desc(cart::Column::CreatedTime)
            .all(self.conn.as_ref())
            .await?;

        Ok(into_views(rows))
    }

    async fn delete_by_cid(&self, cid: i32) -> AppResult<u64> {
        let result = CartEntity::delete_by_id(cid)
            .exec(self.conn.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Transaction};

    fn row(cid: i32, num: i32) -> cart::Model {
        let now = Utc::now();
        cart::Model {
            cid,
            uid: 7,
            pid: 3,
            price: 600,
            num,
            created_user: "tom".to_string(),
            created_time: now,
            modified_user: "tom".to_string(),
            modified_time: now,
        }
    }

    fn logged_sql(conn: Arc<DatabaseConnection>) -> String {
        let log: Vec<Transaction> = Arc::try_unwrap(conn)
            .expect("store dropped")
            .into_transaction_log();
        format!("{:?}", log).replace("\\\"", "\"")
    }

    #[tokio::test]
    async fn test_upsert_merges_on_uid_and_pid() {
        let conn = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![row(40, 5)]])
                .into_connection(),
        );
        let store = CartStore::new(conn.clone());

        let item = store
            .upsert(CartDraft {
                uid: 7,
                pid: 3,
                price: 600,
                num: 2,
                username: "tom".to_string(),
            })
            .await
            .unwrap();
        drop(store);

        assert_eq!(item.num, 5);
        let sql = logged_sql(conn);
        assert!(sql.contains(r#"ON CONFLICT ("uid", "pid") DO UPDATE SET"#), "{sql}");
        assert!(sql.contains(r#""num" = "t_cart"."num" + "#), "{sql}");
        assert!(!sql.contains(r#""price" = "excluded"."price""#), "{sql}");
    }

    #[tokio::test]
    async fn test_add_num_is_relative() {
        let conn = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![row(40, 5)]])
                .into_connection(),
        );
        let store = CartStore::new(conn.clone());

        let item = store.add_num(40, 1, "tom".to_string()).await.unwrap();
        drop(store);

        assert_eq!(item.map(|i| i.num), Some(5));
        let sql = logged_sql(conn);
        assert!(sql.contains(r#"SET "num" = "t_cart"."num" + "#), "{sql}");
        assert!(sql.contains("RETURNING"), "{sql}");
    }

    #[tokio::test]
    async fn test_add_num_on_missing_row() {
        let conn = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<cart::Model>::new()])
                .into_connection(),
        );
        let store = CartStore::new(conn);

        let item = store.add_num(41, 1, "tom".to_string()).await.unwrap();

        assert!(item.is_none());
    }
}
