//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-statement business
//! operations inside one database transaction. Inside a transaction the
//! closure sees the same repository traits through a [`RepositoryScope`],
//! so services are written once and tests can substitute mocks.

use async_trait::async_trait;
use futures::future::BoxFuture;
use sea_orm::{AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait};
use std::future::Future;
use std::sync::Arc;

use super::repositories::{
    AddressRepository, AddressStore, CartRepository, CartStore, DistrictRepository, DistrictStore,
    ProductRepository, ProductStore, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Repositories visible inside a transaction.
pub trait RepositoryScope: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn addresses(&self) -> &dyn AddressRepository;
    fn carts(&self) -> &dyn CartRepository;
    fn products(&self) -> &dyn ProductRepository;
}

/// Unit of Work trait for dependency injection.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn addresses(&self) -> Arc<dyn AddressRepository>;
    fn carts(&self) -> Arc<dyn CartRepository>;
    fn products(&self) -> Arc<dyn ProductRepository>;
    fn districts(&self) -> Arc<dyn DistrictRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(&'a dyn RepositoryScope) -> BoxFuture<'a, AppResult<T>> + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext {
    users: UserStore<DatabaseTransaction>,
    addresses: AddressStore<DatabaseTransaction>,
    carts: CartStore<DatabaseTransaction>,
    products: ProductStore<DatabaseTransaction>,
}

impl TransactionContext {
    fn new(txn: Arc<DatabaseTransaction>) -> Self {
        Self {
            users: UserStore::new(txn.clone()),
            addresses: AddressStore::new(txn.clone()),
            carts: CartStore::new(txn.clone()),
            products: ProductStore::new(txn),
        }
    }
}

impl RepositoryScope for TransactionContext {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn addresses(&self) -> &dyn AddressRepository {
        &self.addresses
    }

    fn carts(&self) -> &dyn CartRepository {
        &self.carts
    }

    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }
}

/// Concrete implementation of UnitOfWork backed by a connection pool
pub struct Persistence {
    db: Arc<DatabaseConnection>,
    user_repo: Arc<UserStore<DatabaseConnection>>,
    address_repo: Arc<AddressStore<DatabaseConnection>>,
    cart_repo: Arc<CartStore<DatabaseConnection>>,
    product_repo: Arc<ProductStore<DatabaseConnection>>,
    district_repo: Arc<DistrictStore<DatabaseConnection>>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            address_repo: Arc::new(AddressStore::new(db.clone())),
            cart_repo: Arc::new(CartStore::new(db.clone())),
            product_repo: Arc::new(ProductStore::new(db.clone())),
            district_repo: Arc::new(DistrictStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn addresses(&self) -> Arc<dyn AddressRepository> {
        self.address_repo.clone()
    }

    fn carts(&self) -> Arc<dyn CartRepository> {
        self.cart_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    fn districts(&self) -> Arc<dyn DistrictRepository> {
        self.district_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(&'a dyn RepositoryScope) -> BoxFuture<'a, AppResult<T>> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await?;
        let txn = Arc::new(txn);

        let result = {
            let ctx = TransactionContext::new(txn.clone());
            f(&ctx).await
        };

        // The context (and every store holding the transaction) is gone now.
        let txn = Arc::try_unwrap(txn)
            .map_err(|_| AppError::internal("transaction still referenced after scope"))?;

        match result {
            Ok(value) => {
                txn.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Box a transaction body, pinning its output to `AppResult<T>`.
pub fn scoped<'a, T, Fut>(fut: Fut) -> BoxFuture<'a, AppResult<T>>
where
    Fut: Future<Output = AppResult<T>> + Send + 'a,
{
    Box::pin(fut)
}

/// Run a block inside `UnitOfWork::transaction` with less boilerplate.
///
/// The body may only capture owned values.
///
/// ```rust,ignore
/// with_transaction!(self.uow, |repos| {
///     repos.addresses().clear_default(uid).await
/// })
/// ```
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$repos:ident| $body:expr) => {
        $uow.transaction(|$repos| $crate::infra::unit_of_work::scoped(async move { $body }))
            .await
    };
}
