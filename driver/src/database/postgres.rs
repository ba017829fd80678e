use std::ops::{Deref, DerefMut};

use error_stack::Report;
use sqlx::migrate::Migrator;
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{book::*, loan::*};

mod book;
mod loan;

static POSTGRES_URL: &str = "POSTGRES_URL";


#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        tracing::debug!("connected to postgres");
        Ok(Self { pool })
    }

    /// Schema for the catalog service's database.
    pub async fn migrate_books(&self) -> error_stack::Result<(), KernelError> {
        self.migrate(sqlx::migrate!("./migrations/book")).await
    }

    /// Schema for the ledger service's database.
    pub async fn migrate_loans(&self) -> error_stack::Result<(), KernelError> {
        self.migrate(sqlx::migrate!("./migrations/loan")).await
    }

    /// Both schemas may share one database, each recording only its own
    /// versions, so versions applied by the other set are not an error.
    async fn migrate(&self, mut migrator: Migrator) -> error_stack::Result<(), KernelError> {
        migrator.set_ignore_missing(true);
        migrator.run(&self.pool).await.convert_error()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let con = self.pool.begin().await.convert_error()?;
        Ok(PostgresConnection(con))
    }
}

/// Open database transaction. Rolled back by sqlx when dropped uncommitted.
pub struct PostgresConnection(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresConnection {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}

impl DerefMut for PostgresConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.deref_mut()
    }
}

impl<T: 'static + Sync + Send> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(db) if db.is_unique_violation() => KernelError::Conflict,
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

impl<T: 'static + Sync + Send> ConvertError for Result<T, sqlx::migrate::MigrateError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}
