use sqlx::Transaction;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    cancellable, category::CategoryRepository, error::Result, genre::GenreRepository, ChosenDB,
    Pool,
};

/// One transaction shared by all repositories of a single operation.
///
/// Writes become visible only after [`UnitOfWork::commit`]; dropping the unit
/// of work without committing rolls the transaction back.
pub struct UnitOfWork {
    transaction: Transaction<'static, ChosenDB>,
    cancel: CancellationToken,
}

impl UnitOfWork {
    pub async fn begin(pool: &Pool, cancel: CancellationToken) -> Result<Self> {
        let transaction = cancellable(&cancel, pool.begin()).await?;
        Ok(UnitOfWork {
            transaction,
            cancel,
        })
    }

    pub fn categories(&mut self) -> CategoryRepository<'_> {
        CategoryRepository::new(&mut self.transaction, &self.cancel)
    }

    pub fn genres(&mut self) -> GenreRepository<'_> {
        GenreRepository::new(&mut self.transaction, &self.cancel)
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub async fn commit(self) -> Result<()> {
        let UnitOfWork {
            transaction,
            cancel,
        } = self;
        cancellable(&cancel, transaction.commit()).await?;
        debug!("Unit of work committed");
        Ok(())
    }

    pub async fn rollback(self) -> Result<()> {
        let UnitOfWork {
            transaction,
            cancel,
        } = self;
        cancellable(&cancel, transaction.rollback()).await
    }
}
