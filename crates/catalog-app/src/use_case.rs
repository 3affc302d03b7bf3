use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// One application operation. Each call runs in its own unit of work and
/// commits only when it succeeds.
#[allow(async_fn_in_trait)]
pub trait UseCase {
    type Input;
    type Output;

    async fn handle(&self, input: Self::Input, cancel: CancellationToken) -> Result<Self::Output>;
}
