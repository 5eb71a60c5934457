//! Scoped store transactions for application services

use tracing::warn;

use crate::domain::PostTx;
use crate::shared::AppResult;

/// Close `tx` according to `outcome`: commit on success, roll back on error.
///
/// A failed commit replaces the successful outcome. A failed rollback is only
/// logged so the caller still sees the error that caused it. Any transaction
/// that never reaches this function is rolled back by the store when dropped.
pub async fn finish<T>(tx: Box<dyn PostTx>, outcome: AppResult<T>) -> AppResult<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback failed after '{}': {}", err, rollback_err);
            }
            Err(err)
        }
    }
}
