use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for StatsError {
    fn from(err: sqlx::Error) -> Self {
        StatsError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlx_errors_become_storage_errors() {
        let err: StatsError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StatsError::Storage(_)));
    }

    #[test]
    fn messages_carry_variant_prefix() {
        let err = StatsError::Validation("entry 0: player_name is empty".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: entry 0: player_name is empty"
        );
    }
}
