use thiserror::Error;

/// Bad user input, rejected before any store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("item name must not be empty")]
    EmptyName,

    #[error("quantity for {0:?} must be greater than zero")]
    ZeroQuantity(String),

    #[error("quantity for {0:?} is already at the maximum")]
    QuantityOverflow(String),
}

#[derive(Debug, Error)]
pub enum PantryError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PantryError {
    pub(crate) fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::StoreUnavailable(Box::new(err))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
