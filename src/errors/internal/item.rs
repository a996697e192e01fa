use thiserror::Error;

use super::{ErrorKind, InternalError};

#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Item not found: {id}")]
    NotFound { id: String },

    #[error("Item {id} belongs to another user")]
    Forbidden { id: String },

    #[error("Item {id} is already sold out")]
    AlreadySoldOut { id: String },

    #[error("Item {id} was modified concurrently")]
    ConcurrentModification { id: String },
}

impl ItemError {
    pub fn not_found(id: &str) -> InternalError {
        InternalError::Item(Self::NotFound { id: id.to_string() })
    }

    pub fn forbidden(id: &str) -> InternalError {
        InternalError::Item(Self::Forbidden { id: id.to_string() })
    }

    pub fn already_sold_out(id: &str) -> InternalError {
        InternalError::Item(Self::AlreadySoldOut { id: id.to_string() })
    }

    pub fn concurrent_modification(id: &str) -> InternalError {
        InternalError::Item(Self::ConcurrentModification { id: id.to_string() })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ItemError::NotFound { .. } => ErrorKind::NotFound,
            ItemError::Forbidden { .. } => ErrorKind::Forbidden,
            ItemError::AlreadySoldOut { .. } | ItemError::ConcurrentModification { .. } => {
                ErrorKind::Conflict
            }
        }
    }
}
