//! Owner-only authorization for mutating operations.

use crate::error::DomainError;

/// Allow a mutation only when the caller is the recorded owner.
///
/// Pure decision: `Ok(())` iff the ids match, `DomainError::Forbidden`
/// otherwise. Callers run this after loading the resource and before
/// touching the store.
pub fn require_owner(owner_id: i32, caller_id: i32) -> Result<(), DomainError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_allowed() {
        assert!(require_owner(5, 5).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        assert!(matches!(require_owner(5, 7), Err(DomainError::Forbidden)));
    }
}
