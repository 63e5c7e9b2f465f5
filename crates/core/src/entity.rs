//! Entity trait: identity carried by a server-assigned GUID.

use crate::id::Guid;

/// Entity marker + minimal interface.
///
/// Every resource the API returns is identified solely by its metadata GUID.
/// Values built client-side carry an empty GUID until the server assigns one.
pub trait Entity {
    /// Returns the entity identifier.
    fn guid(&self) -> &Guid;

    /// Whether the server has assigned an identity to this value.
    fn is_persisted(&self) -> bool {
        !self.guid().is_empty()
    }
}
