use crate::error::Result;

/// Issues record identifiers.
///
/// Urls and clicks draw from the same sequence, so an id is unique across
/// both tables.
pub trait IdAllocator: Send + Sync + 'static {
    /// Returns the next identifier.
    ///
    /// Implementations must persist the advanced counter before returning it,
    /// so a crash between allocation and use can never hand out the same id
    /// twice. Values are strictly increasing for the lifetime of the store.
    fn next_id(&self) -> Result<u64>;
}
