use std::{borrow::Cow, fmt};

/// Marker trait for events submitted to a [`MockStore`](crate::MockStore).
///
/// Implement this for your event type (usually an enum, one variant per
/// kind). Events must be `Send + Sync + Clone + 'static` because they:
/// - Are shared between the store handle and the thunks it runs (Sync)
/// - Cross task boundaries when a thunk is spawned (Send, 'static)
/// - Are handed back to the caller of `dispatch` and kept in the record (Clone)
///
/// `Debug` is required so that sequence mismatches can be reported.
///
/// # Kinds
///
/// `kind()` is the event discriminator, the string a reducer switches on
/// (e.g. `"LOGIN_REQUEST"`). The variant's fields are the kind's payload, so
/// every kind has a fixed payload schema.
///
/// When using `#[derive(Event)]` on an enum, `kind()` returns the variant
/// name in `SCREAMING_SNAKE_CASE`.
pub trait Event: Send + Sync + Clone + fmt::Debug + 'static {
    /// Returns the discriminator of this event.
    ///
    /// The default implementation returns the type name via `std::any::type_name`.
    fn kind(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}
