//! Partial update merge.

use us_model::UserRecord;

/// Computes the new state of `existing` after applying `partial`.
///
/// Mutable fields (`email`, `credential`) take the partial value when it is
/// present and keep the existing value otherwise. `id` and `age` always come
/// from `existing`. A credential in `partial` must already be encoded.
#[must_use]
pub fn merge(existing: UserRecord, partial: UserRecord) -> UserRecord {
    UserRecord {
        id: existing.id,
        email: partial.email.or(existing.email),
        credential: partial.credential.or(existing.credential),
        age: existing.age,
    }
}
