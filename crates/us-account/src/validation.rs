//! Constraint engine.
//!
//! Validation is driven by a table of [`Constraint`]s, each naming the field
//! it reports against, the [`Rule`] to check and the modes it applies in.
//! [`ConstraintEngine::validate`] walks the whole table for the requested
//! [`ValidationMode`] and collects every violation; it never stops at the
//! first failure.

use us_model::{UserRecord, ValidationError};
use us_storage::{StorageResult, UserRepository};

/// Message for a malformed email address.
pub const MALFORMED_EMAIL_MESSAGE: &str = "must be a well-formed email address";

/// Message for an email that already belongs to a stored record.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already exists!";

/// Message for an attempt to change a read-only field.
pub const READ_ONLY_MESSAGE: &str = "Field cannot be updated";

/// Selects which constraints apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// A new record is being created.
    Create,
    /// An existing record is being partially updated.
    Patch,
}

/// A payload field a constraint can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The `email` field.
    Email,
    /// The secret. Reported to clients as `password`.
    Credential,
    /// The `age` field.
    Age,
}

impl Field {
    /// Returns the client-facing field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Credential => "password",
            Self::Age => "age",
        }
    }

    /// Returns `true` if the payload carries a value for this field.
    #[must_use]
    pub const fn is_set(self, payload: &UserRecord) -> bool {
        match self {
            Self::Email => payload.email.is_some(),
            Self::Credential => payload.credential.is_some(),
            Self::Age => payload.age.is_some(),
        }
    }

    fn text(self, payload: &UserRecord) -> Option<&str> {
        match self {
            Self::Email => payload.email.as_deref(),
            Self::Credential => payload.credential.as_deref(),
            Self::Age => None,
        }
    }
}

/// The predicate a constraint evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The field, if present, is a syntactically valid email address.
    WellFormedEmail,
    /// The payload's email, if present, is not used by any stored record.
    ///
    /// This is the only rule that performs I/O.
    UniqueEmail,
    /// The field must be absent.
    ReadOnly,
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    /// Field reported in the resulting [`ValidationError`].
    pub field: Field,
    /// Predicate to evaluate.
    pub rule: Rule,
    /// Modes in which the constraint is evaluated.
    pub modes: &'static [ValidationMode],
    /// Message reported on violation.
    pub message: &'static str,
}

impl Constraint {
    /// Returns `true` if the constraint is evaluated in `mode`.
    #[must_use]
    pub fn applies_to(&self, mode: ValidationMode) -> bool {
        self.modes.contains(&mode)
    }
}

const BOTH_MODES: &[ValidationMode] = &[ValidationMode::Create, ValidationMode::Patch];
const PATCH_ONLY: &[ValidationMode] = &[ValidationMode::Patch];

/// The user rule table, in evaluation order.
pub const USER_CONSTRAINTS: &[Constraint] = &[
    Constraint {
        field: Field::Email,
        rule: Rule::WellFormedEmail,
        modes: BOTH_MODES,
        message: MALFORMED_EMAIL_MESSAGE,
    },
    Constraint {
        field: Field::Email,
        rule: Rule::UniqueEmail,
        modes: BOTH_MODES,
        message: DUPLICATE_EMAIL_MESSAGE,
    },
    Constraint {
        field: Field::Age,
        rule: Rule::ReadOnly,
        modes: PATCH_ONLY,
        message: READ_ONLY_MESSAGE,
    },
];

/// Evaluates a rule table against user payloads.
///
/// Constructed once at startup and shared by the account service.
#[derive(Debug, Clone)]
pub struct ConstraintEngine {
    constraints: Vec<Constraint>,
}

impl Default for ConstraintEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintEngine {
    /// Creates an engine over [`USER_CONSTRAINTS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_constraints(USER_CONSTRAINTS.to_vec())
    }

    /// Creates an engine over a custom rule table.
    #[must_use]
    pub const fn with_constraints(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }

    /// Returns the rule table.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Validates `payload` under `mode`.
    ///
    /// Returns every violation in table order; an empty list means the
    /// payload is acceptable.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the uniqueness lookup fails.
    pub async fn validate<U>(
        &self,
        repository: &U,
        payload: &UserRecord,
        mode: ValidationMode,
    ) -> StorageResult<Vec<ValidationError>>
    where
        U: UserRepository + ?Sized,
    {
        let mut errors = Vec::new();

        for constraint in self.constraints.iter().filter(|c| c.applies_to(mode)) {
            if !check(constraint, repository, payload).await? {
                errors.push(ValidationError::new(
                    constraint.field.as_str(),
                    constraint.message,
                ));
            }
        }

        Ok(errors)
    }
}

async fn check<U>(
    constraint: &Constraint,
    repository: &U,
    payload: &UserRecord,
) -> StorageResult<bool>
where
    U: UserRepository + ?Sized,
{
    match constraint.rule {
        Rule::WellFormedEmail => {
            if !constraint.field.is_set(payload) {
                return Ok(true);
            }
            Ok(constraint
                .field
                .text(payload)
                .is_some_and(is_well_formed_email))
        }
        Rule::UniqueEmail => match payload.email.as_deref() {
            Some(email) => Ok(repository.find_by_email(email).await?.is_none()),
            None => Ok(true),
        },
        Rule::ReadOnly => Ok(!constraint.field.is_set(payload)),
    }
}

/// Checks email syntax: `local@domain`.
///
/// The local part is dot-separated atoms of letters, digits and the RFC 5322
/// `atext` symbols. The domain is dot-separated labels of letters, digits and
/// inner hyphens; a single label (e.g. `localhost`) is accepted.
///
/// Stricter than Hibernate's `@Email`: the empty string and IP-literal
/// domains such as `user@[10.0.0.1]` are rejected.
#[must_use]
pub fn is_well_formed_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.len() > 64 || domain.len() > 255 {
        return false;
    }

    let local_ok = local
        .split('.')
        .all(|atom| !atom.is_empty() && atom.chars().all(is_atext));

    let domain_ok = domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    local_ok && domain_ok
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~-".contains(c)
}
