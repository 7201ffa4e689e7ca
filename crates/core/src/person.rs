//! # Person Identity
//!
//! Owners and vets are identified to users by their full name. The helpers
//! here detect name collisions when such a record is created or renamed.

/// A record identified by a first and last name.
pub trait Named {
    fn first_name(&self) -> Option<&str>;
    fn last_name(&self) -> Option<&str>;
}

fn same_name(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

fn same_full_name<A, B>(a: &A, b: &B) -> bool
where
    A: Named + ?Sized,
    B: Named + ?Sized,
{
    same_name(a.first_name(), b.first_name()) && same_name(a.last_name(), b.last_name())
}

/// Returns true when `candidate`'s full name is already used by a record in
/// `existing`, ignoring case.
///
/// When `updating` is given, every existing record sharing its current full
/// name is left out of the comparison so a record never collides with itself.
/// The check only looks at names: two different people with the same name
/// are treated as the same identity.
///
/// # Example
///
/// ```
/// use petclinic_core::person::{exists_with_full_name, Named};
///
/// struct Name(&'static str, &'static str);
///
/// impl Named for Name {
///     fn first_name(&self) -> Option<&str> { Some(self.0) }
///     fn last_name(&self) -> Option<&str> { Some(self.1) }
/// }
///
/// let existing = [Name("Max", "Mahler"), Name("Lysundra", "Lee")];
/// assert!(exists_with_full_name(&Name("lysundra", "LEE"), None::<&Name>, &existing));
/// ```
pub fn exists_with_full_name<C, U, P>(candidate: &C, updating: Option<&U>, existing: &[P]) -> bool
where
    C: Named + ?Sized,
    U: Named + ?Sized,
    P: Named,
{
    existing
        .iter()
        .filter(|person| updating.is_none_or(|original| !same_full_name(*person, original)))
        .any(|person| same_full_name(candidate, person))
}
