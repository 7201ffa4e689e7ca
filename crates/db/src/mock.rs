//! Mock repositories for testing code that depends on the repository traits.

pub use crate::repositories::{
    owner::MockOwnerRepository, pet::MockPetRepository, vet::MockVetRepository,
    visit::MockVisitRepository,
};
