pub mod health;
pub mod owner;
pub mod pet;
pub mod vet;
pub mod visit;
