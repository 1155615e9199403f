//! Consistency checks over a users configuration.

mod ids_validator;

pub use ids_validator::IdsValidator;
