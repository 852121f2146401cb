//! Persona domain
//!
//! A persona is a first-person description that conditions the model's
//! answers. Three synthesis strategies exist (see [`entities::PersonaType`]);
//! the structured profiles behind the demographic and cognitive strategies
//! live in [`profile`].

pub mod entities;
pub mod profile;
