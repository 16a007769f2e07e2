//! User domain
//!
//! This module provides domain types and traits for user records,
//! including the entity and its projections, validation, and the
//! repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId, UserProfile, UserUpdate};
pub use repository::UserRepository;
pub use validation::{
    FieldError, FieldRules, Presence, Rule, UserValidator, ValidationErrors, EMAIL_RULES,
    PASSWORD_RULES, USERNAME_RULES,
};

#[cfg(test)]
pub use repository::mock::FailingUserRepository;
