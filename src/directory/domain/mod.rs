//! Domain model for the user directory.
//!
//! The directory domain models invitation-based registration, the admin
//! role flag, and the three task membership sets while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod user;

pub use error::UserDomainError;
pub use ids::{EmailAddress, EmployeeId, JoiningId, UserId};
pub use user::{PersistedUserData, Registration, TaskSlot, User};
