//! Orchestration services for the user directory.

mod registration;

pub use registration::{
    DefaultSuffixSource, RegistrationError, RegistrationResult, RegistrationService,
    SignupRequest, SuffixSource,
};
