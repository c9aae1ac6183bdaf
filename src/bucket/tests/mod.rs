//! Unit tests for the bucket module.

mod domain_tests;
