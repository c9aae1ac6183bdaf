//! Unit tests for the task module.

mod coordinator_tests;
