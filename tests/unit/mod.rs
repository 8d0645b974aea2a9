//! Unit test modules.

mod memory_repository_test;
mod recommendations_test;
mod validation_test;
mod vocabulary_test;
