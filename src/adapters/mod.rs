//! Adapters implementing domain ports.
//!
//! This module contains storage implementations of the traits defined in the
//! ports module. Adapters depend on the ports, not the other way around.

pub mod binary_file_repository;
pub mod in_memory_repository;

pub use binary_file_repository::BinaryFileRepository;
pub use in_memory_repository::InMemoryRepository;
