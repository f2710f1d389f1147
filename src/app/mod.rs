//! Application layer: the table store and its configuration.
//!
//! The store owns the handle table and the repository that table files are
//! read from and written to.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │   facade (raw integers, -1 sentinels)       │
//! └──────────────┬──────────────────────────────┘
//!                │ delegates to
//!                ▼
//! ┌─────────────────────────────────────────────┐
//! │   TableStore (typed Result API)             │
//! │   - HandleTable: descriptor -> TableRecord  │
//! │   - TableRepository (port)                  │
//! └──────────────┬──────────────────────────────┘
//!                │ implemented by
//!                ▼
//! ┌─────────────────────────────────────────────┐
//! │   adapters                                  │
//! │   - BinaryFileRepository                    │
//! │   - InMemoryRepository (testing)            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use statematrix::app::TableStore;
//! use statematrix::adapters::InMemoryRepository;
//!
//! let mut store = TableStore::for_testing()
//!     .with_repository(InMemoryRepository::new())
//!     .build();
//! let descriptor = store.create("t1", 3, 2)?;
//! store.set_q(descriptor, 1, 0, 5.5)?;
//! store.save(descriptor)?;
//!
//! let copy = store.load("t1")?;
//! assert_eq!(store.get_q(copy, 1, 0)?, 5.5);
//! # Ok::<(), statematrix::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::StoreConfig;
pub use container::{TableStore, TableStoreBuilder};
