//! Persistence layer via the Repository pattern.
//!
//! The engine only ever talks to the repository traits, allowing different
//! storage backends to be swapped without touching the business logic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - Business Logic             │
//! │  - Slot listing and booking admission                   │
//! │  - Waitlist replacement                                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod repositories;
pub mod repository;

pub use repositories::LocalRepository;
pub use repository::{
    BookingRepository, DirectoryRepository, ErrorContext, ExceptionRepository, FullRepository,
    RepositoryError, RepositoryResult, WaitlistRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

fn create_selected_repository() -> Arc<dyn FullRepository> {
    Arc::new(LocalRepository::new())
}

/// Initialize the global repository singleton for the selected backend.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let _ = REPOSITORY.set(create_selected_repository());
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
