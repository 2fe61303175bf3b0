//! CLI command implementations.
//!
//! Each command loads what it needs (catalog, cart store) from the
//! configured paths, drives the storefront services, and prints the
//! resulting views. The CLI is a presentation adapter: all business
//! rules live in `apteka-storefront`.

use std::io::Write;

use apteka_storefront::cart::CartStore;
use apteka_storefront::catalog::Catalog;
use apteka_storefront::config::StorefrontConfig;
use apteka_storefront::error::AppError;
use apteka_storefront::services::Confirmation;
use apteka_storefront::storage::FileStorage;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;

/// Open the file-backed cart store for the configured data directory.
pub(crate) fn open_store(config: &StorefrontConfig) -> CartStore<FileStorage> {
    CartStore::open(FileStorage::new(&config.data_dir))
}

/// Load the product catalog from the configured path.
pub(crate) fn load_catalog(config: &StorefrontConfig) -> Result<Catalog, AppError> {
    Ok(Catalog::load(&config.catalog_path)?)
}

/// Confirmation prompts answered on stdin, or pre-approved with
/// `--yes`.
pub(crate) struct TerminalConfirmation {
    pub assume_yes: bool,
}

impl Confirmation for TerminalConfirmation {
    #[allow(clippy::print_stdout)]
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{prompt} [y/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}
