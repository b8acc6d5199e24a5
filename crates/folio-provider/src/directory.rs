//! Directory-backed listing provider.

use std::path::Path;

use folio_core::{
    Collection, Error, Item, ItemId, ListingProvider, PageRequest, PageResult, Result, Target,
    require_collection,
};
use tokio::sync::OnceCell;

use crate::TRACING_TARGET;
use crate::config::DirectoryConfig;

/// Listing provider over the regular files of a directory.
///
/// The directory is enumerated lazily on the first query and the snapshot is
/// kept for the lifetime of the provider, so paging through it never skips
/// or repeats a file even if the directory changes underneath. Files are
/// ordered by name. An enumeration failure is not cached: the next query
/// tries again.
#[derive(Debug)]
pub struct DirectoryProvider {
    config: DirectoryConfig,
    snapshot: OnceCell<Collection>,
}

impl DirectoryProvider {
    /// Creates a provider for the configured directory.
    ///
    /// # Errors
    ///
    /// Returns `invalid_argument` if the configuration does not validate.
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            snapshot: OnceCell::new(),
        })
    }

    /// Returns the configuration of this provider.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Returns the collection snapshot, enumerating the directory on first use.
    pub async fn collection(&self) -> Result<&Collection> {
        self.snapshot
            .get_or_try_init(|| enumerate(&self.config))
            .await
    }
}

#[async_trait::async_trait]
impl ListingProvider for DirectoryProvider {
    #[tracing::instrument(
        skip_all,
        target = TRACING_TARGET,
        fields(offset = ?request.offset, limit = ?request.limit)
    )]
    async fn query(&self, target: &Target, request: &PageRequest) -> Result<PageResult> {
        require_collection(target)?;
        // Arguments are validated before the directory is touched.
        request.bounds()?;

        let page = self.collection().await?.page(request)?;

        tracing::debug!(
            target: TRACING_TARGET,
            returned = page.len(),
            total_size = page.total_size,
            "Answered page query"
        );

        Ok(page)
    }
}

async fn enumerate(config: &DirectoryConfig) -> Result<Collection> {
    let root = tokio::fs::canonicalize(&config.root)
        .await
        .map_err(|e| enumeration_error(&config.root, e))?;

    let mut entries = tokio::fs::read_dir(&root)
        .await
        .map_err(|e| enumeration_error(&root, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| enumeration_error(&root, e))?
    {
        let display_name = entry.file_name().to_string_lossy().into_owned();
        if !config.include_hidden && display_name.starts_with('.') {
            continue;
        }

        // Follows symlinks; a dangling link is skipped like any non-file.
        let location = entry.path();
        let metadata = match tokio::fs::metadata(&location).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(enumeration_error(&location, e)),
        };
        if !metadata.is_file() {
            continue;
        }

        files.push((display_name, location, metadata.len()));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));

    let collection: Collection = files
        .into_iter()
        .enumerate()
        .map(|(ordinal, (display_name, location, size))| {
            Item::new(ItemId::new(ordinal as u64), display_name, location, size)
        })
        .collect();

    tracing::info!(
        target: TRACING_TARGET,
        root = %root.display(),
        total_size = collection.len(),
        "Enumerated directory"
    );

    Ok(collection)
}

fn enumeration_error(path: &Path, error: std::io::Error) -> Error {
    tracing::warn!(
        target: TRACING_TARGET,
        path = %path.display(),
        error = %error,
        "Directory enumeration failed"
    );

    Error::from(error).with_message(format!("failed to enumerate {}", path.display()))
}
