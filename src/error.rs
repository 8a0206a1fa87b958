use std::path::PathBuf;

/// Error types for the extraction pipeline
///
/// Every variant is fatal to a run. The wrapped cause is kept as the
/// error source so the binary can print the whole chain.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The archive could not be opened or is not a readable zip file
    #[error("could not read archive '{}'", .path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    /// The entry exists but its content could not be streamed
    #[error("could not read entry '{entry}'")]
    EntryRead {
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },
    /// No entry in the archive has the requested name
    #[error("could not find entry '{entry}' in archive '{}'", .archive.display())]
    EntryNotFound { entry: String, archive: PathBuf },
    /// The entry is not a flat JSON object of string values
    #[error("could not parse language file as a JSON object of strings")]
    Parse(#[source] serde_json::Error),
    /// Writing results to the output failed
    #[error("could not write output")]
    Output(#[source] std::io::Error),
}

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;
