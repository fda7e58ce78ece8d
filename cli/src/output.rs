#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// One line per entry
    Text,
    /// JSON array of entries
    Json,
}
