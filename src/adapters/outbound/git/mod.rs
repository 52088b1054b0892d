/// Source control adapters
mod git_source_fetcher;

pub use git_source_fetcher::GitSourceFetcher;
