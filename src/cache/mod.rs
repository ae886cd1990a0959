mod query_cache;

pub use query_cache::{
    QueryCache, QueryKey, QueryState, QueryStatus, ReadHandle, ReadOutcome, DEFAULT_MAX_ENTRIES,
    NOTES_NAMESPACE,
};
