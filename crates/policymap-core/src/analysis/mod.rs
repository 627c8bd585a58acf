//! Keyword frequency and cluster profiling

mod counts;
mod profile;

pub use counts::KeywordCounts;
pub use profile::{
    profile_table, slug, write_profiles, GroupProfile, ProfileConfig, CENTROIDS_FILE,
    PROJECTION_COLUMNS,
};
