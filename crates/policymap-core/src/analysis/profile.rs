//! Per-source keyword profiles and projection centroids

use super::KeywordCounts;
use crate::error::{PolicyMapError, Result};
use crate::index::ensure_parent;
use crate::keywords::split_keywords;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

lazy_static! {
    static ref NON_SLUG: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Projection columns produced by an external reducer
pub const PROJECTION_COLUMNS: [&str; 2] = ["UMAP_D1", "UMAP_D2"];

pub const CENTROIDS_FILE: &str = "centroids.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Source id to display name; unmapped ids are shown as-is
    pub aliases: BTreeMap<String, String>,

    /// Named group to the display names it merges
    pub groups: BTreeMap<String, Vec<String>>,
}

impl ProfileConfig {
    pub fn display_name<'a>(&'a self, source_id: &'a str) -> &'a str {
        self.aliases
            .get(source_id)
            .map(String::as_str)
            .unwrap_or(source_id)
    }
}

/// Keywords and placement of one display group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupProfile {
    pub name: String,
    pub rows: usize,
    /// Every keyword occurrence, sorted
    pub keywords: Vec<String>,
    /// Median projection, when the input carries projection columns
    pub centroid: Option<(f64, f64)>,
}

impl GroupProfile {
    pub fn unique(&self) -> BTreeSet<&str> {
        self.keywords.iter().map(String::as_str).collect()
    }
}

/// Build one profile per display group, in order of first appearance
pub fn profile_table(input: &Path, config: &ProfileConfig) -> Result<Vec<GroupProfile>> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let type_col = column("Type").ok_or_else(|| missing_column(input, "Type"))?;
    let keywords_col = column("Keywords").ok_or_else(|| missing_column(input, "Keywords"))?;
    let projection = match (column(PROJECTION_COLUMNS[0]), column(PROJECTION_COLUMNS[1])) {
        (Some(x), Some(y)) => Some((x, y)),
        _ => None,
    };

    let mut order: Vec<String> = Vec::new();
    let mut keywords: HashMap<String, Vec<String>> = HashMap::new();
    let mut rows: HashMap<String, usize> = HashMap::new();
    let mut points: HashMap<String, (Vec<f64>, Vec<f64>)> = HashMap::new();

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let source_id = record.get(type_col).unwrap_or_default();
        let group = config.display_name(source_id).to_string();

        if !rows.contains_key(&group) {
            order.push(group.clone());
        }
        *rows.entry(group.clone()).or_insert(0) += 1;
        keywords.entry(group.clone()).or_default().extend(
            split_keywords(record.get(keywords_col).unwrap_or_default())
                .into_iter()
                .map(str::to_string),
        );

        if let Some((x_col, y_col)) = projection {
            let x = parse_coordinate(&record, x_col, line)?;
            let y = parse_coordinate(&record, y_col, line)?;
            let entry = points.entry(group).or_default();
            entry.0.push(x);
            entry.1.push(y);
        }
    }

    let profiles = order
        .into_iter()
        .map(|name| {
            let mut kws = keywords.remove(&name).unwrap_or_default();
            kws.sort();
            let centroid = points
                .remove(&name)
                .and_then(|(xs, ys)| Some((median(xs)?, median(ys)?)));
            tracing::debug!("{} list: {:?}", name, kws);
            GroupProfile {
                rows: rows.get(&name).copied().unwrap_or(0),
                keywords: kws,
                centroid,
                name,
            }
        })
        .collect();

    Ok(profiles)
}

/// Write `<group>_unique_counts.csv` per group, plus centroids when known
///
/// With no configured groups, every display group is written on its own.
pub fn write_profiles(
    profiles: &[GroupProfile],
    config: &ProfileConfig,
    results_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let by_name: HashMap<&str, &GroupProfile> =
        profiles.iter().map(|p| (p.name.as_str(), p)).collect();

    let groups: Vec<(String, Vec<&GroupProfile>)> = if config.groups.is_empty() {
        profiles.iter().map(|p| (p.name.clone(), vec![p])).collect()
    } else {
        config
            .groups
            .iter()
            .map(|(group, members)| -> Result<(String, Vec<&GroupProfile>)> {
                let members = members
                    .iter()
                    .map(|m| {
                        by_name.get(m.as_str()).copied().ok_or_else(|| {
                            PolicyMapError::InvalidInput(format!(
                                "Group {:?} references unknown source {:?}",
                                group, m
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((group.clone(), members))
            })
            .collect::<Result<_>>()?
    };

    let mut written = Vec::new();
    for (group, members) in groups {
        tracing::info!("Generating {} count list ...", group);
        let mut counts = KeywordCounts::new();
        for member in members {
            counts.extend(member.keywords.iter().map(String::as_str));
        }
        let path = results_dir.join(format!("{}_unique_counts.csv", slug(&group)));
        counts.write_csv(&path)?;
        tracing::info!("Saved: {}.", path.display());
        written.push(path);
    }

    if profiles.iter().any(|p| p.centroid.is_some()) {
        let path = results_dir.join(CENTROIDS_FILE);
        write_centroids(profiles, &path)?;
        tracing::info!("Saved: {}.", path.display());
        written.push(path);
    }

    Ok(written)
}

fn write_centroids(profiles: &[GroupProfile], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["group", "rows", PROJECTION_COLUMNS[0], PROJECTION_COLUMNS[1]])?;
    for profile in profiles {
        if let Some((x, y)) = profile.centroid {
            writer.write_record([
                profile.name.clone(),
                profile.rows.to_string(),
                x.to_string(),
                y.to_string(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// File-name form of a group name
pub fn slug(name: &str) -> String {
    let lower = name.to_lowercase();
    let slug = NON_SLUG.replace_all(&lower, "_");
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "group".to_string()
    } else {
        slug.to_string()
    }
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    values.retain(|v| !v.is_nan());
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

fn parse_coordinate(record: &csv::StringRecord, col: usize, line: usize) -> Result<f64> {
    let raw = record.get(col).unwrap_or_default().trim();
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse().map_err(|_| {
        PolicyMapError::Parse(format!("Row {}: invalid coordinate {:?}", line + 1, raw))
    })
}

fn missing_column(path: &Path, name: &str) -> PolicyMapError {
    PolicyMapError::Parse(format!("{} has no {:?} column", path.display(), name))
}
