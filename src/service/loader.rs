use std::collections::HashSet;
use std::{fs, path::Path, path::PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::db::models::NewUser;
use crate::error::StoreError;

/// A seed file holds either one user object or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    One(NewUser),
    Many(Vec<NewUser>),
}

impl SeedFile {
    fn into_users(self) -> Vec<NewUser> {
        match self {
            SeedFile::One(user) => vec![user],
            SeedFile::Many(users) => users,
        }
    }
}

/// Load seed users from `*.json` files in a directory.
///
/// Files are visited in path order so repeated runs see the same
/// sequence. Entries with blank names are rejected, duplicate names
/// keep their first occurrence, and unreadable or unparseable files
/// are skipped with a warning. A missing directory is not an error.
pub fn load_from_dir(dir: &Path) -> Result<Vec<NewUser>, StoreError> {
    if !dir.exists() {
        info!(path = %dir.display(), "seed directory not found; skipping load");
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        match entry {
            Ok(entry) => paths.push(entry.path()),
            Err(e) => {
                let err: StoreError = e.into();
                warn!(error = %err, "failed to read seed dir entry");
            }
        }
    }
    paths.retain(|path| is_json_file(path));
    paths.sort();

    let mut seen = HashSet::new();
    let mut users = Vec::new();
    let mut skipped = 0usize;

    for path in &paths {
        let loaded = match load_seed_file(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load seed file");
                skipped += 1;
                continue;
            }
        };
        for mut user in loaded {
            user.name = user.name.trim().to_string();
            if user.name.is_empty() {
                warn!(path = %path.display(), "seed entry has a blank name; rejected");
                skipped += 1;
                continue;
            }
            if !seen.insert(user.name.clone()) {
                debug!(name = %user.name, "duplicate seed name; keeping first occurrence");
                continue;
            }
            users.push(user);
        }
    }

    debug!(
        files = paths.len(),
        loaded = users.len(),
        skipped,
        "seed load finished"
    );
    Ok(users)
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        == Some(true)
}

fn load_seed_file(path: &Path) -> Result<Vec<NewUser>, StoreError> {
    let contents = fs::read_to_string(path)?;
    let seed: SeedFile = serde_json::from_str(&contents)?;
    Ok(seed.into_users())
}
