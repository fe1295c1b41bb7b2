use crate::config::components::stream::StreamDeclaration;
use crate::config::error::ConfigError;
use crate::config::traits::ConfigName;
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const YAML_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| YAML_EXTENSIONS.contains(&ext))
}

/// Every YAML file below `root`, sorted so loading order does not depend on the
/// filesystem.
pub fn yaml_paths(root: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_yaml(entry.path()) {
            paths.push(entry.into_path());
        } else {
            warn!("skipping non-yaml file {}", entry.path().display());
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn read_config<V>(path: &Path) -> Result<V, ConfigError>
where
    V: DeserializeOwned,
{
    if !path.exists() {
        return Err(ConfigError::incorrect_path(path));
    }
    let file = fs::File::open(path).map_err(|err| ConfigError::from(err).in_file(path))?;
    serde_yaml::from_reader(file).map_err(|err| ConfigError::from(err).in_file(path))
}

/// Load every named config entry under `root`, rejecting duplicate names.
pub fn load_config<V>(root: &Path) -> Result<HashMap<String, V>, ConfigError>
where
    V: DeserializeOwned + ConfigName,
{
    if !root.exists() {
        return Err(ConfigError::incorrect_path(root));
    }

    let mut entries: HashMap<String, (PathBuf, V)> = HashMap::new();
    for path in yaml_paths(root)? {
        info!("loading declaration from {}", path.display());
        let value: V = read_config(&path)?;
        let name = value.name().to_string();
        if name.trim().is_empty() {
            return Err(ConfigError::parse_error("declaration `name` is empty").in_file(&path));
        }
        if let Some((first, _)) = entries.get(&name) {
            return Err(ConfigError::duplicate(&name, first, &path));
        }
        entries.insert(name, (path, value));
    }

    Ok(entries
        .into_iter()
        .map(|(name, (_, value))| (name, value))
        .collect())
}

/// Read one declaration. A blank `name` is a parse error.
pub fn read_declaration(path: &Path) -> Result<StreamDeclaration, ConfigError> {
    let decl: StreamDeclaration = read_config(path)?;
    if decl.name.trim().is_empty() {
        return Err(ConfigError::parse_error("declaration `name` is empty").in_file(path));
    }
    Ok(decl)
}

pub fn load_declarations(root: &Path) -> Result<HashMap<String, StreamDeclaration>, ConfigError> {
    load_config(root)
}
