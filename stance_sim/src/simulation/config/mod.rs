// stance_sim/src/simulation/config/mod.rs

//! This module handles loading and validating scenario files from disk.

pub mod structs;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{Result, SimError};
pub use structs::ScenarioConfig;

/// Prefix of the environment variables overriding scenario values,
/// e.g. `STANCE_SIMULATION__SEED=3` or `STANCE_NOISE__FORCE_STD=2.0`.
pub const ENV_PREFIX: &str = "STANCE_";

/// Loads a scenario file, applies the environment overrides and validates the result.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    // figment treats a missing file as an empty one.
    if !path.is_file() {
        return Err(SimError::ScenarioNotFound(path.to_path_buf()));
    }
    info!("Loading scenario from: {}", path.display());

    let scenario: ScenarioConfig = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    scenario.validate()?;
    Ok(scenario)
}

/// Walks `dir` and returns every `.toml` file, sorted by path.
pub fn discover_scenarios(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        warn!("Scenario directory not found at {:?}.", dir);
        return Ok(Vec::new());
    }

    let mut scenarios = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir()
            && entry.path().extension().map_or(false, |ext| ext == "toml")
        {
            scenarios.push(entry.into_path());
        }
    }
    Ok(scenarios)
}

/// The effective scenario as TOML, defaults included.
pub fn dump_scenario(scenario: &ScenarioConfig) -> Result<String> {
    Ok(toml::to_string_pretty(scenario)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn scenario_is_loaded_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("walk.toml");
        fs::write(
            &path,
            "[simulation]\nseed = 11\n\n[noise]\nforce_std = 2.5\n",
        )
        .unwrap();

        let scenario = load_scenario(&path).unwrap();
        assert_eq!(scenario.simulation.seed, Some(11));
        assert_eq!(scenario.noise.force_std, 2.5);
    }

    #[test]
    fn missing_scenario_is_an_error() {
        let result = load_scenario(Path::new("no/such/scenario.toml"));
        assert!(matches!(result, Err(SimError::ScenarioNotFound(_))));
    }

    #[test]
    fn invalid_scenario_is_rejected_at_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[gait]\nstep_period = -1.0\n").unwrap();

        assert!(matches!(
            load_scenario(&path),
            Err(SimError::InvalidScenario(_))
        ));

        fs::write(&path, "[noise]\nforce_std = -1.0\n").unwrap();
        assert!(matches!(
            load_scenario(&path),
            Err(SimError::InvalidScenario(msg)) if msg.contains("noise.force_std")
        ));
    }

    #[test]
    fn scenarios_are_discovered_in_order() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path();
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("b.toml"), "").unwrap();
        fs::write(dir.join("a.toml"), "").unwrap();
        fs::write(dir.join("notes.md"), "").unwrap();
        fs::write(dir.join("nested").join("c.toml"), "").unwrap();

        let found = discover_scenarios(dir).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(dir).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 3);
        assert_eq!(names[0], "a.toml");
        assert_eq!(names[1], "b.toml");
    }

    #[test]
    fn shipped_scenarios_are_valid() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets/scenarios");
        let scenarios = discover_scenarios(&dir).unwrap();
        assert!(scenarios.len() >= 4);
        for path in scenarios {
            let scenario = load_scenario(&path).unwrap();
            assert!(scenario.simulation.seed.is_some(), "{}", path.display());
        }
    }

    #[test]
    fn dump_contains_every_section() {
        let dumped = dump_scenario(&ScenarioConfig::default()).unwrap();
        for section in ["[simulation]", "[robot]", "[gait]", "[noise]", "[odometry]"] {
            assert!(dumped.contains(section), "missing {} in\n{}", section, dumped);
        }
    }
}
