use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Tool configuration, loaded from a TOML file. Everything except
/// `data_dir` has a default matching the reference dataset layout.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub data_dir: String,
    #[serde(default = "default_start_index")]
    pub start_index: u32,
    #[serde(default = "default_end_index")]
    pub end_index: u32,
    #[serde(default = "default_input_pattern")]
    pub input_pattern: String,
    #[serde(default = "default_output_pattern")]
    pub output_pattern: String,
    #[serde(default = "default_dataset_file")]
    pub dataset_file: String,
    #[serde(default = "default_merged_file")]
    pub merged_file: String,
    #[serde(default = "default_records_per_file")]
    pub records_per_file: usize,
    #[serde(default)]
    pub parser_command: Vec<String>,
}

fn default_start_index() -> u32 {
    1
}
fn default_end_index() -> u32 {
    55
}
fn default_input_pattern() -> String {
    "example_split_{i}.json".to_string()
}
fn default_output_pattern() -> String {
    "example_tree_{i}.json".to_string()
}
fn default_dataset_file() -> String {
    "example.json".to_string()
}
fn default_merged_file() -> String {
    "example_tree.json".to_string()
}
fn default_records_per_file() -> usize {
    200
}

impl Config {
    /// Checks the invariants the rest of the tool relies on. Runs at load
    /// time and again after CLI range overrides.
    pub fn validate(&self) -> Result<(), String> {
        if !PathBuf::from(&self.data_dir).is_dir() {
            return Err(format!(
                "data_dir '{}' is not a valid directory.",
                self.data_dir
            ));
        }
        if self.start_index < 1 {
            return Err("start_index must be at least 1.".to_string());
        }
        if self.start_index > self.end_index {
            return Err(format!(
                "start_index {} is greater than end_index {}.",
                self.start_index, self.end_index
            ));
        }
        if !self.input_pattern.contains("{i}") {
            return Err(format!(
                "input_pattern '{}' has no {{i}} placeholder.",
                self.input_pattern
            ));
        }
        if !self.output_pattern.contains("{i}") {
            return Err(format!(
                "output_pattern '{}' has no {{i}} placeholder.",
                self.output_pattern
            ));
        }
        if self.records_per_file == 0 {
            return Err("records_per_file must be greater than zero.".to_string());
        }
        Ok(())
    }

    /// Paragraph shard path for one index.
    pub fn input_path(&self, index: u32) -> PathBuf {
        self.shard_path(&self.input_pattern, index)
    }

    /// Tree shard path for one index.
    pub fn output_path(&self, index: u32) -> PathBuf {
        self.shard_path(&self.output_pattern, index)
    }

    pub fn dataset_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.dataset_file)
    }

    pub fn merged_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.merged_file)
    }

    fn shard_path(&self, pattern: &str, index: u32) -> PathBuf {
        PathBuf::from(&self.data_dir).join(pattern.replace("{i}", &index.to_string()))
    }
}

pub fn load_config_from_file(file_path: &str) -> Result<Config, String> {
    match fs::read_to_string(file_path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(loaded_config) => match loaded_config.validate() {
                Ok(()) => Ok(loaded_config),
                Err(e) => Err(format!("Invalid configuration in {}: {}", file_path, e)),
            },
            Err(e) => Err(format!("Failed to parse {}: {}", file_path, e)),
        },
        Err(e) => Err(format!(
            "Failed to read {}: {}. Please ensure it exists.",
            file_path, e
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(data_dir: &str) -> Config {
        Config {
            data_dir: data_dir.to_string(),
            start_index: default_start_index(),
            end_index: default_end_index(),
            input_pattern: default_input_pattern(),
            output_pattern: default_output_pattern(),
            dataset_file: default_dataset_file(),
            merged_file: default_merged_file(),
            records_per_file: default_records_per_file(),
            parser_command: Vec::new(),
        }
    }

    #[test]
    fn loads_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, format!("data_dir = {:?}\n", dir.path())).unwrap();

        let config = load_config_from_file(config_path.to_str().unwrap()).unwrap();
        assert_eq!(config.start_index, 1);
        assert_eq!(config.end_index, 55);
        assert_eq!(config.input_pattern, "example_split_{i}.json");
        assert_eq!(config.output_pattern, "example_tree_{i}.json");
        assert_eq!(config.records_per_file, 200);
        assert!(config.parser_command.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_config_from_file("/no/such/dir/paratree-config.toml").unwrap_err();
        assert!(err.contains("Failed to read"));
    }

    #[test]
    fn rejects_missing_data_dir() {
        let config = base_config("/no/such/dir/paratree-data");
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = base_config(dir.path().to_str().unwrap());
        config.start_index = 3;
        config.end_index = 2;
        let err = config.validate().unwrap_err();
        assert!(err.contains("greater than end_index"));
    }

    #[test]
    fn rejects_pattern_without_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = base_config(dir.path().to_str().unwrap());
        config.input_pattern = "shard.json".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("placeholder"));
    }

    #[test]
    fn rejects_zero_shard_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = base_config(dir.path().to_str().unwrap());
        config.records_per_file = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn substitutes_shard_index_into_patterns() {
        let config = base_config("data");
        assert!(config.input_path(7).ends_with("example_split_7.json"));
        assert!(config.output_path(7).ends_with("example_tree_7.json"));
    }
}
