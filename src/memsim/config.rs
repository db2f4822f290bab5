use memsim_error::Result;
use memsim_paging::{DefaultPageId, Policy};
use serde::Deserialize;

/// Configuration file loaded when none is given, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config/memsim.toml";

/// A segment to allocate in the demo segment table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SegmentConfig {
    pub id: u32,
    pub base: usize,
    pub limit: usize,
}

/// Simulation settings, layered from defaults, an optional file, and `MEMSIM_*` variables.
#[derive(Debug, PartialEq, Deserialize)]
pub struct Config {
    pub log_level: String,

    /// Frames of physical memory for the replacement runs.
    pub frame_count: usize,
    /// Policy used when a single policy is requested.
    pub policy: Policy,
    /// Page reference string replayed under each policy.
    pub trace: Vec<DefaultPageId>,

    pub demand_frame_count: usize,
    pub demand_trace: Vec<DefaultPageId>,

    pub frame_size: usize,
    pub process_sizes: Vec<usize>,

    #[serde(default = "default_segments")]
    pub segments: Vec<SegmentConfig>,
}

fn default_segments() -> Vec<SegmentConfig> {
    vec![
        SegmentConfig { id: 0, base: 0, limit: 100 },
        SegmentConfig { id: 1, base: 100, limit: 200 },
        SegmentConfig { id: 2, base: 200, limit: 150 },
    ]
}

impl Config {
    pub fn new(file: &str) -> Result<Config> {
        let mut cfg = config::Config::builder()
            .set_default("log_level", "info")?
            .set_default("frame_count", 3)?
            .set_default("policy", "fifo")?
            .set_default("trace", vec![1, 2, 3, 4, 1, 5])?
            .set_default("demand_frame_count", 2)?
            .set_default("demand_trace", vec![3, 5, 3, 7, 5])?
            .set_default("frame_size", 4)?
            .set_default("process_sizes", vec![3, 5])?;
        if !file.is_empty() {
            cfg = cfg.add_source(config::File::with_name(file))
        }
        cfg = cfg.add_source(
            config::Environment::with_prefix("MEMSIM")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("trace")
                .with_list_parse_key("demand_trace")
                .with_list_parse_key("process_sizes"),
        );
        Ok(cfg.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_default_config() -> Result<()> {
        let cfg = Config::new("")?;
        assert_eq!(3, cfg.frame_count);
        assert_eq!(Policy::Fifo, cfg.policy);
        assert_eq!(vec![1, 2, 3, 4, 1, 5], cfg.trace);
        assert_eq!(vec![3, 5, 3, 7, 5], cfg.demand_trace);
        assert_eq!(4, cfg.frame_size);
        assert_eq!(3, cfg.segments.len());
        assert_eq!("info", cfg.log_level);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_shipped_config_matches_defaults() -> Result<()> {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_FILE);
        let shipped = Config::new(path.to_str().unwrap())?;
        assert_eq!(Config::new("")?, shipped);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_missing_config_file_is_a_config_error() {
        let path = std::env::temp_dir().join("memsim_config_missing");
        assert!(matches!(
            Config::new(path.to_str().unwrap()),
            Err(memsim_error::Error::Config(_))
        ));
    }

    #[test]
    #[serial]
    fn test_config_file_overrides_defaults() -> Result<()> {
        let path = std::env::temp_dir().join("memsim_config_test.toml");
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "frame_count = 4")?;
        writeln!(file, "policy = \"optimal\"")?;
        writeln!(file, "trace = [7, 0, 1, 2, 0]")?;
        writeln!(file, "[[segments]]")?;
        writeln!(file, "id = 9")?;
        writeln!(file, "base = 1000")?;
        writeln!(file, "limit = 64")?;
        drop(file);

        let cfg = Config::new(path.to_str().unwrap())?;
        std::fs::remove_file(&path)?;

        assert_eq!(4, cfg.frame_count);
        assert_eq!(Policy::Optimal, cfg.policy);
        assert_eq!(vec![7, 0, 1, 2, 0], cfg.trace);
        assert_eq!(
            vec![SegmentConfig { id: 9, base: 1000, limit: 64 }],
            cfg.segments
        );
        // Untouched keys keep their defaults.
        assert_eq!(2, cfg.demand_frame_count);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_environment_overrides_defaults() -> Result<()> {
        std::env::set_var("MEMSIM_FRAME_COUNT", "5");
        std::env::set_var("MEMSIM_POLICY", "lru");
        std::env::set_var("MEMSIM_TRACE", "4,4,2");
        let cfg = Config::new("");
        std::env::remove_var("MEMSIM_FRAME_COUNT");
        std::env::remove_var("MEMSIM_POLICY");
        std::env::remove_var("MEMSIM_TRACE");

        let cfg = cfg?;
        assert_eq!(5, cfg.frame_count);
        assert_eq!(Policy::Lru, cfg.policy);
        assert_eq!(vec![4, 4, 2], cfg.trace);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_unknown_policy_is_a_config_error() {
        std::env::set_var("MEMSIM_POLICY", "clock");
        let cfg = Config::new("");
        std::env::remove_var("MEMSIM_POLICY");
        assert!(matches!(cfg, Err(memsim_error::Error::Config(_))));
    }
}
