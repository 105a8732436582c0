use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a scenario or config file. `.yaml` / `.yml` go through serde_yaml,
/// everything else is treated as JSON.
pub fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;

    let parsed = if is_yaml(&resolved) {
        serde_yaml::from_str(&contents).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e).into())
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.is_file() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finanhogar_core::config::EngineConfig;
    use std::io::Write;

    fn write_temp(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("finanhogar-{}-{}", std::process::id(), name));
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_yaml_config() {
        let path = write_temp("cfg.yaml", "acquisition_costs:\n  notary_cap: 2500\n");
        let cfg: EngineConfig = read_document(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.acquisition_costs.notary_cap, rust_decimal_macros::dec!(2500));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_json_config() {
        let path = write_temp("cfg.json", r#"{"acquisition_costs": {"appraisal_fee": "450"}}"#);
        let cfg: EngineConfig = read_document(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.acquisition_costs.appraisal_fee, rust_decimal_macros::dec!(450));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = read_document::<EngineConfig>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
