pub mod config;
pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Structured input from `--input <file>`, falling back to JSON piped on
/// stdin. `Ok(None)` means neither was supplied and the caller should build
/// the input from flags.
pub fn structured<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_document(path)?));
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}
