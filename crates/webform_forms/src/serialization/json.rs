use crate::descriptor::FormDescriptor;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SerializationResult<T> = Result<T, SerializationError>;

pub fn descriptor_from_json(json: &str) -> SerializationResult<FormDescriptor> {
    Ok(serde_json::from_str(json)?)
}

pub fn descriptor_to_json(config: &FormDescriptor) -> SerializationResult<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

pub fn save_descriptor(config: &FormDescriptor, path: impl AsRef<Path>) -> SerializationResult<()> {
    let json = descriptor_to_json(config)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_descriptor(path: impl AsRef<Path>) -> SerializationResult<FormDescriptor> {
    let json = fs::read_to_string(path)?;
    descriptor_from_json(&json)
}
