use std::io::Write;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::file_format::SerdeFormat;

pub type Result<T> = anyhow::Result<T>;

pub fn serialize<T: Serialize>(value: &T, format: SerdeFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    serialize_into(value, format, &mut buffer)?;
    Ok(buffer)
}

pub fn serialize_into<T: Serialize, W: Write>(
    value: &T,
    format: SerdeFormat,
    writer: &mut W,
) -> Result<()> {
    let mut text = match format {
        SerdeFormat::Json => serde_json::to_string_pretty(value)?,
        SerdeFormat::Toml => toml::to_string(value)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    writer.write_all(text.as_bytes())?;

    Ok(())
}

pub fn deserialize<T: DeserializeOwned>(serialized: &[u8], format: SerdeFormat) -> Result<T> {
    let text = std::str::from_utf8(serialized)?;
    match format {
        SerdeFormat::Json => Ok(serde_json::from_str(text)?),
        SerdeFormat::Toml => Ok(toml::from_str(text)?),
    }
}
