use serde::Serialize;
use soilsense_core::error::SoilError;

pub fn print<T: Serialize>(result: &T) -> Result<(), SoilError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
