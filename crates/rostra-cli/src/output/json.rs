use rostra_core::error::RostraError;
use rostra_core::model::ClassifiedLine;

pub fn print(lines: &[ClassifiedLine]) -> Result<(), RostraError> {
    let json = serde_json::to_string_pretty(lines)?;
    println!("{json}");
    Ok(())
}
