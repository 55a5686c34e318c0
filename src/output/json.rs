use super::RunSummary;
use std::error::Error;

pub fn output_summary(data: &RunSummary) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}
