//! Handlers for `rack show`, `rack scale` and `rack capacity`.

use serde_json::json;

use super::command::ScaleArgs;
use crate::adapter::inbound::cli::output;
use crate::application::Services;
use crate::domain::rack::capacity_floor;
use crate::domain::{RackScaleRequest, RackSystem};
use crate::error::Result;

fn print_system(system: &RackSystem) {
    if output::json_value("rack", system) {
        return;
    }
    output::section(&system.name);
    output::field("Status", output::status(&system.status));
    output::field("Count", system.count);
    output::field("Type", &system.instance_type);
    output::field("Version", &system.version);
}

pub async fn show(services: &Services) -> Result<()> {
    let system = services.rack.system().await?;
    print_system(&system);
    Ok(())
}

pub async fn scale(services: &Services, args: &ScaleArgs) -> Result<()> {
    let request = RackScaleRequest {
        count: args.count,
        instance_type: args.instance_type.clone(),
        version: args.version.clone(),
    };

    let system = services.rack.scale(&request).await?;
    output::success(&format!(
        "Scaling {} to {} instances",
        system.name,
        output::highlight(system.count)
    ));
    print_system(&system);
    Ok(())
}

pub async fn capacity(services: &Services) -> Result<()> {
    let max = services.rack.validator().max_required_concurrency().await?;
    let floor = capacity_floor(max);

    if output::json_value("capacity", &json!({ "max_concurrency": max, "min_count": floor })) {
        return Ok(());
    }

    output::section(services.rack.rack());
    output::field("Max", format!("{max} {}", output::muted("(largest external process)")));
    output::field("Min count", floor);
    Ok(())
}
