//! Handler for the `handle` command.

use std::io::Read;

use crate::adapter::inbound::cli::output;
use crate::application::Services;
use crate::domain::{CustomResourceRequest, ResponseStatus};
use crate::error::Result;

/// Read the request from the argument, or from stdin when it is `-`.
pub fn read_event(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(arg.to_string())
}

pub async fn execute(services: &Services, event: &str) -> Result<()> {
    let request = CustomResourceRequest::from_json(&read_event(event)?)?;
    let response = services.handler.handle(&request).await?;

    if output::json_value("response", &response) {
        return Ok(());
    }

    match response.status {
        ResponseStatus::Success => output::success(&format!(
            "{} {} {}",
            request.request_type,
            request.resource_type,
            output::highlight(&response.physical_resource_id)
        )),
        ResponseStatus::Failed => output::warning(&format!(
            "{} {} failed: {}",
            request.request_type, request.resource_type, response.reason
        )),
    }
    if response.status == ResponseStatus::Success && !response.reason.is_empty() {
        output::field("Note", &response.reason);
    }

    Ok(())
}
