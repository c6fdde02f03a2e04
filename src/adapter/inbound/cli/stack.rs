//! Handler for `stack describe`.

use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::cache::stack::ALL_STACKS;
use crate::application::Services;
use crate::domain::Stack;
use crate::error::Result;

#[derive(Tabled)]
struct StackRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Raw Status")]
    raw: String,
    #[tabled(rename = "Parameters")]
    parameters: usize,
}

impl From<&Stack> for StackRow {
    fn from(stack: &Stack) -> Self {
        Self {
            name: stack.name.clone(),
            status: stack.human_status().to_string(),
            raw: stack.status.clone(),
            parameters: stack.parameters.len(),
        }
    }
}

pub async fn execute(services: &Services, name: Option<&str>) -> Result<()> {
    let description = match name {
        Some(name) => services.cache.describe_stack(name).await?,
        None => services.cache.describe_stacks().await?,
    };

    if output::json_value("stacks", &*description) {
        return Ok(());
    }

    if description.stacks.is_empty() {
        output::warning("No stacks found");
        return Ok(());
    }

    let rows: Vec<StackRow> = description.stacks.iter().map(StackRow::from).collect();
    output::block(&Table::new(rows).to_string());

    let key = name.unwrap_or(ALL_STACKS);
    if let Some((_, entry)) = services
        .cache
        .entries()
        .await
        .into_iter()
        .find(|(k, _)| k == key)
    {
        output::field(
            "fetched",
            output::muted(entry.fetched_wall.format("%Y-%m-%d %H:%M:%S UTC")),
        );
    }

    if let (Some(_), [stack]) = (name, description.stacks.as_slice()) {
        output::section("Parameters");
        for (key, value) in &stack.parameters {
            output::field(key, value);
        }
        if !stack.outputs.is_empty() {
            output::section("Outputs");
            for (key, value) in &stack.outputs {
                output::field(key, value);
            }
        }
    }

    Ok(())
}
