//! Command dispatch.

use super::command::{Cli, Commands, RackCommand, StackCommand};
use super::{handle, rack, stack};
use crate::application::Services;
use crate::error::Result;

/// Run the parsed command against wired services.
pub async fn dispatch(cli: &Cli, services: &Services) -> Result<()> {
    match &cli.command {
        Commands::Handle(args) => handle::execute(services, &args.event).await,
        Commands::Stack(StackCommand::Describe { name }) => {
            stack::execute(services, name.as_deref()).await
        }
        Commands::Rack(RackCommand::Show) => rack::show(services).await,
        Commands::Rack(RackCommand::Scale(args)) => rack::scale(services, args).await,
        Commands::Rack(RackCommand::Capacity) => rack::capacity(services).await,
    }
}
