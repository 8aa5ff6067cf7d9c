use crate::cli::CommandContext;
use crate::errors::AppResult;
use crate::processor::rejected_tokens;
use crate::report::{
    ignore_added_message, ignore_list_message, ignore_removed_message, rejected_tokens_message,
};
use crate::types::UserId;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct IgnoreCommand {
    #[arg(long)]
    user: UserId,

    #[command(subcommand)]
    action: IgnoreAction,
}

#[derive(Subcommand)]
pub enum IgnoreAction {
    /// Stop counting files with these extensions
    Add {
        #[arg(required = true)]
        extensions: Vec<String>,
    },
    /// Count these extensions again
    Rm {
        #[arg(required = true)]
        extensions: Vec<String>,
    },
    /// Show ignored extensions
    List,
}

impl IgnoreCommand {
    pub fn run(&self, ctx: &CommandContext) -> AppResult<()> {
        let message = match &self.action {
            IgnoreAction::Add { extensions } => {
                ignore_added_message(&ctx.engine.add_ignored(self.user, extensions.as_slice())?)
            }
            IgnoreAction::Rm { extensions } => {
                ignore_removed_message(&ctx.engine.remove_ignored(self.user, extensions.as_slice())?)
            }
            IgnoreAction::List => ignore_list_message(&ctx.engine.list_ignored(self.user)?),
        };
        println!("{}", message);

        if let IgnoreAction::Add { extensions } | IgnoreAction::Rm { extensions } = &self.action {
            if let Some(note) = rejected_tokens_message(&rejected_tokens(extensions.as_slice())) {
                println!("{}", note);
            }
        }
        Ok(())
    }
}
