use crate::cli::CommandContext;
use crate::errors::AppResult;
use crate::processor::rejected_tokens;
use crate::report::{rejected_tokens_message, retracted_message};
use crate::types::UserId;
use clap::Args;

#[derive(Args)]
pub struct ForgetCommand {
    /// Extensions whose statistics are removed, e.g. `.mp3 txt`
    #[arg(required = true)]
    extensions: Vec<String>,

    #[arg(long)]
    user: UserId,
}

impl ForgetCommand {
    pub fn run(&self, ctx: &CommandContext) -> AppResult<()> {
        let removed = ctx.engine.retract(self.user, self.extensions.as_slice())?;
        println!("{}", retracted_message(&removed));
        if let Some(note) = rejected_tokens_message(&rejected_tokens(self.extensions.as_slice())) {
            println!("{}", note);
        }
        Ok(())
    }
}
