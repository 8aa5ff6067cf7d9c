use crate::cli::CommandContext;
use crate::errors::AppResult;
use crate::types::UserId;
use clap::Args;

#[derive(Args)]
pub struct ResetCommand {
    #[arg(long)]
    user: UserId,
}

impl ResetCommand {
    pub fn run(&self, ctx: &CommandContext) -> AppResult<()> {
        ctx.engine.reset(self.user)?;
        if ctx.config.stats.reset_clears_ignored {
            println!("Statistics reset.");
        } else {
            println!("Statistics reset. Ignored extensions were kept.");
        }
        Ok(())
    }
}
