use crate::cli::CommandContext;
use crate::errors::AppResult;
use crate::types::UserId;
use clap::Args;

#[derive(Args)]
pub struct StatsCommand {
    #[arg(long)]
    user: UserId,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl StatsCommand {
    pub fn run(&self, ctx: &CommandContext) -> AppResult<()> {
        let report = ctx.engine.report(self.user)?;
        if self.json {
            println!("{}", report.to_json()?);
        } else {
            print!("{}", report.render_text());
        }
        Ok(())
    }
}
