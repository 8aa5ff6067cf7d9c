use crate::cli::CommandContext;
use crate::database::RecordStore;
use crate::errors::AppResult;
use crate::utils::format::format_bytes;
use clap::Args;

#[derive(Args)]
pub struct UsersCommand {
    /// Also print each user's totals
    #[arg(long)]
    verbose: bool,
}

impl UsersCommand {
    pub fn run(&self, ctx: &CommandContext) -> AppResult<()> {
        let store = ctx.engine.store();
        println!("{} users", store.count()?);
        for user_id in store.user_ids()? {
            if self.verbose {
                let record = store.get(user_id)?;
                println!(
                    "{}\t{} files\t{}",
                    user_id,
                    record.file_count,
                    format_bytes(record.total_size)
                );
            } else {
                println!("{}", user_id);
            }
        }
        Ok(())
    }
}
