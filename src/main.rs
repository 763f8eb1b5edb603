use anyhow::Result;
use codebak::{cli::parse_args, run_backup};
use env_logger::Env;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = parse_args()?;

    let level = match config.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    #[cfg(feature = "restore")]
    if let Some(input) = config.restore_input.as_deref() {
        let target = match config.restore_path.as_deref() {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let count = codebak::restore_backup(input, Some(target.as_path())).await?;
        println!("Restored {count} files → {}", target.display());
        return Ok(());
    }

    let summary = run_backup(config).await?;
    println!("{summary}");
    Ok(())
}
