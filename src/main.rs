use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = hoist::cli::parse();
    app::run(args)
}
