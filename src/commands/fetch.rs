use anyhow::Result;

use crate::cli::FetchArgs;
use crate::io::fs::assert_not_stdout;

#[cfg(feature = "download")]
pub fn run(cli: &crate::cli::Cli, args: &FetchArgs) -> Result<()> {
    use anyhow::Context;

    use crate::io::{write_atomic, write_geometry, GeometrySource, HttpClient};

    assert_not_stdout(&args.output)?;

    if cli.verbose > 0 {
        eprintln!("[fetch] id={} server={} -> {}", args.id, args.server, args.output.display());
    }

    let client = HttpClient::new(&args.server)?;
    let geometry = client.fetch(&args.id)?;
    let bytes = write_geometry(&geometry)?;
    let path = write_atomic(&args.output, &bytes, args.force)
        .with_context(|| format!("[fetch] Failed to write {}", args.output.display()))?;

    if cli.verbose > 0 {
        eprintln!("[fetch] {} with {} ring(s)", geometry.type_name(), geometry.num_rings());
    }
    println!("Fetched {} -> {}", args.id, path.display());
    Ok(())
}

#[cfg(not(feature = "download"))]
pub fn run(_cli: &crate::cli::Cli, args: &FetchArgs) -> Result<()> {
    assert_not_stdout(&args.output)?;
    anyhow::bail!("[fetch] built without the `download` feature");
}
