use anyhow::{bail, Context, Result};

use crate::cli::SearchArgs;
use crate::viewer::{format_thousands, SearchFilters, SearchRequest, SearchResult, ViewBox};

pub fn run(cli: &crate::cli::Cli, args: &SearchArgs) -> Result<()> {
    let mut request = SearchRequest::new(&args.query)?
        .with_filters(SearchFilters { city: !args.no_city, state: !args.no_state, county: !args.no_county });
    if let Some(bbox) = &args.bbox {
        request = request.with_bbox(parse_bbox(bbox)?);
    }

    if cli.verbose > 0 {
        eprintln!("[search] query={:?} filters={:?} server={}", request.query, request.filters, args.server);
    }

    let results = execute(&args.server, &request)?;
    if results.is_empty() {
        println!("No results for {:?}", request.query);
    }
    for result in &results {
        println!("{}", describe(result));
    }
    Ok(())
}

#[cfg(feature = "download")]
fn execute(server: &str, request: &SearchRequest) -> Result<Vec<SearchResult>> {
    use crate::io::{HttpClient, SearchSource};

    Ok(HttpClient::new(server)?.search(request)?)
}

#[cfg(not(feature = "download"))]
fn execute(_server: &str, _request: &SearchRequest) -> Result<Vec<SearchResult>> {
    bail!("[search] built without the `download` feature");
}

/// Parse `west,south,east,north`.
fn parse_bbox(text: &str) -> Result<ViewBox> {
    let values = text.split(',')
        .map(|v| v.trim().parse::<f64>().with_context(|| format!("[search] Invalid bbox value {v:?}")))
        .collect::<Result<Vec<_>>>()?;
    let [west, south, east, north] = values[..] else {
        bail!("[search] bbox needs four values: west,south,east,north");
    };
    if !(north >= south && east >= west) {
        bail!("[search] bbox must satisfy north >= south and east >= west");
    }
    Ok(ViewBox::new(north, south, east, west))
}

/// One tab-separated line: id, name, type, region, country, population.
fn describe(result: &SearchResult) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        result.id,
        result.name,
        result.kind,
        result.region,
        result.country.as_deref().unwrap_or("N/A"),
        result.population.map(format_thousands).unwrap_or_else(|| "N/A".into()),
    )
}
