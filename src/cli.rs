use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

use crate::viewer::AreaKind;

/// Render administrative division boundaries as screen and print outlines
#[derive(Parser, Debug)]
#[command(name = "division-outline", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a GeoJSON boundary to PNG, JPEG or SVG (forbids stdout)
    Render(RenderArgs),

    /// Download the boundary geometry of a division as GeoJSON (forbids stdout)
    Fetch(FetchArgs),

    /// Search divisions by name
    Search(SearchArgs),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum Preset {
    /// 800x1000 preview at 2x with the outline title
    #[default]
    Screen,
    /// US letter at 300 DPI with title and metadata block
    Print,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Input GeoJSON: a geometry, a Feature, or a {"geometry": ...} response
    #[arg(value_hint = ValueHint::FilePath)]
    pub geojson: PathBuf,

    /// Output image; the format follows the extension (.png, .jpg, .jpeg, .svg)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = Preset::Screen)]
    pub preset: Preset,

    /// JSON file overriding preset render options
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub options: Option<PathBuf>,

    /// Division name used in the title (defaults to the file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Division kind for the print metadata: city, county, state, country or region
    #[arg(long)]
    pub kind: Option<AreaKind>,

    /// Region shown in the print metadata
    #[arg(long)]
    pub region: Option<String>,

    /// Country shown in the print metadata
    #[arg(long)]
    pub country: Option<String>,

    /// Population shown in the print metadata
    #[arg(long)]
    pub population: Option<u64>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

impl RenderArgs {
    /// True when any print metadata was given on the command line.
    pub fn has_metadata(&self) -> bool {
        self.kind.is_some() || self.region.is_some() || self.country.is_some() || self.population.is_some()
    }
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Division id as returned by `search`
    pub id: String,

    /// Output GeoJSON file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Base URL of the division service
    #[arg(long, env = "DIVISION_SERVER", default_value = "http://localhost:4000")]
    pub server: String,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Name to look up, e.g. "Travis"
    pub query: String,

    /// Base URL of the division service
    #[arg(long, env = "DIVISION_SERVER", default_value = "http://localhost:4000")]
    pub server: String,

    /// Exclude cities
    #[arg(long)]
    pub no_city: bool,

    /// Exclude states
    #[arg(long)]
    pub no_state: bool,

    /// Exclude counties
    #[arg(long)]
    pub no_county: bool,

    /// Restrict to a view box: west,south,east,north (e.g. -98.1,30.0,-97.5,30.6)
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<String>,
}
