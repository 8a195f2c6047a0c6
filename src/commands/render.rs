use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};

use crate::cli::{Preset, RenderArgs};
use crate::io::{fs::assert_not_stdout, parse_geometry};
use crate::render::{RenderOptions, TextItem};
use crate::viewer::export::{generated_line, outline_annotations, print_annotations, print_page, render_to_file};
use crate::viewer::{OutputFormat, SelectedArea};

pub fn run(cli: &crate::cli::Cli, args: &RenderArgs) -> Result<()> {
    assert_not_stdout(&args.output)?;
    let format = OutputFormat::from_path(&args.output)?;

    let bytes = std::fs::read(&args.geojson)
        .with_context(|| format!("[render] Failed to read {}", args.geojson.display()))?;
    let geometry = parse_geometry(&bytes)
        .with_context(|| format!("[render] {} is not a Polygon or MultiPolygon", args.geojson.display()))?;

    let name = args.name.clone().unwrap_or_else(|| {
        args.geojson.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
    });

    let mut options = match args.preset {
        Preset::Screen => RenderOptions::screen(),
        Preset::Print => RenderOptions::print(),
    };
    if let Some(path) = &args.options {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("[render] Failed to read options {}", path.display()))?;
        options = merge_options(&options, &text)
            .with_context(|| format!("[render] Invalid options in {}", path.display()))?;
    }

    let annotations = match args.preset {
        Preset::Screen => outline_annotations(&name),
        Preset::Print => print_metadata(args, &name, Local::now().naive_local()),
    };

    if cli.verbose > 0 {
        eprintln!(
            "[render] {} ({}, {} ring(s)) preset={:?} -> {}",
            args.geojson.display(),
            geometry.type_name(),
            geometry.num_rings(),
            args.preset,
            args.output.display()
        );
    }

    let (path, layout) = render_to_file(&geometry, &options, &annotations, &args.output, format, args.force)?;

    if cli.verbose > 1 {
        eprintln!(
            "[render] fit={:?} rect={:.1}x{:.1} at ({:.1}, {:.1})",
            layout.fit, layout.rect.width, layout.rect.height, layout.rect.offset_x, layout.rect.offset_y
        );
    }
    println!("Rendered {} -> {}", name, path.display());
    Ok(())
}

/// Full metadata block when any detail was given; otherwise title and timestamp only.
fn print_metadata(args: &RenderArgs, name: &str, generated: NaiveDateTime) -> Vec<TextItem> {
    if !args.has_metadata() {
        return print_page(name, vec![generated_line(generated)]);
    }
    let area = SelectedArea {
        id: String::new(),
        name: name.to_string(),
        kind: args.kind.unwrap_or_default(),
        region: args.region.clone().unwrap_or_default(),
        country: args.country.clone(),
        population: args.population,
        admin_level: None,
        geometry: None,
    };
    print_annotations(&area, generated)
}

/// Overlay a partial JSON options document on top of a preset.
fn merge_options(base: &RenderOptions, overrides: &str) -> Result<RenderOptions> {
    let mut value = serde_json::to_value(base)?;
    let patch: serde_json::Value = serde_json::from_str(overrides)?;
    merge_json(&mut value, patch);
    Ok(serde_json::from_value(value)?)
}

fn merge_json(target: &mut serde_json::Value, patch: serde_json::Value) {
    match (target, patch) {
        (serde_json::Value::Object(target), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                merge_json(target.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (target, patch) => *target = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Rgb;

    #[test]
    fn overrides_apply_on_top_of_the_preset() {
        let options = merge_options(&RenderOptions::print(), r##"{"stroke": {"color": "#336699"}, "layout": {"padding": 0.05}}"##).unwrap();
        assert_eq!(options.canvas_width, 2550.0);
        assert_eq!(options.layout.insets.top, 300.0);
        assert_eq!(options.layout.padding, 0.05);
        assert_eq!(options.stroke.color, Rgb::new(0x33, 0x66, 0x99));
        assert_eq!(options.stroke.line_width, 3.0);
    }

    fn args(extra: &[&str]) -> RenderArgs {
        use clap::Parser;

        let mut argv = vec!["division-outline", "render", "area.geojson", "-o", "out.jpg", "--preset", "print"];
        argv.extend_from_slice(extra);
        match crate::cli::Cli::parse_from(argv).command {
            crate::cli::Commands::Render(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn generated() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap().and_hms_opt(8, 0, 0).unwrap()
    }

    #[test]
    fn print_without_details_has_no_invented_metadata() {
        let items = print_metadata(&args(&[]), "Austin", generated());
        let texts = items.iter().map(|t| t.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["Austin - Boundary Map", "Generated: 1/2/2025 at 8:00:00 AM"]);
    }

    #[test]
    fn print_details_come_from_arguments() {
        let items = print_metadata(&args(&["--kind", "city", "--region", "US-TX", "--population", "961855"]), "Austin", generated());
        let texts = items.iter().map(|t| t.text.as_str()).collect::<Vec<_>>();
        assert_eq!(&texts[1..5], &["Type: City", "Region: US-TX", "Country: N/A", "Population: 961,855"]);
    }

    #[test]
    fn malformed_overrides_are_rejected() {
        assert!(merge_options(&RenderOptions::screen(), "{").is_err());
        assert!(merge_options(&RenderOptions::screen(), r#"{"scale": "big"}"#).is_err());
    }
}
