//! Command-line front end.
//!
//! Settings come from three layers: built-in defaults, an optional TOML
//! file, then command-line flags. Later layers win.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::fares::{ResolutionError, RouteFares};
use crate::loader::LoadError;
use crate::matcher::{ConfigError, MatchConfig, MatchMode, Scorer};
use crate::share::{self, DEFAULT_SUBJECT, DEFAULT_TITLE, NO_FARES};
use crate::store::{TariffSnapshot, TariffSource};

/// Look up interurban bus fares between two places.
///
/// Place names may be misspelled, unaccented or in any case; each is
/// matched against the places in the tariff table (or a gazetteer). Fares
/// are listed for both directions of travel.
///
/// Examples:
///   tariff-lookup --table tarifario.csv cordoba "jesus maria"
///   tariff-lookup --config tarifas.toml --mode top-k "san marcos" cosquin
#[derive(Debug, Parser)]
#[command(name = "tariff-lookup", version, about, long_about = None)]
pub struct Cli {
    /// Origin place name
    pub origin: String,

    /// Destination place name
    pub destination: String,

    /// Tariff table (.csv or .json)
    #[arg(long, short)]
    pub table: Option<PathBuf>,

    /// Gazetteer CSV of canonical place names
    #[arg(long, short)]
    pub locations: Option<PathBuf>,

    /// TOML settings file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Start from a named matching preset instead of the file's settings
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Matching mode: exact, best or top-k
    #[arg(long)]
    pub mode: Option<MatchMode>,

    /// Minimum similarity, 0.0-1.0 or 0-100
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// Candidates per side in top-k mode
    #[arg(long)]
    pub k: Option<usize>,

    /// Similarity function: ratio, token-sort or weighted
    #[arg(long)]
    pub scorer: Option<Scorer>,

    /// Allow origin and destination to resolve to the same place
    #[arg(long)]
    pub allow_same_location: bool,

    /// Print a share message with WhatsApp and e-mail links
    #[arg(long)]
    pub share: bool,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "share")]
    pub json: bool,

    /// Log matching details to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

/// Named matching configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Conservative,
    Permissive,
    Ranked,
}

impl Preset {
    pub fn config(self) -> MatchConfig {
        match self {
            Preset::Conservative => MatchConfig::conservative(),
            Preset::Permissive => MatchConfig::permissive(),
            Preset::Ranked => MatchConfig::ranked(),
        }
    }
}

/// Errors that end the program before or instead of a lookup.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    #[error("invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid matching settings: {0}")]
    Config(#[from] ConfigError),

    #[error("no tariff table given (use --table or set `table` in the settings file)")]
    MissingTable,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("cannot encode result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write output: {0}")]
    Output(#[source] io::Error),
}

/// Contents of a TOML settings file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub table: Option<PathBuf>,
    pub locations: Option<PathBuf>,
    pub title: Option<String>,
    pub matching: MatchConfig,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn parse(text: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a file.
    ///
    /// Relative table and gazetteer paths are taken relative to the
    /// settings file's directory.
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::parse(&text)?;

        if let Some(dir) = path.parent() {
            settings.table = settings.table.map(|p| dir.join(p));
            settings.locations = settings.locations.map(|p| dir.join(p));
        }
        Ok(settings)
    }

    /// Apply command-line overrides.
    pub fn merge(mut self, cli: &Cli) -> Self {
        if let Some(table) = &cli.table {
            self.table = Some(table.clone());
        }
        if let Some(locations) = &cli.locations {
            self.locations = Some(locations.clone());
        }
        if let Some(preset) = cli.preset {
            self.matching = preset.config();
        }
        if let Some(mode) = cli.mode {
            self.matching.mode = mode;
        }
        if let Some(cutoff) = cli.cutoff {
            self.matching.cutoff = cutoff;
        }
        if let Some(k) = cli.k {
            self.matching.k = k;
        }
        if let Some(scorer) = cli.scorer {
            self.matching.scorer = scorer;
        }
        if cli.allow_same_location {
            self.matching.reject_same_location = false;
        }
        self
    }

    /// Where to load tariff data from.
    pub fn source(&self) -> Result<TariffSource, CliError> {
        let table = self.table.clone().ok_or(CliError::MissingTable)?;
        let source = TariffSource::new(table);
        Ok(match &self.locations {
            Some(locations) => source.with_locations(locations),
            None => source,
        })
    }
}

/// How a run ended when nothing went wrong with setup or loading.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Both places resolved; the result may still list no fares
    Found(RouteFares),
    /// The query could not be answered as asked
    Rejected(ResolutionError),
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise info level, or debug when
/// `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "tariff_lookup=debug,info"
    } else {
        "tariff_lookup=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// Load settings and data, run the lookup, and write the result to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<Outcome, CliError> {
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    }
    .merge(cli);
    settings.matching.validate()?;
    debug!(matching = ?settings.matching, "effective settings");

    let snapshot = TariffSnapshot::load(&settings.source()?)?;
    let route = match snapshot.lookup(&cli.origin, &cli.destination, &settings.matching) {
        Ok(route) => route,
        Err(e) => return Ok(Outcome::Rejected(e)),
    };

    let text = if cli.json {
        let mut json = serde_json::to_string_pretty(&route)?;
        json.push('\n');
        json
    } else if cli.share {
        let title = settings.title.as_deref().unwrap_or(DEFAULT_TITLE);
        render_share(&route, title)
    } else {
        render_text(&route)
    };
    out.write_all(text.as_bytes()).map_err(CliError::Output)?;

    Ok(Outcome::Found(route))
}

/// Human-readable listing of a lookup result.
pub fn render_text(route: &RouteFares) -> String {
    let origin = route.origin.name().unwrap_or(&route.origin.query);
    let destination = route
        .destination
        .name()
        .unwrap_or(&route.destination.query);

    let mut out = format!("{origin} ↔ {destination}\n");
    for side in [&route.origin, &route.destination] {
        if side.score < 1.0 {
            out.push_str(&format!(
                "  (\"{}\" → {}, {:.0}%)\n",
                side.query,
                side.name().unwrap_or("?"),
                side.score * 100.0
            ));
        }
    }

    if route.fares.is_empty() {
        out.push_str(NO_FARES);
        out.push('\n');
        return out;
    }

    let carrier_width = width(route.fares.iter().map(|r| r.carrier.as_str()));
    let modality_width = width(route.fares.iter().map(|r| r.modality.as_str()));
    for record in &route.fares {
        out.push_str(&format!(
            "  {:carrier_width$}  {:modality_width$}  {:>14}",
            record.carrier,
            record.modality,
            record.fare.to_string()
        ));
        if let Some(km) = record.distance_km {
            out.push_str(&format!("  {km} km"));
        }
        out.push('\n');
    }
    out
}

fn width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|c| c.chars().count()).max().unwrap_or(0)
}

fn render_share(route: &RouteFares, title: &str) -> String {
    let message = share::share_message(route, title);
    format!(
        "{message}\nWhatsApp: {}\nE-mail: {}\n",
        share::whatsapp_link(&message),
        share::mailto_link(DEFAULT_SUBJECT, &message)
    )
}
