use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pezzottify_recommender::config::{AppConfig, CliConfig, FileConfig, RecommendSettings};
use pezzottify_recommender::export::write_recommendations_csv;
use pezzottify_recommender::features::load_aligned;
use pezzottify_recommender::liked::LikedSet;
use pezzottify_recommender::search::SearchHit;
use pezzottify_recommender::{
    BruteForceIndex, CatalogSearch, Recommendation, RecommendationEngine,
};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the catalog CSV.
    #[clap(long, value_parser = parse_path)]
    pub catalog: Option<PathBuf>,

    /// Path to the feature matrix CSV.
    #[clap(long, value_parser = parse_path)]
    pub features: Option<PathBuf>,

    /// Optional TOML config, same format as the server's.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
enum InnerCommand {
    /// Finds tracks whose name or artist contains the query.
    Search { query: Vec<String> },

    /// Likes the n-th result of the last search.
    Like { number: usize },

    /// Shows the liked tracks.
    Likes,

    /// Forgets all liked tracks.
    Clear,

    /// Recommends tracks similar to the liked ones.
    Recommend { top_n: Option<usize> },

    /// Writes the last recommendations to a CSV file.
    Export { path: PathBuf },

    /// Close this program.
    #[command(alias = "quit")]
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

const PROMPT: &str = ">> ";

fn parse_line(line: &str) -> Result<InnerCommand, clap::Error> {
    let args =
        shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());
    InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)))
        .map(|cli| cli.command)
}

struct Session {
    engine: RecommendationEngine,
    search: CatalogSearch,
    settings: RecommendSettings,
    search_limit: usize,
    liked: LikedSet,
    last_hits: Vec<SearchHit>,
    last_recommendations: Vec<Recommendation>,
}

impl Session {
    fn execute_command(&mut self, line: String) -> CommandExecutionResult {
        if line.trim().is_empty() {
            return CommandExecutionResult::Ok;
        }

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                if e.print().is_err() {
                    println!("{}", e);
                }
                return CommandExecutionResult::Ok;
            }
        };

        println!("{} {}", PROMPT, &line);
        match command {
            InnerCommand::Search { query } => {
                let query = query.join(" ");
                self.last_hits = self.search.search(&query, self.search_limit);
                if self.last_hits.is_empty() {
                    println!("No matches found for \"{}\".", query);
                } else {
                    println!("Found {} matches for \"{}\":\n", self.last_hits.len(), query);
                    for (i, hit) in self.last_hits.iter().enumerate() {
                        println!("{:>4}. {}", i + 1, hit.label);
                    }
                }
            }
            InnerCommand::Like { number } => {
                let hit = match number.checked_sub(1).and_then(|i| self.last_hits.get(i)) {
                    Some(hit) => hit,
                    None => {
                        return CommandExecutionResult::Error(format!(
                            "No result number {}, the last search returned {}.",
                            number,
                            self.last_hits.len()
                        ))
                    }
                };
                if self.liked.add(hit.track_id.clone(), hit.label.clone()) {
                    println!("Liked {}", hit.label);
                } else {
                    println!("{} is already liked.", hit.label);
                }
            }
            InnerCommand::Likes => {
                if self.liked.is_empty() {
                    println!("No liked tracks yet.");
                }
                for label in self.liked.labels() {
                    println!("  {}", label);
                }
            }
            InnerCommand::Clear => {
                self.liked.clear();
                self.last_recommendations.clear();
                println!("Cleared liked tracks.");
            }
            InnerCommand::Recommend { top_n } => {
                if self.liked.is_empty() {
                    return CommandExecutionResult::Error(
                        "Like some tracks first.".to_string(),
                    );
                }
                let top_n = self.settings.clamp_top_n(top_n);
                let recommendations =
                    match self
                        .engine
                        .recommend(&self.liked.ids(), top_n, self.settings.pool_margin)
                    {
                        Ok(recommendations) => recommendations,
                        Err(err) => return CommandExecutionResult::Error(format!("{}", err)),
                    };
                if recommendations.is_empty() {
                    println!("No recommendations available.");
                }
                for r in recommendations.iter() {
                    println!(
                        "{:>3}. {} — {} ({:.4})",
                        r.rank, r.track_name, r.artist_name, r.distance
                    );
                }
                self.last_recommendations = recommendations;
            }
            InnerCommand::Export { path } => {
                if let Err(err) = self.export(&path) {
                    return CommandExecutionResult::Error(format!("{:#}", err));
                }
                println!(
                    "Wrote {} recommendations to {}",
                    self.last_recommendations.len(),
                    path.display()
                );
            }
            InnerCommand::Exit => return CommandExecutionResult::Exit,
        }
        CommandExecutionResult::Ok
    }

    fn export(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Could not create {:?}", path))?;
        write_recommendations_csv(file, &self.last_recommendations)
    }
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(" ") {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .map(|c| c.to_string())
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = cli_args.config.as_deref().map(FileConfig::load).transpose()?;
    let cli_config = CliConfig {
        catalog_path: cli_args.catalog,
        features_path: cli_args.features,
        ..Default::default()
    };
    let app_config = AppConfig::resolve(&cli_config, file_config)?;

    println!(
        "Cli Recommend loading catalog at {}...",
        app_config.catalog_path.display()
    );
    let (catalog, features) = load_aligned(&app_config.catalog_path, &app_config.features_path)?;
    let catalog = Arc::new(catalog);
    let features = Arc::new(features);

    let index = Arc::new(BruteForceIndex::new(
        features.clone(),
        app_config.recommend.metric,
    ));
    let mut session = Session {
        engine: RecommendationEngine::new(catalog.clone(), features, index),
        search: CatalogSearch::new(catalog),
        settings: app_config.recommend,
        search_limit: app_config.search.limit,
        liked: LikedSet::new(),
        last_hits: vec![],
        last_recommendations: vec![],
    };
    println!("Done!");

    InnerCli::command().print_long_help()?;

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(MyHelper::new()));

    loop {
        let readline = rl.readline(PROMPT);

        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match session.execute_command(line) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => {
                        break;
                    }
                    CommandExecutionResult::Error(err) => {
                        eprintln!("Error: {}", err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }
    Ok(())
}
