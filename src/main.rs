use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use lumi_locator::advisor::{self, CommandAdvisor};
use lumi_locator::dom::{extract, Document, TagUniverse};
use lumi_locator::locator::{filter_min_stability, generate_locators, Framework, StabilityLabel};
use lumi_locator::report::{self, markdown, ExportOptions};
use lumi_locator::source::DocumentSource;
use lumi_locator::validate::{apply_validation, StaticMatchCounter};
use lumi_locator::{page_object, utils::ScanConfig};

#[derive(Parser)]
#[command(name = "lumi-locator")]
#[command(author = "NL Team")]
#[command(version = "0.1.3")]
#[command(about = "Generate stable web locators and Page Objects from HTML", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate locators, Page Objects and reports
    Generate {
        /// HTML file, URL or inline HTML
        input: String,

        /// Target framework(s): playwright, selenium or both
        #[arg(short, long, default_value = "both")]
        framework: String,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Page Object class name
        #[arg(short, long, default_value = "Page")]
        class_name: String,

        /// Drop locators below this stability (High, Medium, Low)
        #[arg(long)]
        min_stability: Option<StabilityLabel>,

        /// Scan all structural elements, not only interactive ones
        #[arg(long, default_value = "false")]
        all_elements: bool,

        /// Also emit partial-match and parent-anchored XPath variants
        #[arg(long, default_value = "false")]
        dynamic_xpaths: bool,

        /// Count matches of every locator against the document
        #[arg(long, default_value = "false")]
        validate: bool,

        /// Shell command that receives advisor prompts on stdin
        #[arg(long)]
        advisor_cmd: Option<String>,

        /// YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the extracted elements
    Scan {
        /// HTML file, URL or inline HTML
        input: String,

        /// Scan all structural elements, not only interactive ones
        #[arg(long, default_value = "false")]
        all_elements: bool,

        /// Print a Markdown table instead of JSON
        #[arg(long, default_value = "false")]
        markdown: bool,
    },

    /// Generate a Page Object from an existing locators.json
    PageObject {
        /// Path to locators.json
        locators: PathBuf,

        /// Target framework (playwright, selenium)
        #[arg(short, long)]
        framework: Framework,

        /// Page Object class name
        #[arg(short, long, default_value = "Page")]
        class_name: String,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Generate {
            input,
            framework,
            output,
            class_name,
            min_stability,
            all_elements,
            dynamic_xpaths,
            validate,
            advisor_cmd,
            config,
        } => {
            let frameworks = Framework::parse_list(&framework)?;

            let mut scan_config = match &config {
                Some(path) => ScanConfig::load(path)?,
                None => ScanConfig::default(),
            };
            if all_elements {
                scan_config.tag_universe = TagUniverse::All;
            }
            if dynamic_xpaths {
                scan_config.include_dynamic_xpaths = true;
            }
            if min_stability.is_some() {
                scan_config.min_stability = min_stability;
            }

            let source = DocumentSource::detect(&input);
            println!(
                "{} Generating locators from: {}",
                "▶".green().bold(),
                source.describe().cyan()
            );
            let names: Vec<&str> = frameworks.iter().map(|f| f.as_str()).collect();
            println!("  Frameworks: {}", names.join(", ").cyan());
            println!("  Elements: {}", scan_config.tag_universe.to_string().cyan());
            if let Some(min) = scan_config.min_stability {
                println!("  Min stability: {}", min.to_string().yellow());
            }
            println!("  Output: {}", output.display().to_string().cyan());

            let html = source.load().await?;
            let generation = generate_locators(&html, &scan_config);
            let mut locators = generation.locators;

            if let Some(min) = scan_config.min_stability {
                let before = locators.len();
                locators = filter_min_stability(locators, min);
                println!(
                    "{} Kept {} of {} locators at {} or better",
                    "ℹ".blue(),
                    locators.len(),
                    before,
                    min
                );
            }

            if validate {
                println!("{} Validating locators...", "🔍".to_string().blue());
                if source.is_url() {
                    println!(
                        "  {}",
                        "Counting against the fetched HTML; scripts are not run".yellow()
                    );
                }
                let counter = StaticMatchCounter::new(&html);
                apply_validation(&mut locators, &counter);
                let unique = locators.iter().filter(|c| c.validated == Some(true)).count();
                println!("  Unique matches: {}/{}", unique, locators.len());
            }

            let enrichment = match advisor_cmd {
                Some(cmd) => {
                    println!("{} Requesting advisor enrichment...", "🤖".to_string().blue());
                    let advisor = CommandAdvisor::new(cmd);
                    Some(advisor::enrich(&advisor, &html, &locators).await)
                }
                None => None,
            };

            let mut written =
                page_object::write_page_objects(&locators, &frameworks, &class_name, &output)?;

            let options = ExportOptions {
                source: source.describe(),
                frameworks,
                min_stability: scan_config.min_stability,
                validated: validate,
                class_name,
            };
            let export = report::build_export(&generation.elements, locators, &options, enrichment);
            written.extend(report::write_exports(&export, &output)?);

            let stability = &export.summary.stability;
            println!(
                "{} {} elements, {} locators (High {}, Medium {}, Low {})",
                "✅".green(),
                export.metadata.total_elements,
                export.metadata.total_locators,
                stability.high.to_string().green(),
                stability.medium.to_string().yellow(),
                stability.low.to_string().red()
            );
            for path in written {
                println!("  {} {}", "📄".to_string().blue(), path.display());
            }
        }

        Commands::Scan {
            input,
            all_elements,
            markdown: as_markdown,
        } => {
            let universe = if all_elements {
                TagUniverse::All
            } else {
                TagUniverse::Interactive
            };
            let source = DocumentSource::detect(&input);
            let html = source.load().await?;
            let elements = extract(&Document::parse(&html), universe);

            if as_markdown {
                print!("{}", markdown::element_table(&elements));
            } else {
                println!("{}", serde_json::to_string_pretty(&elements)?);
            }
        }

        Commands::PageObject {
            locators,
            framework,
            class_name,
            output,
        } => {
            let candidates = report::json::read_locators(&locators)?;

            match output {
                Some(path) => {
                    page_object::write_page_object(&candidates, framework, &class_name, &path)?;
                    println!(
                        "{} {} Page Object saved to: {}",
                        "✅".green(),
                        framework.to_string().cyan(),
                        path.display()
                    );
                }
                None => print!("{}", page_object::render(&candidates, framework, &class_name)),
            }
        }
    }

    Ok(())
}
