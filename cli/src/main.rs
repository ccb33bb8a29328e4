//! Ontograph CLI: compile ontology schemas to Cypher and run them on Neo4j
//!
//! Uses the ontograph-client session to talk to a running server.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use ontograph::cypher::{resolve_label, resolve_relationship_type};
use ontograph::ontology::seed::reference_dataset;
use ontograph::ontology::OntologyData;
use ontograph::store::{load_ontology, save_ontology};
use ontograph::{CompiledScript, OntographConfig, ScenarioCategory, ScenarioRules, SchemaCompiler};
use ontograph_client::{GraphClient, GraphSession, Neo4jHttpClient, RecordingClient};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ontograph", version, about = "Ontology schema compiler for Neo4j")]
struct Cli {
    /// Config file (YAML or JSON)
    #[arg(long, global = true, env = "ONTOGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Neo4j HTTP URL (overrides config)
    #[arg(long, global = true)]
    uri: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an ontology file into a Cypher script
    Compile {
        /// Ontology snapshot (JSON or YAML)
        #[arg(long)]
        schema: PathBuf,

        /// Write the script here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Leave out the example-instance comments
        #[arg(long)]
        no_examples: bool,
    },
    /// Show object and link types with their resolved graph names
    Inspect {
        #[arg(long)]
        schema: PathBuf,
    },
    /// Write the reference manufacturing dataset
    Seed {
        #[arg(long)]
        output: PathBuf,
    },
    /// Compile an ontology file and execute it
    Run {
        #[arg(long)]
        schema: PathBuf,

        /// Print the statements instead of sending them
        #[arg(long)]
        dry_run: bool,
    },
    /// Verify the Neo4j connection
    Ping,
    /// Run a what-if scenario through the rule table
    Simulate {
        /// Scenario name
        name: String,

        /// yield, supply-chain, utilization or general
        #[arg(long, default_value = "general")]
        category: String,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match OntographConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(uri) = &cli.uri {
        config.neo4j.uri = uri.clone();
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Compile {
            schema,
            output,
            no_examples,
        } => run_compile(&config, &schema, output.as_deref(), no_examples),
        Commands::Inspect { schema } => run_inspect(&schema, &cli.format),
        Commands::Seed { output } => run_seed(&output),
        Commands::Run { schema, dry_run } => run_execute(&config, &schema, dry_run).await,
        Commands::Ping => run_ping(&config).await,
        Commands::Simulate { name, category } => run_simulate(&name, &category, &cli.format),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn compile_file(
    config: &OntographConfig,
    schema: &Path,
    include_examples: bool,
) -> Result<CompiledScript, Box<dyn std::error::Error>> {
    let data = load_ontology(schema)?;
    let compiler = SchemaCompiler::new()
        .with_examples(include_examples && config.compiler.include_examples);
    let script = compiler.compile(&data.object_types, &data.link_types);
    for warning in &script.warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(script)
}

fn run_compile(
    config: &OntographConfig,
    schema: &Path,
    output: Option<&Path>,
    no_examples: bool,
) -> CliResult {
    let script = compile_file(config, schema, !no_examples)?;
    match output {
        Some(path) => {
            std::fs::write(path, script.render())?;
            println!(
                "Wrote {} statements to {}",
                script.statements.len(),
                path.display()
            );
        }
        None => print!("{}", script.render()),
    }
    Ok(())
}

fn run_inspect(schema: &Path, format: &OutputFormat) -> CliResult {
    let data = load_ontology(schema)?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    print_object_types(&data);
    println!();
    print_link_types(&data);
    Ok(())
}

fn print_object_types(data: &OntologyData) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Object type", "Label", "Properties", "Source"]);

    for obj in &data.object_types {
        let label = resolve_label(obj).unwrap_or_else(|e| format!("<{}>", e));
        let props: Vec<&str> = obj.properties.iter().map(|p| p.name.as_str()).collect();
        table.add_row(vec![
            obj.name.clone(),
            label,
            props.join(", "),
            obj.source.to_string(),
        ]);
    }

    println!("{}", table);
    println!("{} object type(s)", data.object_types.len());
}

fn print_link_types(data: &OntologyData) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Link type", "Relationship", "From", "To", "Bidirectional"]);

    for link in &data.link_types {
        let rel = resolve_relationship_type(link).unwrap_or_else(|e| format!("<{}>", e));
        table.add_row(vec![
            link.name.clone(),
            rel,
            link.from_type.clone(),
            link.to_type.clone(),
            link.bidirectional.to_string(),
        ]);
    }

    println!("{}", table);
    println!("{} link type(s)", data.link_types.len());
}

fn run_seed(output: &Path) -> CliResult {
    let data = reference_dataset();
    save_ontology(output, &data)?;
    println!(
        "Wrote {} object types, {} link types and {} property types to {}",
        data.object_types.len(),
        data.link_types.len(),
        data.property_types.len(),
        output.display()
    );
    Ok(())
}

async fn execute<C: GraphClient>(
    client: C,
    script: &str,
    timeout: Duration,
) -> Result<GraphSession<C>, Box<dyn std::error::Error>> {
    let session = GraphSession::connect(client, timeout).await?;
    let summary = session.run_script(script).await?;
    println!("Executed {} statement(s)", summary.executed);
    Ok(session)
}

async fn run_execute(config: &OntographConfig, schema: &Path, dry_run: bool) -> CliResult {
    let script = compile_file(config, schema, true)?;
    let text = script.render();
    let timeout = Duration::from_millis(config.neo4j.timeout_ms);

    if dry_run {
        let session = execute(RecordingClient::new(), &text, timeout).await?;
        for (i, statement) in session.client().statements().iter().enumerate() {
            println!("-- [{}]\n{}", i, statement);
        }
        session.disconnect().await?;
    } else {
        let client = Neo4jHttpClient::new(&config.neo4j)?;
        let session = execute(client, &text, timeout).await?;
        session.disconnect().await?;
    }

    Ok(())
}

async fn run_ping(config: &OntographConfig) -> CliResult {
    let client = Neo4jHttpClient::new(&config.neo4j)?;
    let session =
        GraphSession::connect(client, Duration::from_millis(config.neo4j.timeout_ms)).await?;
    let server = session.server();
    println!(
        "Connected to {} (version {}, edition {})",
        server.address,
        server.version.as_deref().unwrap_or("unknown"),
        server.edition.as_deref().unwrap_or("unknown")
    );
    session.disconnect().await?;
    Ok(())
}

fn run_simulate(name: &str, category: &str, format: &OutputFormat) -> CliResult {
    let category: ScenarioCategory = category.parse()?;
    let rules = ScenarioRules::standard();
    let scenario = rules
        .simulate(name, category, HashMap::new())
        .ok_or("no rule for scenario category")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&scenario)?),
        OutputFormat::Table => {
            println!("Scenario:        {} ({})", scenario.name, scenario.category);
            println!("Efficiency gain: {:.1}%", scenario.prediction.efficiency_gain);
            println!("Cost reduction:  {:.0}M / month", scenario.prediction.cost_reduction);
            println!("Risk score:      {:.0}", scenario.prediction.risk_score);
            println!("Recommendation:  {}", scenario.recommendation);
        }
    }
    Ok(())
}
