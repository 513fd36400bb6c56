use std::{fs, io::{self, BufRead, Write}, path::{Path, PathBuf}, time::Instant};

use anyhow::{bail, Context};
use clap::Parser;
use faq_matcher::{AppConfig, ChatPayload, ChatResponse, FaqChatbot};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "faq-matcher", about = "Answer questions from an FAQ corpus with TF-IDF matching")]
struct Args {
    /// FAQ corpus file (.json or .toml), overrides the config file
    #[arg(short, long)]
    corpus: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Similarity threshold, overrides the config file
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Answer a single question and exit
    #[arg(short, long)]
    query: Option<String>,

    /// Answer every line of a file in parallel
    #[arg(long, value_name = "FILE")]
    batch: Option<PathBuf>,

    /// List the FAQ entries related to a query
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Maximum number of search results
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Print corpus and vocabulary statistics
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// Print replies as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("faq_matcher=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(args: &Args) -> anyhow::Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(corpus) = &args.corpus {
        config.corpus_path = Some(corpus.clone());
    }
    if let Some(threshold) = args.threshold {
        config.chat.similarity_threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    let config = load_config(&args)?;
    let start = Instant::now();
    let bot = FaqChatbot::from_config(&config).context("building chatbot")?;
    info!(
        faqs = bot.corpus().len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "chatbot ready"
    );

    if args.stats {
        println!("{}", serde_json::to_string_pretty(&bot.statistics())?);
    } else if let Some(query) = &args.search {
        run_search(&bot, query, args.limit, args.json)?;
    } else if let Some(path) = &args.batch {
        run_batch(&bot, path, args.json)?;
    } else if let Some(query) = &args.query {
        if args.json {
            println!("{}", serde_json::to_string(&bot.payload(query)?)?);
        } else {
            print_response(&bot.get_response(query)?, false)?;
        }
    } else {
        run_interactive(&bot, args.json)?;
    }
    Ok(())
}

fn print_response(response: &ChatResponse, json: bool) -> anyhow::Result<()> {
    if json {
        let payload = ChatPayload::from(response.clone());
        println!("{}", serde_json::to_string(&payload)?);
        return Ok(());
    }
    println!("{}", response.answer);
    match &response.matched_question {
        Some(question) => eprintln!("[match] {:.4}\t{}", response.confidence, question),
        None => eprintln!("[no match] best {:.4}", response.confidence),
    }
    if let Some(debug) = &response.debug_info {
        eprintln!("[query] terms: {}", debug.processed_question);
        for candidate in &debug.top_matches {
            eprintln!("{:.6}\t{}\t{}", candidate.similarity, candidate.index, candidate.question);
        }
    }
    Ok(())
}

fn run_search(bot: &FaqChatbot, query: &str, limit: usize, json: bool) -> anyhow::Result<()> {
    let results = bot.search_faqs(query, limit)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }
    if results.is_empty() {
        eprintln!("[info] no related questions");
    }
    for hit in &results {
        println!("{:.6}\t{}\t{}", hit.similarity, hit.index, hit.question);
    }
    Ok(())
}

fn run_batch(bot: &FaqChatbot, path: &Path, json: bool) -> anyhow::Result<()> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let questions: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if questions.is_empty() {
        bail!("{} contains no questions", path.display());
    }

    let start = Instant::now();
    let responses = bot.answer_batch(&questions);
    info!(
        questions = questions.len(),
        threads = rayon::current_num_threads(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "batch answered"
    );
    for (question, response) in questions.iter().zip(responses) {
        let response = response?;
        if json {
            println!("{}", serde_json::to_string(&ChatPayload::from(response))?);
        } else {
            println!(
                "{:.6}\t{}\t{}",
                response.confidence,
                question,
                response.matched_question.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}

fn run_interactive(bot: &FaqChatbot, json: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Query> ");
        stdout.flush()?;
        let Some(line) = lines.next() else { break };
        let line = line.context("reading stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        let start = Instant::now();
        let response = bot.get_response(trimmed)?;
        print_response(&response, json)?;
        eprintln!("[time] {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
    }
    eprintln!("[info] bye");
    Ok(())
}
