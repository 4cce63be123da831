//! Command-line front end for the memo store.
//!
//! # Responsibility
//! - Resolve configuration, open the store and run one memo operation.
//! - Print results; the data access layer logs failures itself.

use clap::{Parser, Subcommand};
use log::info;
use memo_core::{
    core_version, derive_preview, init_logging, Category, CategoryBadge, Memo, MemoConfig,
    MemoId, MemoService, MemoStore, ViewerOptions, ViewerView, CATEGORY_FILTER_ALL,
};
use std::process::ExitCode;

const LIST_PREVIEW_CHARS: usize = 60;

/// Command-line options for the memo CLI.
#[derive(Parser)]
#[command(name = "memo", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List memos, newest first
    List {
        /// Category code, or `all`
        #[arg(long, default_value = CATEGORY_FILTER_ALL)]
        category: String,
    },
    /// Create a memo
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long, default_value = "other")]
        category: String,
        /// Repeat for multiple tags
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Print one memo as viewer HTML
    Show { id: MemoId },
    /// Overwrite fields of an existing memo
    Edit {
        id: MemoId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Replaces all tags when given
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
    },
    /// Delete one memo
    Rm { id: MemoId },
    /// Search title, content and tags
    Search { query: String },
    /// Delete every memo
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match MemoConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let store = match config.open_store() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("store error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if run(MemoService::new(store), cli.command).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run<S: MemoStore>(service: MemoService<S>, command: Command) -> bool {
    match command {
        Command::List { category } => {
            print_list(&service.list_by_category(&category).await);
            true
        }
        Command::Add {
            title,
            content,
            category,
            tags,
        } => {
            let mut memo = Memo::new(title, content, Category::Other, tags);
            memo.category = category;
            report(service.create(&memo).await, "create")
        }
        Command::Show { id } => match service.get_by_id(id).await {
            Some(memo) => {
                println!("{}", ViewerView::build(&memo, &ViewerOptions::default()).to_html());
                true
            }
            None => {
                eprintln!("memo {id} not found");
                false
            }
        },
        Command::Edit {
            id,
            title,
            content,
            category,
            tags,
        } => {
            let Some(mut memo) = service.get_by_id(id).await else {
                eprintln!("memo {id} not found");
                return false;
            };
            if let Some(title) = title {
                memo.title = title;
            }
            if let Some(content) = content {
                memo.content = content;
            }
            if let Some(category) = category {
                memo.category = category;
            }
            if let Some(tags) = tags {
                memo.tags = tags;
            }
            report(service.update(&memo).await, "update")
        }
        Command::Rm { id } => {
            let ok = service.remove(id).await;
            println!("{}", if ok { "removed" } else { "remove failed" });
            ok
        }
        Command::Search { query } => {
            print_list(&service.search(&query).await);
            true
        }
        Command::Clear { yes } => {
            if !yes {
                eprintln!("refusing to clear without --yes");
                return false;
            }
            let ok = service.clear_all().await;
            println!("{}", if ok { "cleared" } else { "clear failed" });
            ok
        }
    }
}

fn report(memo: Option<Memo>, action: &str) -> bool {
    match memo {
        Some(memo) => {
            println!("{}", memo.id);
            true
        }
        None => {
            eprintln!("{action} failed");
            false
        }
    }
}

fn print_list(memos: &[Memo]) {
    for memo in memos {
        let badge = CategoryBadge::for_code(&memo.category);
        let preview = derive_preview(&memo.content, LIST_PREVIEW_CHARS).unwrap_or_default();
        println!("{}  [{}]  {}  {}", memo.id, badge.label, memo.title, preview);
    }
}
