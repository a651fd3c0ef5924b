//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, Subcommand};

use crate::domain::entities::category::DEFAULT_CATEGORY_COLOR;

/// スターしたリポジトリを分類・検索するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "stargazer")]
#[command(about = "Categorize and search starred repositories", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = "./.stargazer/config.json")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List starred repositories
    List {
        /// Search by name, owner or description
        #[arg(short, long, default_value = "")]
        query: String,

        /// Category id, or "all"
        #[arg(long, default_value = "all")]
        category: String,
    },

    /// Show categories with repository counts
    Categories,

    /// Create a category
    AddCategory {
        name: String,

        #[arg(long, default_value = DEFAULT_CATEGORY_COLOR)]
        color: String,
    },

    /// Categorize a repository that was just starred
    Star {
        /// Repository URL (https://github.com/<owner>/<name>)
        url: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        stars: Option<u64>,

        #[command(flatten)]
        choice: CategoryChoice,
    },

    /// Categorize a simulated star (demo data)
    Simulate {
        #[command(flatten)]
        choice: CategoryChoice,
    },

    /// Change the category of a tracked repository
    Edit {
        /// Repository id (owner/name)
        id: String,

        #[command(flatten)]
        choice: CategoryChoice,
    },

    /// Stop tracking a repository
    Remove {
        /// Repository id (owner/name)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// 分類ダイアログへの入力
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryChoice {
    /// Existing category id
    #[arg(long, conflicts_with = "new_category")]
    pub category: Option<String>,

    /// Create a new category with this name
    #[arg(long)]
    pub new_category: Option<String>,

    /// Color for the new category (#rgb or #rrggbb)
    #[arg(long, requires = "new_category")]
    pub color: Option<String>,

    /// Ask Gemini for a category first
    #[arg(long)]
    pub suggest: bool,
}
