//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{bail, Context, Result};
use chrono::Utc;
use dialoguer::Confirm;
use log::{debug, info};

use std::sync::Arc;

use crate::adapter::capture::{simulated_star, StarCapture};
use crate::adapter::config::Config;
use crate::adapter::gemini::GeminiSuggester;
use crate::adapter::repositories::json_state_repository::JsonStateRepository;
use crate::application::dto::repo_card::RepoCard;
use crate::application::use_cases::browse_repos::BrowseReposUseCase;
use crate::application::use_cases::categorize_repo::{CategorizeDialog, SuggestionOutcome};
use crate::application::use_cases::state_container::StateContainer;
use crate::domain::entities::category::Category;
use crate::domain::entities::repo::RepoDraft;
use crate::domain::repositories::category_suggester::CategorySuggester;
use crate::domain::repositories::state_repository::StateRepository;
use crate::domain::services::repo_filter::CategoryFilter;

use super::cli::{Args, CategoryChoice, Command};

pub const REMOVE_PROMPT: &str = "Are you sure you want to stop tracking this repo?";

/// 破壊的操作の確認
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// 端末での確認（デフォルトは「いいえ」）
pub struct TerminalPrompt;

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .context("Failed to read confirmation")
    }
}

/// Render one line pair of the repository list.
pub fn render_card(card: &RepoCard) -> String {
    let repo = &card.repo;
    let description = if repo.description.is_empty() {
        "No description provided."
    } else {
        &repo.description
    };

    format!(
        "{}  [{}]  ★ {}  {}\n    {}",
        repo.full_name(),
        card.badge.label(),
        repo.stars,
        repo.language.as_deref().unwrap_or("-"),
        description
    )
}

/// Stargazer Workflow
pub struct StargazerWorkflow {
    state_repository: Arc<dyn StateRepository>,
    suggester: Arc<dyn CategorySuggester>,
    prompt: Box<dyn ConfirmPrompt>,
}

impl StargazerWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: &Config) -> Self {
        let state_repository = JsonStateRepository::detect(config);
        info!("Storage scope: {:?}", state_repository.scope());

        let suggester = GeminiSuggester::from_config(config);
        if !suggester.is_enabled() {
            info!("No Gemini API key configured, suggestions are disabled");
        }

        Self::with_dependencies(
            Arc::new(state_repository),
            Arc::new(suggester),
            Box::new(TerminalPrompt),
        )
    }

    pub fn with_dependencies(
        state_repository: Arc<dyn StateRepository>,
        suggester: Arc<dyn CategorySuggester>,
        prompt: Box<dyn ConfirmPrompt>,
    ) -> Self {
        Self {
            state_repository,
            suggester,
            prompt,
        }
    }

    /// Execute a command and wait for its writes
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting stargazer...");

        let mut container = StateContainer::load(Arc::clone(&self.state_repository))
            .await
            .context("Failed to load stored state")?;
        debug!(
            "Loaded {} categories, {} repos",
            container.categories().len(),
            container.repos().len()
        );

        let result = self.run(args.command, &mut container).await;

        // コマンドが失敗しても、それまでの変更は保存する
        container.flush().await.context("Failed to save state")?;

        result
    }

    async fn run(&self, command: Command, container: &mut StateContainer) -> Result<()> {
        match command {
            Command::List { query, category } => {
                self.list(container, &query, &category);
                Ok(())
            }
            Command::Categories => {
                self.categories(container);
                Ok(())
            }
            Command::AddCategory { name, color } => {
                let category = Category::mint(name.trim(), color);
                container
                    .add_category(category.clone())
                    .context("Failed to create category")?;
                println!("✓ Created category {} ({})", category.name, category.id);
                Ok(())
            }
            Command::Star {
                url,
                description,
                language,
                stars,
                choice,
            } => {
                let mut draft = StarCapture::from_url(&url, &description)?.into_draft();
                draft.language = language;
                if stars.is_some() {
                    draft.stars = stars;
                }
                self.categorize(draft, choice, container).await
            }
            Command::Simulate { choice } => {
                let draft = simulated_star(Utc::now());
                self.categorize(draft, choice, container).await
            }
            Command::Edit { id, choice } => {
                let repo = container
                    .state()
                    .repo(&id)
                    .cloned()
                    .with_context(|| format!("Repository not found: {}", id))?;
                self.categorize(RepoDraft::from(repo), choice, container)
                    .await
            }
            Command::Remove { id, yes } => self.remove(container, &id, yes),
        }
    }

    fn list(&self, container: &StateContainer, query: &str, category: &str) {
        let mut browse = BrowseReposUseCase::with_criteria(query, CategoryFilter::parse(category));
        let cards = browse.cards(container.state(), container.revision());

        if cards.is_empty() {
            println!("No repositories found");
            println!("  Try adjusting your filters or search query.");
            return;
        }

        println!(
            "✓ {} of {} repositories (category: {})",
            cards.len(),
            container.repos().len(),
            browse.filter()
        );
        for card in &cards {
            println!("{}", render_card(card));
        }
    }

    fn categories(&self, container: &StateContainer) {
        println!("All Stars ({})", container.repos().len());
        for summary in BrowseReposUseCase::category_summaries(container.state()) {
            println!(
                "  {} ({})  {}  [{}]",
                summary.category.name,
                summary.repo_count,
                summary.category.color,
                summary.category.id
            );
        }
    }

    /// 分類ダイアログを開き、フラグの内容で送信する
    async fn categorize(
        &self,
        draft: RepoDraft,
        choice: CategoryChoice,
        container: &mut StateContainer,
    ) -> Result<()> {
        let mut dialog = CategorizeDialog::new();
        dialog.open(draft);

        if choice.suggest {
            self.suggest(&mut dialog, container).await;
        }

        if let Some(id) = choice.category.as_deref() {
            if container.state().category(id).is_none() {
                bail!("Unknown category: {}", id);
            }
            dialog.select_category(id)?;
        }

        if let Some(name) = choice.new_category.as_deref() {
            dialog.set_creating_new(true)?;
            dialog.set_new_category_name(name)?;
            if let Some(color) = choice.color.as_deref() {
                dialog.set_new_category_color(color)?;
            }
        }

        let repo = dialog
            .commit(container)
            .context("Failed to categorize repository")?;
        let card = RepoCard::resolve(&repo, container.state());
        println!("✓ Saved {} → {}", repo.full_name(), card.badge.label());

        Ok(())
    }

    async fn suggest(&self, dialog: &mut CategorizeDialog, container: &StateContainer) {
        let outcome = dialog
            .request_suggestion(self.suggester.as_ref(), container.categories())
            .await;

        match outcome {
            SuggestionOutcome::SelectedExisting(id) => {
                let name = container
                    .state()
                    .category(&id)
                    .map_or(id.as_str(), |c| c.name.as_str());
                println!("✓ Suggested existing category: {}", name);
            }
            SuggestionOutcome::PrefilledNew => {
                if let Some(session) = dialog.session() {
                    println!(
                        "✓ Suggested new category: {} ({})",
                        session.new_category_name, session.new_category_color
                    );
                }
            }
            SuggestionOutcome::NoSuggestion => {
                println!("⚠ No suggestion available");
                return;
            }
            SuggestionOutcome::Unavailable => {
                println!("⚠ Suggestions need an API key and a description");
                return;
            }
            SuggestionOutcome::Discarded => {
                debug!("Suggestion discarded");
                return;
            }
        }

        if let Some(reasoning) = dialog.session().and_then(|s| s.reasoning.as_deref()) {
            println!("  {}", reasoning);
        }
    }

    fn remove(&self, container: &mut StateContainer, id: &str, yes: bool) -> Result<()> {
        if container.state().repo(id).is_none() {
            println!("⚠ Not tracked: {}", id);
            return Ok(());
        }

        if !yes && !self.prompt.confirm(REMOVE_PROMPT)? {
            println!("Cancelled");
            return Ok(());
        }

        container.delete_repo(id);
        println!("✓ Stopped tracking {}", id);
        Ok(())
    }
}
