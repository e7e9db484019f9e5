//! Knowledge hub: listing is open to everyone, full articles are gated

use anyhow::Context;
use aqua_client::knowledge::{ArticleView, KnowledgeHub};
use clap::Subcommand;
use std::io::{self, Write};

use crate::app::Console;

#[derive(Subcommand, Debug)]
pub enum KnowledgeAction {
    /// List articles, optionally in one category
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Read an article
    Read { slug: String },
}

pub fn run(console: &Console, action: KnowledgeAction) -> anyhow::Result<()> {
    let hub = KnowledgeHub::load().context("Embedded article catalogue is unreadable")?;
    let mut out = io::stdout();
    match action {
        KnowledgeAction::List { category } => {
            console.enter("/knowledge")?;
            list(&mut out, &hub, category.as_deref())
        }
        KnowledgeAction::Read { slug } => {
            console.enter(&format!("/knowledge/{slug}"))?;
            let view = hub
                .view(&slug, &console.session())
                .with_context(|| format!("No article named {slug:?}"))?;
            read(&mut out, &view)
        }
    }
}

pub fn list(out: &mut impl Write, hub: &KnowledgeHub, category: Option<&str>) -> anyhow::Result<()> {
    let categories: Vec<&str> = match category {
        Some(wanted) => hub
            .categories()
            .into_iter()
            .filter(|c| c.eq_ignore_ascii_case(wanted))
            .collect(),
        None => hub.categories(),
    };
    if categories.is_empty() {
        writeln!(out, "No articles in that category. Categories: {}", hub.categories().join(", "))?;
        return Ok(());
    }
    for category in categories {
        writeln!(out, "{category}")?;
        for article in hub.in_category(category) {
            writeln!(
                out,
                "  {:<32} {} ({} min)",
                article.slug, article.title, article.reading_minutes
            )?;
        }
    }
    Ok(())
}

pub fn read(out: &mut impl Write, view: &ArticleView<'_>) -> anyhow::Result<()> {
    let article = match view {
        ArticleView::Full(article) => article,
        ArticleView::Preview { article, .. } => article,
    };
    writeln!(out, "{}", article.title)?;
    writeln!(out, "{} | {} min read", article.category, article.reading_minutes)?;
    writeln!(out)?;
    writeln!(out, "{}", view.body())?;
    if let ArticleView::Preview { upgrade_prompt, .. } = view {
        writeln!(out)?;
        writeln!(out, "{upgrade_prompt}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqua_client::knowledge::UPGRADE_PROMPT;
    use aqua_client::SessionState;

    fn anonymous() -> SessionState {
        SessionState {
            user: None,
            is_authenticated: false,
            loading: false,
            expires_at: None,
        }
    }

    #[test]
    fn test_list_filters_category() {
        let hub = KnowledgeHub::load().unwrap();
        let mut out = Vec::new();
        list(&mut out, &hub, Some("regulation")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Regulation\n"));
        assert!(text.contains("kebs-standards-overview"));
        assert!(!text.contains("borehole-water-safety"));
    }

    #[test]
    fn test_preview_ends_with_upgrade_prompt() {
        let hub = KnowledgeHub::load().unwrap();
        let view = hub.view("storage-tank-hygiene", &anonymous()).unwrap();
        let mut out = Vec::new();
        read(&mut out, &view).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.trim_end().ends_with(UPGRADE_PROMPT));
    }
}
