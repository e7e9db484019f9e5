//! Knowledge hub
//!
//! Articles ship inside the binary. Full content is reserved for signed-in
//! plant owners and for pro or enterprise subscribers; everyone else gets a
//! preview and an upgrade prompt.

use shared::models::{Article, Role, User};
use shared::util::truncate_words;

use crate::session::SessionState;

const ARTICLES_JSON: &str = include_str!("../assets/articles.json");

/// Characters kept in a gated preview
pub const PREVIEW_CHARS: usize = 240;

pub const UPGRADE_PROMPT: &str =
    "Upgrade to Pro or Enterprise to read the full article and unlock the complete knowledge hub.";

/// Whether `session` may read full articles
pub fn can_read_full(session: &SessionState) -> bool {
    if !session.is_authenticated {
        return false;
    }
    session.user.as_ref().is_some_and(has_full_access)
}

fn has_full_access(user: &User) -> bool {
    user.role == Role::Owner || user.subscription_tier.is_premium()
}

/// What the reader gets for one article
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleView<'a> {
    Full(&'a Article),
    Preview {
        article: &'a Article,
        excerpt: String,
        upgrade_prompt: &'static str,
    },
}

impl ArticleView<'_> {
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    pub fn body(&self) -> &str {
        match self {
            Self::Full(article) => &article.content,
            Self::Preview { excerpt, .. } => excerpt,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KnowledgeHub {
    articles: Vec<Article>,
}

impl KnowledgeHub {
    /// Load the embedded catalogue
    pub fn load() -> Result<Self, serde_json::Error> {
        Ok(Self::from_articles(serde_json::from_str(ARTICLES_JSON)?))
    }

    pub fn from_articles(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Distinct categories in catalogue order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for article in &self.articles {
            if !seen.contains(&article.category.as_str()) {
                seen.push(&article.category);
            }
        }
        seen
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Article> + 'a {
        self.articles
            .iter()
            .filter(move |a| a.category.eq_ignore_ascii_case(category))
    }

    pub fn find(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    /// Gate one article for the current viewer
    pub fn view(&self, slug: &str, session: &SessionState) -> Option<ArticleView<'_>> {
        let article = self.find(slug)?;
        if can_read_full(session) {
            return Some(ArticleView::Full(article));
        }
        Some(ArticleView::Preview {
            article,
            excerpt: truncate_words(&article.content, PREVIEW_CHARS),
            upgrade_prompt: UPGRADE_PROMPT,
        })
    }
}
