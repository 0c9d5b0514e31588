//! Branch name parsing and generation.

use std::fmt;

use git2::Branch;

use crate::diff::Representation;
use crate::error::GeneratorError;
use crate::generate::{clean_output, generate_for_diff};
use crate::llm::TextGenerator;

use super::prompt::build_branch_request;

/// Longest slug kept after the type prefix.
pub const MAX_SLUG_LEN: usize = 50;

/// Branch categories used as the name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchType {
    Feature,
    Fix,
    Chore,
    Docs,
    Refactor,
    Test,
    Hotfix,
}

impl BranchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Fix => "fix",
            Self::Chore => "chore",
            Self::Docs => "docs",
            Self::Refactor => "refactor",
            Self::Test => "test",
            Self::Hotfix => "hotfix",
        }
    }

    /// Map a generated prefix to a branch type. Unknown prefixes become `Feature`.
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix.trim().to_lowercase().as_str() {
            "fix" | "bugfix" | "bug" => Self::Fix,
            "chore" | "build" | "ci" => Self::Chore,
            "docs" | "doc" => Self::Docs,
            "refactor" => Self::Refactor,
            "test" | "tests" => Self::Test,
            "hotfix" => Self::Hotfix,
            _ => Self::Feature,
        }
    }
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated `<type>/<slug>` branch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName {
    pub kind: BranchType,
    pub slug: String,
}

impl BranchName {
    /// Parse generator output into a branch name.
    pub fn parse(raw: &str) -> Result<Self, GeneratorError> {
        let cleaned = clean_output(raw);

        let (kind, rest) = match cleaned.split_once('/') {
            Some((prefix, rest)) => (BranchType::from_prefix(prefix), rest),
            None => (BranchType::Feature, cleaned.as_str()),
        };

        let slug = slugify(rest);
        if slug.is_empty() {
            return Err(GeneratorError::InvalidResponse(format!(
                "no usable branch name in {:?}",
                cleaned
            )));
        }

        let name = Self { kind, slug };
        if !Branch::name_is_valid(&name.to_string()).unwrap_or(false) {
            return Err(GeneratorError::InvalidResponse(format!(
                "'{}' is not a valid branch name",
                name
            )));
        }

        Ok(name)
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.slug)
    }
}

/// Lowercase ASCII kebab-case, runs of separators collapsed.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

/// Generate a branch name for `diff`.
pub async fn generate_branch_name<G: TextGenerator + ?Sized>(
    generator: &G,
    diff: &str,
) -> Result<(BranchName, Representation), GeneratorError> {
    let generated = generate_for_diff(generator, diff, build_branch_request).await?;
    let name = BranchName::parse(&generated.text)?;
    Ok((name, generated.representation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::generator::MockTextGenerator;

    #[test]
    fn test_parse_typed_name() {
        let name = BranchName::parse("feature/add-user-auth").unwrap();
        assert_eq!(name.kind, BranchType::Feature);
        assert_eq!(name.slug, "add-user-auth");
        assert_eq!(name.to_string(), "feature/add-user-auth");
    }

    #[test]
    fn test_parse_aliases_and_unknown_prefix() {
        assert_eq!(BranchName::parse("bugfix/login").unwrap().kind, BranchType::Fix);
        assert_eq!(BranchName::parse("feat/login").unwrap().kind, BranchType::Feature);
        assert_eq!(BranchName::parse("wip/login").unwrap().kind, BranchType::Feature);
        assert_eq!(BranchName::parse("Hotfix/crash").unwrap().kind, BranchType::Hotfix);
    }

    #[test]
    fn test_parse_without_prefix_defaults_to_feature() {
        let name = BranchName::parse("Add OAuth Login").unwrap();
        assert_eq!(name.to_string(), "feature/add-oauth-login");
    }

    #[test]
    fn test_parse_cleans_quotes_and_fences() {
        let name = BranchName::parse("```\n`fix/Handle  empty__input!`\n```").unwrap();
        assert_eq!(name.to_string(), "fix/handle-empty-input");
    }

    #[test]
    fn test_parse_nested_slashes_become_dashes() {
        let name = BranchName::parse("docs/api/v2 readme").unwrap();
        assert_eq!(name.to_string(), "docs/api-v2-readme");
    }

    #[test]
    fn test_parse_rejects_empty_slug() {
        assert!(matches!(
            BranchName::parse("fix/!!!"),
            Err(GeneratorError::InvalidResponse(_))
        ));
        assert!(matches!(
            BranchName::parse(""),
            Err(GeneratorError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_slug_length_is_capped() {
        let long = "word-".repeat(30);
        let name = BranchName::parse(&format!("chore/{long}")).unwrap();
        assert!(name.slug.len() <= MAX_SLUG_LEN);
        assert!(!name.slug.ends_with('-'));
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("café déjà vu"), "caf-d-j-vu");
        assert_eq!(slugify("--leading"), "leading");
    }

    #[tokio::test]
    async fn test_generate_branch_name() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|req| req.user.contains("generate a branch name"))
            .times(1)
            .returning(|_| Ok("refactor/split-config-loader".to_string()));

        let (name, representation) = generate_branch_name(&mock, "+fn load() {}").await.unwrap();
        assert_eq!(name.kind, BranchType::Refactor);
        assert_eq!(name.to_string(), "refactor/split-config-loader");
        assert_eq!(representation.kind(), "verbatim");
    }

    #[tokio::test]
    async fn test_generate_branch_name_empty_diff() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);

        let result = generate_branch_name(&mock, "  \n").await;
        assert!(matches!(result, Err(GeneratorError::EmptyDiff)));
    }
}
