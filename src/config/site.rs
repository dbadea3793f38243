//! Public site identity

use serde::Deserialize;

/// Name, description and contact details served at `/api/site`.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_project_name")]
    pub project_name: String,

    #[serde(default = "default_project_slug")]
    pub project_slug: String,

    #[serde(default = "default_description")]
    pub description: String,

    /// Comma-separated search keywords
    #[serde(default = "default_keywords")]
    pub keywords: String,

    #[serde(default = "default_support_email")]
    pub support_email: String,
}

impl SiteConfig {
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            project_slug: default_project_slug(),
            description: default_description(),
            keywords: default_keywords(),
            support_email: default_support_email(),
        }
    }
}

fn default_project_name() -> String {
    "BesideAI".to_string()
}

fn default_project_slug() -> String {
    "besideai".to_string()
}

fn default_description() -> String {
    "BesideAI - Your AI-powered productivity assistant.".to_string()
}

fn default_keywords() -> String {
    "BesideAI,AI Assistant,AI Tools,Chrome Extension,Productivity,AI SaaS".to_string()
}

fn default_support_email() -> String {
    "ssent.hq@gmail.com".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_besideai() {
        let site = SiteConfig::default();
        assert_eq!(site.project_name, "BesideAI");
        assert_eq!(site.project_slug, "besideai");
        assert_eq!(site.keyword_list().len(), 6);
        assert_eq!(site.keyword_list()[3], "Chrome Extension");
    }

    #[test]
    fn keyword_list_skips_blanks() {
        let site = SiteConfig {
            keywords: " a, ,b,".to_string(),
            ..Default::default()
        };
        assert_eq!(site.keyword_list(), vec!["a".to_string(), "b".to_string()]);
    }
}
