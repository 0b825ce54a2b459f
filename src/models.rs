use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::Result;

static EMBEDDED_CONTENT: &str = include_str!("../content.toml");

/// Content shipped with the binary, parsed on first use.
pub static DEFAULT_PORTFOLIO: Lazy<Portfolio> =
    Lazy::new(|| Portfolio::from_toml(EMBEDDED_CONTENT).expect("embedded content.toml is valid"));

/// Icon keys as written in the content file. Unrecognized keys fall back to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Code,
    Server,
    Database,
    Cloud,
    Terminal,
    Palette,
    Mobile,
    Brain,
    Github,
    Linkedin,
    Twitter,
    Youtube,
    Blog,
    Mail,
    Phone,
    Location,
    Trophy,
    Rocket,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Code => "</>",
            Icon::Server => "[#]",
            Icon::Database => "(=)",
            Icon::Cloud => "(~)",
            Icon::Terminal => ">_",
            Icon::Palette => "(*)",
            Icon::Mobile => "[]",
            Icon::Brain => "{o}",
            Icon::Github => "gh",
            Icon::Linkedin => "in",
            Icon::Twitter => "@",
            Icon::Youtube => "|>",
            Icon::Blog => "¶",
            Icon::Mail => "✉",
            Icon::Phone => "☎",
            Icon::Location => "⌖",
            Icon::Trophy => "★",
            Icon::Rocket => "↗",
            Icon::Unknown => "•",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub tagline: String,
    pub bio: Vec<String>,
    pub location: String,
    pub email: String,
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    #[serde(default)]
    pub icon: Icon,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub icon: Icon,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub detail: String,
    pub year: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentPlatform {
    pub name: String,
    #[serde(default)]
    pub icon: Icon,
    pub url: String,
    pub description: String,
    pub stat: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactLink {
    pub label: String,
    #[serde(default)]
    pub icon: Icon,
    pub value: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub platforms: Vec<ContentPlatform>,
    #[serde(default)]
    pub contacts: Vec<ContactLink>,
}

impl Portfolio {
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut portfolio: Portfolio = toml::from_str(text)?;
        for category in &mut portfolio.skills {
            for skill in &mut category.skills {
                skill.level = skill.level.min(100);
            }
        }
        Ok(portfolio)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Projects with the featured ones first, otherwise in file order.
    pub fn projects_by_feature(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = self.projects.iter().collect();
        projects.sort_by_key(|p| !p.featured);
        projects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses() {
        let p = &*DEFAULT_PORTFOLIO;
        assert!(!p.profile.name.is_empty());
        assert!(!p.skills.is_empty());
        assert!(!p.projects.is_empty());
        assert!(!p.contacts.is_empty());
    }

    #[test]
    fn unknown_icon_falls_back() {
        let text = r#"
            [profile]
            name = "A"
            role = "B"
            tagline = "C"
            bio = []
            location = "D"
            email = "a@b.c"

            [[contacts]]
            label = "Fax"
            icon = "fax-machine"
            value = "123"

            [[skills]]
            title = "Lang"
            skills = [{ name = "Rust", level = 250 }]
        "#;
        let p = Portfolio::from_toml(text).unwrap();
        assert_eq!(p.contacts[0].icon, Icon::Unknown);
        assert_eq!(p.contacts[0].icon.glyph(), "•");
        assert_eq!(p.skills[0].icon, Icon::Unknown);
        assert_eq!(p.skills[0].skills[0].level, 100);
    }

    #[test]
    fn featured_projects_come_first() {
        let text = r#"
            [profile]
            name = "A"
            role = "B"
            tagline = "C"
            bio = []
            location = "D"
            email = "a@b.c"

            [[projects]]
            title = "one"
            description = ""

            [[projects]]
            title = "two"
            description = ""
            featured = true
        "#;
        let p = Portfolio::from_toml(text).unwrap();
        let titles: Vec<_> = p.projects_by_feature().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["two", "one"]);
    }

    #[test]
    fn malformed_content_is_an_error() {
        assert!(Portfolio::from_toml("[profile]\nname = 3").is_err());
    }
}
