use std::fmt;
use std::str::FromStr;

/// Named page regions in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionId {
    Hero,
    About,
    Skills,
    Projects,
    Content,
    Contact,
}

impl RegionId {
    pub const ALL: [RegionId; 6] = [
        RegionId::Hero,
        RegionId::About,
        RegionId::Skills,
        RegionId::Projects,
        RegionId::Content,
        RegionId::Contact,
    ];

    pub fn first() -> Self {
        Self::ALL[0]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RegionId::Hero => "hero",
            RegionId::About => "about",
            RegionId::Skills => "skills",
            RegionId::Projects => "projects",
            RegionId::Content => "content",
            RegionId::Contact => "contact",
        }
    }

    /// Caption shown in the navigation bar.
    pub fn label(self) -> &'static str {
        match self {
            RegionId::Hero => "Home",
            RegionId::About => "About",
            RegionId::Skills => "Skills",
            RegionId::Projects => "Projects",
            RegionId::Content => "Content",
            RegionId::Contact => "Contact",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hero" | "home" => Ok(RegionId::Hero),
            "about" => Ok(RegionId::About),
            "skills" => Ok(RegionId::Skills),
            "projects" => Ok(RegionId::Projects),
            "content" => Ok(RegionId::Content),
            "contact" => Ok(RegionId::Contact),
            other => Err(format!("unknown section `{other}`")),
        }
    }
}

/// Top rows of the laid-out regions. Filled in by the layout pass; a region
/// that was not laid out has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMap {
    tops: [Option<u16>; 6],
}

impl RegionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: RegionId, top: u16) {
        self.tops[id.index()] = Some(top);
    }

    pub fn top(&self, id: RegionId) -> Option<u16> {
        self.tops[id.index()]
    }

    /// Known regions with their tops, in document order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (RegionId, u16)> + '_ {
        RegionId::ALL
            .iter()
            .filter_map(|id| self.top(*id).map(|top| (*id, top)))
    }
}

impl FromIterator<(RegionId, u16)> for RegionMap {
    fn from_iter<I: IntoIterator<Item = (RegionId, u16)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, top) in iter {
            map.insert(id, top);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_home_alias() {
        assert_eq!("home".parse::<RegionId>(), Ok(RegionId::Hero));
        assert_eq!("Skills".parse::<RegionId>(), Ok(RegionId::Skills));
        assert!("blog".parse::<RegionId>().is_err());
    }

    #[test]
    fn iterates_known_regions_in_order() {
        let map: RegionMap = [(RegionId::Contact, 90), (RegionId::Hero, 0), (RegionId::Skills, 40)]
            .into_iter()
            .collect();
        let ids: Vec<_> = map.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![RegionId::Hero, RegionId::Skills, RegionId::Contact]);
        assert_eq!(map.top(RegionId::About), None);
    }
}
