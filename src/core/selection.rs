use std::str::FromStr;

/// The fixed set of task filters shown in the sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Important,
    Today,
    Upcoming,
    Finished,
}

impl Filter {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Important => "important",
            Self::Today => "today",
            Self::Upcoming => "upcoming",
            Self::Finished => "finished",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "important" => Some(Self::Important),
            "today" => Some(Self::Today),
            "upcoming" => Some(Self::Upcoming),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::All => "All Tasks",
            Self::Important => "Important",
            Self::Today => "Today",
            Self::Upcoming => "Upcoming",
            Self::Finished => "Finished",
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s).ok_or_else(|| {
            format!("unknown filter '{s}' (expected all, important, today, upcoming or finished)")
        })
    }
}

/// Priority sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    LowToHigh,
    HighToLow,
}

impl SortOrder {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            Self::LowToHigh => "low-to-high",
            Self::HighToLow => "high-to-low",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "low-to-high" | "asc" => Some(Self::LowToHigh),
            "high-to-low" | "desc" => Some(Self::HighToLow),
            _ => None,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s)
            .ok_or_else(|| format!("unknown sort order '{s}' (expected low-to-high or high-to-low)"))
    }
}

/// View parameters chosen by the user. Never persisted; every run starts
/// from the defaults.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub filter: Filter,
    pub project: Option<String>,
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl Selection {
    pub fn with_filter(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keyword_roundtrip() {
        for f in [
            Filter::All,
            Filter::Important,
            Filter::Today,
            Filter::Upcoming,
            Filter::Finished,
        ] {
            assert_eq!(Filter::from_keyword(f.as_keyword()), Some(f));
        }
        assert_eq!(Filter::from_keyword("done"), None);
    }

    #[test]
    fn sort_order_accepts_short_forms() {
        assert_eq!(SortOrder::from_keyword("asc"), Some(SortOrder::LowToHigh));
        assert_eq!(SortOrder::from_keyword("desc"), Some(SortOrder::HighToLow));
        assert_eq!(
            "high-to-low".parse::<SortOrder>(),
            Ok(SortOrder::HighToLow)
        );
    }

    #[test]
    fn defaults_match_a_fresh_session() {
        let selection = Selection::default();
        assert_eq!(selection.filter, Filter::All);
        assert_eq!(selection.sort, SortOrder::LowToHigh);
        assert!(selection.project.is_none());
        assert!(selection.search.is_none());
    }
}
