//! Sidebar menu model: which keys exist, how they group, and where they lead.

/// A selectable sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKey {
    Dashboard,
    Author,
    Category,
    Book,
    Member,
}

/// A sidebar group and the entries it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuGroup {
    pub key: &'static str,
    pub label: &'static str,
    pub items: &'static [MenuKey],
}

/// Top-level entries shown before any group.
pub const TOP_LEVEL: &[MenuKey] = &[MenuKey::Dashboard];

pub const GROUPS: &[MenuGroup] = &[MenuGroup {
    key: "config",
    label: "Config",
    items: &[
        MenuKey::Author,
        MenuKey::Category,
        MenuKey::Book,
        MenuKey::Member,
    ],
}];

impl MenuKey {
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Author,
        Self::Category,
        Self::Book,
        Self::Member,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Author => "author",
            Self::Category => "category",
            Self::Book => "book",
            Self::Member => "member",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Author => "Author",
            Self::Category => "Category",
            Self::Book => "Book",
            Self::Member => "Member",
        }
    }

    pub const fn route(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Author => "/authors",
            Self::Category => "/categories",
            Self::Book => "/books",
            Self::Member => "/member",
        }
    }

    /// The entry highlighted for `path`, ignoring trailing slashes.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|key| key.route() == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_are_unique() {
        let mut routes: Vec<_> = MenuKey::ALL.iter().map(|k| k.route()).collect();
        routes.sort_unstable();
        routes.dedup();
        assert_eq!(routes.len(), MenuKey::ALL.len());
    }

    #[test]
    fn test_from_path() {
        assert_eq!(MenuKey::from_path("/"), Some(MenuKey::Dashboard));
        assert_eq!(MenuKey::from_path(""), Some(MenuKey::Dashboard));
        assert_eq!(MenuKey::from_path("/authors"), Some(MenuKey::Author));
        assert_eq!(MenuKey::from_path("/categories/"), Some(MenuKey::Category));
        assert_eq!(MenuKey::from_path("/books"), Some(MenuKey::Book));
        assert_eq!(MenuKey::from_path("/member"), Some(MenuKey::Member));
        assert_eq!(MenuKey::from_path("/loans"), None);
    }

    #[test]
    fn test_every_key_is_reachable_from_the_menu() {
        let grouped = GROUPS.iter().flat_map(|group| group.items.iter());
        let mut shown: Vec<_> = TOP_LEVEL.iter().chain(grouped).copied().collect();
        shown.sort_by_key(|key| key.key());
        let mut all = MenuKey::ALL.to_vec();
        all.sort_by_key(|key| key.key());
        assert_eq!(shown, all);
    }

    #[test]
    fn test_config_group_keys() {
        let keys: Vec<_> = GROUPS[0].items.iter().map(|k| k.key()).collect();
        assert_eq!(keys, vec!["author", "category", "book", "member"]);
        assert_eq!(GROUPS[0].label, "Config");
    }
}
