//! Known pattern categories.

/// A catalog category with display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Identifier used in pattern data and tool filters.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short description.
    pub description: &'static str,
}

/// Every category the built-in catalog uses.
pub const CATEGORIES: &[Category] = &[
    Category { id: "buttons", name: "Buttons", description: "Interactive button elements" },
    Category { id: "cards", name: "Cards", description: "Container cards and panels" },
    Category { id: "forms", name: "Forms", description: "Form inputs and controls" },
    Category { id: "badges", name: "Badges", description: "Labels, tags, and badges" },
    Category { id: "alerts", name: "Alerts", description: "Notification and alert boxes" },
    Category { id: "avatars", name: "Avatars", description: "User avatars and profile images" },
    Category { id: "layout", name: "Layout", description: "Layout containers and grids" },
    Category { id: "typography", name: "Typography", description: "Text styles and headings" },
    Category { id: "navigation", name: "Navigation", description: "Navbars, menus, and links" },
    Category { id: "modals", name: "Modals", description: "Modal dialogs and overlays" },
    Category { id: "tables", name: "Tables", description: "Data tables and rows" },
    Category { id: "lists", name: "Lists", description: "List containers and items" },
    Category { id: "loading", name: "Loading", description: "Spinners and skeletons" },
    Category { id: "dividers", name: "Dividers", description: "Separators and dividers" },
    Category {
        id: "backgrounds",
        name: "Backgrounds",
        description: "Gradients, glass effects, and fancy backgrounds",
    },
    Category { id: "icons", name: "Icons", description: "Icon containers and sizing" },
    Category { id: "code", name: "Code", description: "Code blocks and syntax highlighting" },
    Category { id: "pricing", name: "Pricing", description: "Pricing cards and badges" },
    Category {
        id: "fonts",
        name: "Fonts",
        description: "Font families, weights, and typography styles",
    },
];

/// Looks up a known category by id.
#[must_use]
pub fn category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Returns the display name for a category id.
///
/// Unknown ids (such as `custom`) get their first letter capitalised.
///
/// # Examples
///
/// ```
/// use cm_core::category_display_name;
///
/// assert_eq!(category_display_name("buttons"), "Buttons");
/// assert_eq!(category_display_name("custom"), "Custom");
/// ```
#[must_use]
pub fn category_display_name(id: &str) -> String {
    if let Some(known) = category(id) {
        return known.name.to_owned();
    }
    let mut chars = id.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        assert_eq!(category("forms").map(|c| c.name), Some("Forms"));
        assert!(category("nope").is_none());
    }

    #[test]
    fn test_category_display_name_fallback() {
        assert_eq!(category_display_name("brand"), "Brand");
        assert_eq!(category_display_name(""), "");
    }

    #[test]
    fn test_category_ids_unique() {
        for (i, a) in CATEGORIES.iter().enumerate() {
            assert!(CATEGORIES[i + 1..].iter().all(|b| b.id != a.id), "duplicate {}", a.id);
        }
    }
}
