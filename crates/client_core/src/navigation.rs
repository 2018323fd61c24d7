use serde::{Deserialize, Serialize};

/// Scroll offset past which the header switches to its condensed style.
pub const HEADER_CONDENSE_AFTER: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Home,
    About,
    Work,
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub view: View,
    /// In-page anchor, without the leading `#`. Empty for the page top.
    pub anchor: &'static str,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        label: "Home",
        view: View::Home,
        anchor: "",
    },
    NavItem {
        label: "About",
        view: View::About,
        anchor: "about",
    },
    NavItem {
        label: "Featured Work",
        view: View::Work,
        anchor: "writing",
    },
    NavItem {
        label: "Contact",
        view: View::Home,
        anchor: "contact",
    },
];

fn is_contact(item: &NavItem) -> bool {
    item.label == "Contact"
}

pub fn nav_item(label: &str) -> Option<&'static NavItem> {
    NAV_ITEMS
        .iter()
        .find(|item| item.label.eq_ignore_ascii_case(label))
}

/// Contact scrolls within the current view, except from a project page which
/// has no contact section.
pub fn target_view(item: &NavItem, current: View) -> View {
    if is_contact(item) {
        if current == View::Project {
            View::Home
        } else {
            current
        }
    } else {
        item.view
    }
}

pub fn is_active(item: &NavItem, current: View) -> bool {
    if is_contact(item) {
        return false;
    }
    let work_active = item.view == View::Work && matches!(current, View::Work | View::Project);
    current == item.view || work_active
}

pub fn header_condensed(scroll_y: f64) -> bool {
    scroll_y > HEADER_CONDENSE_AFTER
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
