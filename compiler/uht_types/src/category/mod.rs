//! Category inheritance rules.
//!
//! Category lists are ordered string lists. A derived class merges its own
//! lists with the super class's (already merged) lists during the bind-bases
//! phase. These functions are pure so the laws can be tested directly.

/// Category lists declared on (and later merged into) a class.
#[derive(Clone, Default, Debug, Eq, PartialEq)]
pub struct ClassCategories {
    pub show: Vec<String>,
    pub hide: Vec<String>,
    pub show_functions: Vec<String>,
    pub hide_functions: Vec<String>,
    pub auto_expand: Vec<String>,
    pub auto_collapse: Vec<String>,
    pub dont_auto_collapse: Vec<String>,
    pub class_group: Vec<String>,
    pub prioritize: Vec<String>,
}

fn add_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_owned());
    }
}

fn remove_value(list: &mut Vec<String>, value: &str) -> bool {
    let before = list.len();
    list.retain(|v| v != value);
    list.len() != before
}

/// Merge show / hide categories. Returns `(show, hide)`.
///
/// The hide list is this class's hides followed by the super's. Each local
/// show either cancels a hide of the same name, or, when one of its parent
/// paths (`Parent|Child`) is hidden, is re-shown explicitly.
pub fn merge_show_categories(
    super_show: &[String],
    super_hide: &[String],
    own_show: &[String],
    own_hide: &[String],
) -> (Vec<String>, Vec<String>) {
    let mut hide = Vec::with_capacity(own_hide.len() + super_hide.len());
    for value in own_hide.iter().chain(super_hide) {
        add_unique(&mut hide, value);
    }

    let mut show = Vec::with_capacity(super_show.len());
    for value in super_show {
        add_unique(&mut show, value);
    }

    for value in own_show {
        if remove_value(&mut hide, value) {
            continue;
        }
        let segments: Vec<&str> = value.split('|').collect();
        let mut path = String::new();
        for segment in &segments[..segments.len().saturating_sub(1)] {
            path.push_str(segment);
            if hide.iter().any(|h| h == &path) {
                add_unique(&mut show, value);
                break;
            }
            path.push('|');
        }
    }

    (show, hide)
}

/// Merge hidden functions: inherited plus own, minus own explicit shows.
pub fn merge_hide_functions(
    super_hide: &[String],
    own_hide: &[String],
    own_show: &[String],
) -> Vec<String> {
    let mut hide = Vec::with_capacity(super_hide.len() + own_hide.len());
    for value in super_hide.iter().chain(own_hide) {
        if !own_show.contains(value) {
            add_unique(&mut hide, value);
        }
    }
    hide
}

/// Merge auto-expand / auto-collapse categories. Returns `(expand, collapse)`.
///
/// Local expands cancel local and inherited collapses, local collapses
/// cancel local and inherited expands, local "don't collapse" entries
/// cancel any collapse. The filtered inherited lists follow the local ones.
pub fn merge_auto_categories(
    own_expand: &[String],
    own_collapse: &[String],
    own_dont_collapse: &[String],
    super_expand: &[String],
    super_collapse: &[String],
) -> (Vec<String>, Vec<String>) {
    let mut expand: Vec<String> = own_expand.to_vec();
    let mut collapse: Vec<String> = own_collapse.to_vec();
    let mut inherited_expand: Vec<String> = super_expand.to_vec();
    let mut inherited_collapse: Vec<String> = super_collapse.to_vec();

    for value in own_expand {
        remove_value(&mut collapse, value);
        remove_value(&mut inherited_collapse, value);
    }
    for value in own_dont_collapse {
        remove_value(&mut collapse, value);
        remove_value(&mut inherited_collapse, value);
    }
    for value in collapse.clone() {
        remove_value(&mut expand, &value);
        remove_value(&mut inherited_expand, &value);
    }

    for value in &inherited_expand {
        add_unique(&mut expand, value);
    }
    for value in &inherited_collapse {
        add_unique(&mut collapse, value);
    }
    (expand, collapse)
}
