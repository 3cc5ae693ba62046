//! Parsing of free-text menu answers.

/// A top-level menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    AddResearcher,
    AddProject,
    AddPublication,
    ShowResearchers,
    ShowProjects,
    ShowCollaborations,
    ShowProfile,
}

pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "0" => Some(MenuChoice::Exit),
        "1" => Some(MenuChoice::AddResearcher),
        "2" => Some(MenuChoice::AddProject),
        "3" => Some(MenuChoice::AddPublication),
        "4" => Some(MenuChoice::ShowResearchers),
        "5" => Some(MenuChoice::ShowProjects),
        "6" => Some(MenuChoice::ShowCollaborations),
        "7" => Some(MenuChoice::ShowProfile),
        _ => None,
    }
}

/// Parses a comma separated list of 1-based positions into 0-based indices.
///
/// Entries that are not numbers, or fall outside `1..=len`, are skipped.
/// Repeated positions are kept once.
pub fn parse_selection(input: &str, len: usize) -> Vec<usize> {
    let mut selected = Vec::new();
    for index in input
        .split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
    {
        if !selected.contains(&index) {
            selected.push(index);
        }
    }
    selected
}

/// Splits comma separated interests, dropping blank entries.
pub fn parse_interests(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parses a year; anything that is not an integer is no year.
pub fn parse_year(input: &str) -> Option<i32> {
    input.trim().parse().ok()
}

/// Parses a count; anything that is not a non-negative integer is zero.
pub fn parse_count(input: &str) -> usize {
    input.trim().parse().unwrap_or(0)
}

/// Returns true for a `y`/`yes` answer in any case.
pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
