//! Render-free view state for the two list screens. Each view owns the
//! search term, the zero-or-one selected entity, the open surface, the
//! transient draft and one coordinator per write verb; a renderer only reads
//! this state and forwards user intent back into it.

pub mod drive;
mod programmes;
mod speakers;

pub use programmes::ProgrammeListView;
pub use speakers::SpeakerListView;

/// Which modal or drawer is open, if any. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    #[default]
    None,
    CreateDrawer,
    EditDrawer,
    DeleteModal,
}

/// Case-insensitive substring match against id and display name; an empty
/// term matches everything.
pub(crate) fn matches_search(term: &str, id: &str, name: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    id.to_lowercase().contains(&term) || name.to_lowercase().contains(&term)
}

#[cfg(test)]
mod tests {
    use super::matches_search;

    #[test]
    fn search_ignores_case_and_matches_ids_too() {
        assert!(matches_search("KEY", "p1", "Keynote"));
        assert!(matches_search("p1", "p1", "Keynote"));
        assert!(!matches_search("key", "p2", "Workshop"));
        assert!(matches_search("", "p2", "Workshop"));
    }
}
