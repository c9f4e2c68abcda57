//! Prototype story graph
//!
//! A [`Story`] is the complete prototype exported by the design tool: an
//! ordered list of fixed-size pages, each carrying its clickable hotspots,
//! plus presentational groups and document metadata. Everything here is
//! created once at load time and read-only afterwards; the only mutable
//! state in the crate lives in the navigation session.

mod model;

pub use model::{
    ActionKind, DocMeta, Group, Link, Page, Reaction, Rect, Section, Trigger, TransitionKind,
};

use serde::{Deserialize, Serialize};

/// The complete prototype: pages, hotspots, reactions, and groups.
///
/// Pages are addressed by integer index; a structurally valid story has
/// `pages[i].index == i` for every page, so lookups are plain slice
/// accesses. Field names mirror the design-tool export so a host loader can
/// deserialize one directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Prototype title
    #[serde(default)]
    pub title: String,
    /// Document metadata (owner, author, version) - carried opaquely
    #[serde(flatten)]
    pub doc: DocMeta,
    /// Global interaction kill-switch: when set, no hotspot ever hits
    #[serde(default)]
    pub disable_interactions: bool,
    /// Viewer hint: outline the hotspot under the cursor
    #[serde(default)]
    pub highlight_hotspot: bool,
    /// Viewer hint: outline every hotspot on the page
    #[serde(default)]
    pub highlight_all_hotspots: bool,
    /// Ordered pages; a page's index is its position in this list
    pub pages: Vec<Page>,
    /// Presentational page groupings - not consumed by navigation
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Index of the page a fresh session starts on
    pub start_page_index: usize,
}

impl Story {
    /// Number of pages in the story
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of hotspots across all pages
    pub fn link_count(&self) -> usize {
        self.pages.iter().map(|p| p.links.len()).sum()
    }

    /// Looks up a page by index; `None` if out of range
    pub fn page_at(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Looks up a hotspot by its story-wide index; `None` if no link
    /// declares it
    pub fn link_by_global_index(&self, index: usize) -> Option<&Link> {
        self.pages
            .iter()
            .flat_map(|p| &p.links)
            .find(|l| l.index == index)
    }

    /// The page a fresh session starts on; `None` only when
    /// `start_page_index` is out of range (rejected at validation time)
    pub fn start_page(&self) -> Option<&Page> {
        self.page_at(self.start_page_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_page_story() -> Story {
        Story {
            title: "fixture".to_string(),
            doc: DocMeta::default(),
            disable_interactions: false,
            highlight_hotspot: false,
            highlight_all_hotspots: false,
            pages: vec![
                Page {
                    id: "1:1".to_string(),
                    group_index: 0,
                    title: "Menu".to_string(),
                    image: "menu.png".to_string(),
                    index: 0,
                    width: 320.0,
                    height: 172.0,
                    x: 0.0,
                    y: 0.0,
                    proto_overflow_v: false,
                    proto_overflow_h: false,
                    links: vec![Link {
                        name: "next".to_string(),
                        rect: Rect::new(10.0, 10.0, 50.0, 20.0),
                        index: 0,
                        reactions: vec![],
                    }],
                },
                Page {
                    id: "1:2".to_string(),
                    group_index: 0,
                    title: "Detail".to_string(),
                    image: "detail.png".to_string(),
                    index: 1,
                    width: 320.0,
                    height: 172.0,
                    x: 340.0,
                    y: 0.0,
                    proto_overflow_v: false,
                    proto_overflow_h: false,
                    links: vec![Link {
                        name: "back".to_string(),
                        rect: Rect::new(0.0, 0.0, 24.0, 24.0),
                        index: 1,
                        reactions: vec![],
                    }],
                },
            ],
            groups: vec![],
            start_page_index: 0,
        }
    }

    #[test]
    fn test_page_index_round_trips() {
        let story = two_page_story();
        for page in &story.pages {
            assert_eq!(story.page_at(page.index).map(|p| p.id.as_str()), Some(page.id.as_str()));
        }
    }

    #[test]
    fn test_page_at_out_of_range() {
        let story = two_page_story();
        assert!(story.page_at(2).is_none());
        assert!(story.page_at(999).is_none());
    }

    #[test]
    fn test_link_by_global_index() {
        let story = two_page_story();
        assert_eq!(story.link_by_global_index(0).map(|l| l.name.as_str()), Some("next"));
        assert_eq!(story.link_by_global_index(1).map(|l| l.name.as_str()), Some("back"));
        assert!(story.link_by_global_index(2).is_none());
    }

    #[test]
    fn test_start_page() {
        let mut story = two_page_story();
        assert_eq!(story.start_page().map(|p| p.index), Some(0));
        story.start_page_index = 7;
        assert!(story.start_page().is_none());
    }

    #[test]
    fn test_counts() {
        let story = two_page_story();
        assert_eq!(story.page_count(), 2);
        assert_eq!(story.link_count(), 2);
    }
}
