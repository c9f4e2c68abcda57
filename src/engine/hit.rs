//! Hotspot hit testing

use crate::story::{Link, Page, Story};

/// Finds the hotspot under `point` on the given page, or `None`.
///
/// Links are declared bottom-to-top, so the scan runs in reverse list order
/// and the last-listed hotspot wins on overlap. The story-level
/// `disable_interactions` kill-switch is honored before any per-link test.
/// Side-effect-free.
pub fn hit_test<'a>(story: &Story, page: &'a Page, point: [f32; 2]) -> Option<&'a Link> {
    if story.disable_interactions {
        return None;
    }

    page.links.iter().rev().find(|link| link.rect.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{DocMeta, Rect};

    fn link(index: usize, rect: Rect) -> Link {
        Link {
            name: format!("link-{index}"),
            rect,
            index,
            reactions: vec![],
        }
    }

    fn page_with_links(links: Vec<Link>) -> Page {
        Page {
            id: "1:1".to_string(),
            group_index: 0,
            title: "Menu".to_string(),
            image: String::new(),
            index: 0,
            width: 320.0,
            height: 172.0,
            x: 0.0,
            y: 0.0,
            proto_overflow_v: false,
            proto_overflow_h: false,
            links,
        }
    }

    fn story_with(page: Page) -> Story {
        Story {
            title: String::new(),
            doc: DocMeta::default(),
            disable_interactions: false,
            highlight_hotspot: false,
            highlight_all_hotspots: false,
            pages: vec![page],
            groups: vec![],
            start_page_index: 0,
        }
    }

    #[test]
    fn test_hit_inside_rect() {
        let page = page_with_links(vec![link(0, Rect::new(61.0, 114.0, 198.0, 46.0))]);
        let story = story_with(page);
        let hit = hit_test(&story, &story.pages[0], [100.0, 130.0]);
        assert_eq!(hit.map(|l| l.index), Some(0));
    }

    #[test]
    fn test_miss_returns_none() {
        let page = page_with_links(vec![link(0, Rect::new(61.0, 114.0, 198.0, 46.0))]);
        let story = story_with(page);
        assert!(hit_test(&story, &story.pages[0], [0.0, 0.0]).is_none());
    }

    #[test]
    fn test_overlapping_links_last_listed_wins() {
        let page = page_with_links(vec![
            link(0, Rect::new(10.0, 10.0, 100.0, 100.0)),
            link(1, Rect::new(50.0, 50.0, 100.0, 100.0)),
        ]);
        let story = story_with(page);

        // Overlap region: later declaration sits on top
        let hit = hit_test(&story, &story.pages[0], [60.0, 60.0]);
        assert_eq!(hit.map(|l| l.index), Some(1));

        // Only the lower link covers this point
        let hit = hit_test(&story, &story.pages[0], [20.0, 20.0]);
        assert_eq!(hit.map(|l| l.index), Some(0));
    }

    #[test]
    fn test_kill_switch_suppresses_all_hits() {
        let page = page_with_links(vec![link(0, Rect::new(0.0, 0.0, 320.0, 172.0))]);
        let mut story = story_with(page);
        story.disable_interactions = true;
        assert!(hit_test(&story, &story.pages[0], [100.0, 100.0]).is_none());
    }
}
