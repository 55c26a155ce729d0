//! Table of contents and scroll tracking
//!
//! `ScrollSpy` is the model behind the "currently active heading" state: the
//! active heading is the last one whose rendered offset has been scrolled
//! past, with a fixed lookahead so a heading activates slightly before it
//! reaches the top of the viewport. The article template embeds
//! [`SCROLLSPY_SCRIPT`], which runs the same computation in the browser with
//! the same lookahead.

use serde::Serialize;

use crate::markdown::Heading;

/// Scroll-position bias: a heading becomes active this many pixels before
/// its anchor reaches the top of the viewport
pub const SCROLL_LOOKAHEAD: f64 = 120.0;

/// One table-of-contents entry for the article template
#[derive(Debug, Clone, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
    /// Marked on the server-rendered initial state only; the embedded
    /// script takes over once the page is live
    pub active: bool,
}

/// Build the TOC entries for a heading list, with the first entry active
pub fn entries(headings: &[Heading]) -> Vec<TocEntry> {
    let spy = ScrollSpy::new(headings.iter().map(|h| (h.id.clone(), 0.0)));
    headings
        .iter()
        .map(|h| TocEntry {
            id: h.id.clone(),
            text: h.text.clone(),
            level: h.level,
            active: spy.active() == Some(h.id.as_str()),
        })
        .collect()
}

/// Tracks which heading is active for a scroll position.
///
/// Recomputation is coalesced to one run per animation frame: callers ask
/// `request_frame` whether to schedule a run, and scroll events arriving
/// while one is pending are dropped.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    /// (identifier, vertical offset) in document order
    headings: Vec<(String, f64)>,
    active: Option<String>,
    frame_pending: bool,
}

impl ScrollSpy {
    /// Create a tracker over headings in document order. The active heading
    /// starts as the first one, or none when the list is empty.
    pub fn new<I>(headings: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let headings: Vec<_> = headings.into_iter().collect();
        let active = headings.first().map(|(id, _)| id.clone());
        Self {
            headings,
            active,
            frame_pending: false,
        }
    }

    /// Currently active heading identifier
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Record the rendered offset for a heading
    pub fn set_offset(&mut self, id: &str, offset: f64) {
        if let Some(entry) = self.headings.iter_mut().find(|(hid, _)| hid == id) {
            entry.1 = offset;
        }
    }

    /// A scroll or resize event arrived. Returns true when the caller should
    /// schedule a recompute on the next frame; false means one is already
    /// pending and this event is coalesced.
    pub fn request_frame(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Run the scheduled recompute for the given scroll position.
    /// Returns the new active identifier only when it changed.
    pub fn on_frame(&mut self, scroll_position: f64) -> Option<String> {
        self.frame_pending = false;

        let computed = self.compute_active(scroll_position);
        if computed != self.active {
            self.active = computed.clone();
            computed
        } else {
            None
        }
    }

    /// The active heading is the last one whose offset is at or above the
    /// scroll position plus the lookahead; the scan stops at the first
    /// heading past the threshold.
    fn compute_active(&self, scroll_position: f64) -> Option<String> {
        let threshold = scroll_position + SCROLL_LOOKAHEAD;
        let mut current = self.headings.first().map(|(id, _)| id.clone());

        for (id, offset) in &self.headings {
            if *offset <= threshold {
                current = Some(id.clone());
            } else {
                break;
            }
        }

        current
    }
}

/// Client-side mirror of the tracker plus the copy-to-clipboard handler,
/// embedded in the article template. Clipboard failures are swallowed.
pub const SCROLLSPY_SCRIPT: &str = r#"
(function() {
    var lookahead = Number(document.body.dataset.lookahead || 120);
    var links = Array.prototype.slice.call(document.querySelectorAll('.toc a[data-heading]'));
    var ids = links.map(function(a) { return a.dataset.heading; });

    function recompute() {
        var pos = window.scrollY + lookahead;
        var current = ids[0] || null;
        for (var i = 0; i < ids.length; i++) {
            var el = document.getElementById(ids[i]);
            if (!el) continue;
            if (el.offsetTop <= pos) {
                current = ids[i];
            } else {
                break;
            }
        }
        links.forEach(function(a) {
            a.classList.toggle('active', a.dataset.heading === current);
        });
    }

    var ticking = false;
    function onScroll() {
        if (!ticking) {
            window.requestAnimationFrame(function() {
                recompute();
                ticking = false;
            });
            ticking = true;
        }
    }

    if (ids.length) {
        recompute();
        window.addEventListener('scroll', onScroll);
        window.addEventListener('resize', onScroll);
    }

    document.querySelectorAll('.code-block .copy-code').forEach(function(btn) {
        btn.addEventListener('click', function() {
            if (!navigator.clipboard) return;
            var pre = btn.closest('.code-block').querySelector('pre');
            if (!pre) return;
            navigator.clipboard.writeText(pre.innerText).then(function() {
                btn.textContent = 'Copied';
                setTimeout(function() { btn.textContent = 'Copy'; }, 1500);
            }).catch(function() {});
        });
    });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn spy() -> ScrollSpy {
        ScrollSpy::new(vec![
            ("intro".to_string(), 0.0),
            ("setup".to_string(), 400.0),
            ("faq".to_string(), 900.0),
        ])
    }

    #[test]
    fn test_initial_active_is_first_heading() {
        assert_eq!(spy().active(), Some("intro"));
        assert_eq!(ScrollSpy::new(Vec::new()).active(), None);
    }

    #[test]
    fn test_active_is_last_heading_scrolled_past() {
        let mut spy = spy();
        spy.request_frame();
        // 500 + 120 lookahead = 620: past "setup" (400), before "faq" (900)
        assert_eq!(spy.on_frame(500.0), Some("setup".to_string()));
        assert_eq!(spy.active(), Some("setup"));
    }

    #[test]
    fn test_lookahead_activates_heading_early() {
        let mut spy = spy();
        spy.request_frame();
        // 300 + 120 = 420 reaches "setup" although the raw position does not
        assert_eq!(spy.on_frame(300.0), Some("setup".to_string()));
    }

    #[test]
    fn test_no_change_returns_none() {
        let mut spy = spy();
        spy.request_frame();
        assert_eq!(spy.on_frame(0.0), None);
        assert_eq!(spy.active(), Some("intro"));
    }

    #[test]
    fn test_scrolling_back_up_reactivates_earlier_heading() {
        let mut spy = spy();
        spy.request_frame();
        spy.on_frame(1000.0);
        assert_eq!(spy.active(), Some("faq"));
        spy.request_frame();
        assert_eq!(spy.on_frame(0.0), Some("intro".to_string()));
    }

    #[test]
    fn test_frame_requests_are_coalesced() {
        let mut spy = spy();
        assert!(spy.request_frame());
        assert!(!spy.request_frame());
        assert!(!spy.request_frame());
        spy.on_frame(0.0);
        assert!(spy.request_frame());
    }

    #[test]
    fn test_set_offset_updates_target() {
        let mut spy = spy();
        spy.set_offset("faq", 450.0);
        spy.request_frame();
        assert_eq!(spy.on_frame(500.0), Some("faq".to_string()));
    }

    #[test]
    fn test_entries_mark_first_active() {
        let headings = crate::markdown::extract_headings("# A\n\n## B\n");
        let entries = entries(&headings);
        assert!(entries[0].active);
        assert!(!entries[1].active);
        assert_eq!(entries[1].level, 2);
    }
}
