//! Anchor navigation from outline links to headings

/// Height of the fixed navigation bar headings must clear
pub const DEFAULT_HEADER_OFFSET: f64 = 80.0;

/// Where to scroll, and the fragment to put in the address bar
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    /// Document offset to scroll to
    pub top: f64,
    /// `#id`, to replace the current history entry's fragment
    pub fragment: String,
}

/// Document offset that puts a heading just below the fixed header.
///
/// `heading_top` is the heading's distance from the viewport top.
pub fn scroll_target(heading_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
    heading_top + scroll_y - header_offset
}

/// Resolve a click on an outline link.
///
/// Returns `None` for an empty id or when no element carries the id, in
/// which case the click does nothing.
pub fn scroll_request(
    id: &str,
    heading_top: Option<f64>,
    scroll_y: f64,
    header_offset: f64,
) -> Option<ScrollRequest> {
    if id.is_empty() {
        return None;
    }
    let heading_top = heading_top?;
    Some(ScrollRequest {
        top: scroll_target(heading_top, scroll_y, header_offset),
        fragment: format!("#{}", id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_target() {
        assert_eq!(scroll_target(300.0, 1000.0, DEFAULT_HEADER_OFFSET), 1220.0);
        assert_eq!(scroll_target(-50.0, 400.0, 0.0), 350.0);
    }

    #[test]
    fn test_scroll_request() {
        let request = scroll_request("intro", Some(500.0), 0.0, 80.0).unwrap();
        assert_eq!(request.top, 420.0);
        assert_eq!(request.fragment, "#intro");
    }

    #[test]
    fn test_scroll_request_noops() {
        assert_eq!(scroll_request("", Some(10.0), 0.0, 80.0), None);
        assert_eq!(scroll_request("missing", None, 0.0, 80.0), None);
    }
}
