//! Responsive presentation parameters.
//!
//! Two independent axes: the viewport breakpoint picks a fixed table of
//! container and font sizes, and the length of the displayed topic picks the
//! topic font size. Sizes are in rem (16 logical px); the terminal view turns
//! them into cells with [`rem_to_cells`].

use unicode_width::UnicodeWidthChar;

/// Viewports at least this wide (logical px) use the desktop table.
pub const DESKTOP_MIN_WIDTH: u32 = 768;

/// Logical px per rem.
pub const PX_PER_REM: f32 = 16.0;

/// Topic display never grows past this many lines.
pub const TOPIC_MAX_LINES: usize = 4;

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Desktop,
    Compact,
}

/// Font-size bucket chosen from the displayed topic's character count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicSize {
    /// 15 characters or fewer
    Largest,
    /// 16 to 25
    Large,
    /// 26 to 35
    Medium,
    /// more than 35
    Smallest,
    /// nothing displayed yet
    Placeholder,
}

impl TopicSize {
    pub fn for_topic(topic: Option<&str>) -> Self {
        let Some(topic) = topic else {
            return TopicSize::Placeholder;
        };
        match topic.chars().count() {
            0..=15 => TopicSize::Largest,
            16..=25 => TopicSize::Large,
            26..=35 => TopicSize::Medium,
            _ => TopicSize::Smallest,
        }
    }

    /// (desktop, compact) font size in rem.
    fn font_sizes(self) -> (f32, f32) {
        match self {
            TopicSize::Largest => (2.5, 2.0),
            TopicSize::Large => (2.25, 1.75),
            TopicSize::Medium => (2.0, 1.5),
            TopicSize::Smallest => (1.75, 1.25),
            TopicSize::Placeholder => (2.25, 1.875),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationParams {
    pub breakpoint: Breakpoint,
    pub topic_size: TopicSize,
    pub topic_font_rem: f32,
    pub title_font_rem: f32,
    pub button_font_rem: f32,
    pub message_font_rem: f32,
    /// (vertical, horizontal)
    pub button_padding_rem: (f32, f32),
    pub page_padding_rem: f32,
    pub panel_padding_rem: f32,
    pub topic_padding_rem: f32,
    pub page_max_width_rem: f32,
    pub card_max_width_rem: f32,
    pub topic_max_lines: usize,
}

pub fn breakpoint_for(viewport_width: u32) -> Breakpoint {
    if viewport_width >= DESKTOP_MIN_WIDTH {
        Breakpoint::Desktop
    } else {
        Breakpoint::Compact
    }
}

/// Presentation for the given viewport width (logical px) and displayed
/// topic. Pure; recompute on every resize and every topic change.
pub fn classify_presentation(viewport_width: u32, topic: Option<&str>) -> PresentationParams {
    let breakpoint = breakpoint_for(viewport_width);
    let topic_size = TopicSize::for_topic(topic);
    let (desktop_font, compact_font) = topic_size.font_sizes();

    match breakpoint {
        Breakpoint::Desktop => PresentationParams {
            breakpoint,
            topic_size,
            topic_font_rem: desktop_font,
            title_font_rem: 3.5,
            button_font_rem: 1.75,
            message_font_rem: 1.5,
            button_padding_rem: (1.5, 5.0),
            page_padding_rem: 2.0,
            panel_padding_rem: 3.0,
            topic_padding_rem: 3.0,
            page_max_width_rem: 56.0,
            card_max_width_rem: 48.0,
            topic_max_lines: TOPIC_MAX_LINES,
        },
        Breakpoint::Compact => PresentationParams {
            breakpoint,
            topic_size,
            topic_font_rem: compact_font,
            title_font_rem: 2.25,
            button_font_rem: 1.25,
            message_font_rem: 1.125,
            button_padding_rem: (1.25, 3.0),
            page_padding_rem: 1.0,
            panel_padding_rem: 1.5,
            topic_padding_rem: 2.0,
            page_max_width_rem: 36.0,
            card_max_width_rem: 28.0,
            topic_max_lines: TOPIC_MAX_LINES,
        },
    }
}

/// Converts a rem length to terminal cells of the given pixel width.
pub fn rem_to_cells(rem: f32, cell_px: u16) -> u16 {
    if cell_px == 0 {
        return 0;
    }
    (rem * PX_PER_REM / cell_px as f32).round() as u16
}

/// Wraps `text` to `width` display columns and clamps the result to
/// `max_lines`, ending the last kept line with an ellipsis when anything was
/// cut. Breaks at any character so unspaced scripts wrap too; explicit
/// newlines are honoured.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut truncated = false;

    'outer: for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut used = 0;
        for ch in paragraph.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width && !line.is_empty() {
                if lines.len() == max_lines {
                    truncated = true;
                    break 'outer;
                }
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            line.push(ch);
            used += w;
        }
        if lines.len() == max_lines {
            truncated = true;
            break;
        }
        lines.push(line);
    }

    if truncated {
        if let Some(last) = lines.last_mut() {
            let ellipsis_width = ELLIPSIS.width().unwrap_or(1);
            let mut used: usize = last.chars().map(|c| c.width().unwrap_or(0)).sum();
            while used + ellipsis_width > width {
                match last.pop() {
                    Some(c) => used -= c.width().unwrap_or(0),
                    None => break,
                }
            }
            last.push(ELLIPSIS);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_breakpoint_boundary() {
        assert_eq!(breakpoint_for(767), Breakpoint::Compact);
        assert_eq!(breakpoint_for(768), Breakpoint::Desktop);
        assert_eq!(breakpoint_for(0), Breakpoint::Compact);
    }

    #[test]
    fn test_topic_size_boundaries() {
        let size = |n: usize| TopicSize::for_topic(Some("a".repeat(n).as_str()));
        assert_eq!(size(15), TopicSize::Largest);
        assert_eq!(size(16), TopicSize::Large);
        assert_eq!(size(25), TopicSize::Large);
        assert_eq!(size(26), TopicSize::Medium);
        assert_eq!(size(35), TopicSize::Medium);
        assert_eq!(size(36), TopicSize::Smallest);
        assert_eq!(TopicSize::for_topic(None), TopicSize::Placeholder);
    }

    #[test]
    fn test_topic_size_counts_characters_not_bytes() {
        // 15 three-byte characters
        let topic = "最近ハマっていることについて話";
        assert_eq!(topic.chars().count(), 15);
        assert_eq!(TopicSize::for_topic(Some(topic)), TopicSize::Largest);
    }

    #[test]
    fn test_font_size_per_breakpoint() {
        let desktop = classify_presentation(1024, Some("short"));
        assert_eq!(desktop.topic_font_rem, 2.5);
        assert_eq!(desktop.breakpoint, Breakpoint::Desktop);

        let compact = classify_presentation(400, Some("short"));
        assert_eq!(compact.topic_font_rem, 2.0);
        assert_eq!(compact.breakpoint, Breakpoint::Compact);

        let placeholder = classify_presentation(400, None);
        assert_eq!(placeholder.topic_size, TopicSize::Placeholder);
        assert_eq!(placeholder.topic_font_rem, 1.875);
    }

    #[test]
    fn test_breakpoint_tables() {
        let desktop = classify_presentation(768, None);
        assert_eq!(desktop.card_max_width_rem, 48.0);
        assert_eq!(desktop.title_font_rem, 3.5);
        assert_eq!(desktop.button_padding_rem, (1.5, 5.0));

        let compact = classify_presentation(767, None);
        assert_eq!(compact.card_max_width_rem, 28.0);
        assert_eq!(compact.title_font_rem, 2.25);
        assert_eq!(compact.topic_max_lines, TOPIC_MAX_LINES);
    }

    #[test]
    fn test_rem_to_cells() {
        assert_eq!(rem_to_cells(48.0, 8), 96);
        assert_eq!(rem_to_cells(28.0, 8), 56);
        assert_eq!(rem_to_cells(3.0, 16), 3);
        assert_eq!(rem_to_cells(3.0, 0), 0);
    }

    #[test]
    fn test_clamp_short_text_untouched() {
        assert_eq!(clamp_lines("Hello", 10, 4), vec!["Hello".to_string()]);
    }

    #[test]
    fn test_clamp_wraps_by_width() {
        assert_eq!(
            clamp_lines("abcdefghij", 4, 4),
            vec!["abcd".to_string(), "efgh".to_string(), "ij".to_string()]
        );
    }

    #[test]
    fn test_clamp_wide_characters() {
        // Each character is two columns wide.
        assert_eq!(
            clamp_lines("雑談ガチャ", 4, 4),
            vec!["雑談".to_string(), "ガチ".to_string(), "ャ".to_string()]
        );
    }

    #[test]
    fn test_clamp_truncates_with_ellipsis() {
        let lines = clamp_lines(&"x".repeat(30), 5, 4);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "xxxx…");
        assert_eq!(lines[0], "xxxxx");
    }

    #[test]
    fn test_clamp_counts_explicit_newlines() {
        let lines = clamp_lines("a\nb\nc\nd\ne", 10, 4);
        assert_eq!(lines, vec!["a", "b", "c", "d…"]);
    }

    #[test]
    fn test_clamp_degenerate_sizes() {
        assert!(clamp_lines("abc", 0, 4).is_empty());
        assert!(clamp_lines("abc", 4, 0).is_empty());
    }
}
