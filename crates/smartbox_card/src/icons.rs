//! Inline SVG icons used by the card. Path data is in a 24x24 viewbox unless noted.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Power,
    Rewind,
    PlayPause,
    FastForward,
    ChevronUp,
    ChevronLeft,
    ChevronRight,
    ChevronDown,
    Back,
    Home,
    Menu,
    VolumeDown,
    Microphone,
    VolumeUp,
}

impl Icon {
    /// Complete `<svg>` element for this icon.
    pub fn svg(&self) -> &'static str {
        match self {
            Icon::Power => concat!(
                r#"<svg viewBox="0 0 24 24"><path d="M13,3H11V13H13V3M17.83,5.17L16.41,6.59C17.99,7.86 19,9.81 19,12"#,
                r#"C19,15.87 15.87,19 12,19C8.13,19 5,15.87 5,12C5,9.81 6.01,7.86 7.58,6.58L6.17,5.17C4.23,6.82 3,9.26 3,12"#,
                r#"C3,16.97 7.03,21 12,21C16.97,21 21,16.97 21,12C21,9.26 19.77,6.82 17.83,5.17Z"></path></svg>"#,
            ),
            Icon::Rewind => concat!(
                r#"<svg viewBox="0 0 24 24"><path d="M18 9.86v4.28L14.97 12 18 9.86m-9 0v4.28L5.97 12 9 9.86"#,
                r#"M20 6l-8.5 6 8.5 6V6zm-9 0l-8.5 6 8.5 6V6z"></path></svg>"#,
            ),
            // Two glyphs side by side in a double-width viewbox.
            Icon::PlayPause => concat!(
                r#"<svg viewBox="0 -960 1920 960">"#,
                r#"<path d="M320-200v-560l440 280-440 280Zm80-280Zm0 134 210-134-210-134v268Z"></path>"#,
                r#"<g transform="translate(500, 0)"><path d="M520-200v-560h240v560H520Zm-320 0v-560h240v560H200Z"#,
                r#"m400-80h80v-400h-80v400Zm-320 0h80v-400h-80v400Zm0-400v400-400Zm320 0v400-400Z"></path></g></svg>"#,
            ),
            Icon::FastForward => concat!(
                r#"<svg viewBox="0 0 24 24"><path d="M15,9.86L18.03,12L15,14.14V9.86 M6,9.86L9.03,12L6,14.14V9.86"#,
                r#" M13,6v12l8.5-6L13,6L13,6z M4,6v12l8.5-6L4,6L4,6z"></path></svg>"#,
            ),
            Icon::ChevronUp => {
                r#"<svg viewBox="0 0 24 24"><path d="M7.41,15.41L12,10.83L16.59,15.41L18,14L12,8L6,14L7.41,15.41Z"></path></svg>"#
            }
            Icon::ChevronLeft => {
                r#"<svg viewBox="0 0 24 24"><path d="M15.41,16.58L10.83,12L15.41,7.41L14,6L8,12L14,18L15.41,16.58Z"></path></svg>"#
            }
            Icon::ChevronRight => {
                r#"<svg viewBox="0 0 24 24"><path d="M8.59,16.58L13.17,12L8.59,7.41L10,6L16,12L10,18L8.59,16.58Z"></path></svg>"#
            }
            Icon::ChevronDown => {
                r#"<svg viewBox="0 0 24 24"><path d="M7.41,8.58L12,13.17L16.59,8.58L18,10L12,16L6,10L7.41,8.58Z"></path></svg>"#
            }
            Icon::Back => {
                r#"<svg viewBox="0 0 24 24"><path d="M10 9V5l-7 7 7 7v-4.1c5 0 8.5 1.6 11 5.1-1-5-4-10-11-11z"></path></svg>"#
            }
            Icon::Home => concat!(
                r#"<svg viewBox="0 0 24 24"><path d="M12 5.69l5 4.5V18h-2v-6H9v6H7v-7.81l5-4.5"#,
                r#"M12 3L2 12h3v8h6v-6h2v6h6v-8h3L12 3z"></path></svg>"#,
            ),
            Icon::Menu => {
                r#"<svg viewBox="0 0 24 24"><path d="M3,6H21V8H3V6M3,11H21V13H3V11M3,16H21V18H3V16Z"></path></svg>"#
            }
            Icon::VolumeDown => concat!(
                r#"<svg viewBox="0 0 24 24"><path d="M16 7.97v8.05c1.48-.73 2.5-2.25 2.5-4.02 0-1.77-1.02-3.29-2.5-4.03z"#,
                r#"M5 9v6h4l5 5V4L9 9H5zm7-.17v6.34L9.83 13H7v-2h2.83L12 8.83z"></path></svg>"#,
            ),
            Icon::Microphone => concat!(
                r#"<svg viewBox="0 0 24 24"><path d="M12,2A3,3 0 0,1 15,5V11A3,3 0 0,1 12,14A3,3 0 0,1 9,11V5"#,
                r#"A3,3 0 0,1 12,2M19,11C19,14.53 16.39,17.44 13,17.93V21H11V17.93C7.61,17.44 5,14.53 5,11H7"#,
                r#"A5,5 0 0,0 12,16A5,5 0 0,0 17,11H19Z"></path></svg>"#,
            ),
            Icon::VolumeUp => concat!(
                r#"<svg viewBox="0 0 24 24"><path d="M3 9v6h4l5 5V4L7 9H3zm7-.17v6.34L7.83 13H5v-2h2.83L10 8.83z"#,
                r#"M16.5 12c0-1.77-1.02-3.29-2.5-4.03v8.05c1.48-.73 2.5-2.25 2.5-4.02zM14 3.23v2.06"#,
                r#"c2.89.86 5 3.54 5 6.71s-2.11 5.85-5 6.71v2.06c4.01-.91 7-4.49 7-8.77 0-4.28-2.99-7.86-7-8.77z"></path></svg>"#,
            ),
        }
    }
}
