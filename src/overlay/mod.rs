//! Keyboard-driven overlays: the showcase gallery with its lightbox, and the
//! project popup / "all projects" list.
//!
//! State is plain data owned by the mounted page handle. Key routing only ever
//! reaches the topmost open overlay, and [`KeyAction`] tells the DOM layer
//! what to do with the result.

mod lightbox;

pub use lightbox::Lightbox;

/// Keys the overlays react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    Space,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent` (`key`, `code`) pair.
    pub fn from_dom(key: &str, code: &str) -> Self {
        match key {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "Escape" | "Esc" => Key::Escape,
            _ if code == "Space" => Key::Space,
            _ => Key::Other,
        }
    }
}

/// Outcome of routing one key press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    Ignored,
    ShowImage(usize),
    CloseImage,
    CloseGallery,
    ClosePopup,
    CloseList,
    ToggleVideo,
    /// Scroll the project list container by this many px.
    ScrollList(f64),
}

impl KeyAction {
    pub fn handled(self) -> bool {
        self != KeyAction::Ignored
    }

    /// Whether the browser default (page scroll) must be suppressed.
    pub fn prevents_default(self) -> bool {
        matches!(self, KeyAction::ToggleVideo | KeyAction::ScrollList(_))
    }
}

pub const LIST_SCROLL_STEP: f64 = 100.0;

/// About-section gallery popup plus its full-image lightbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShowcaseOverlay {
    gallery_open: bool,
    lightbox: Lightbox,
}

impl ShowcaseOverlay {
    pub fn new(images: usize) -> Self {
        Self {
            gallery_open: false,
            lightbox: Lightbox::new(images),
        }
    }

    pub fn is_gallery_open(&self) -> bool {
        self.gallery_open
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn is_active(&self) -> bool {
        self.gallery_open || self.lightbox.is_open()
    }

    pub fn open_gallery(&mut self) {
        self.gallery_open = true;
    }

    /// Closing the gallery takes the lightbox down with it.
    pub fn close_gallery(&mut self) {
        self.gallery_open = false;
        self.lightbox.close();
    }

    pub fn open_image(&mut self, index: usize) -> bool {
        if self.lightbox.open(index) {
            self.gallery_open = true;
            true
        } else {
            false
        }
    }

    /// Leaves the gallery itself open.
    pub fn close_image(&mut self) {
        self.lightbox.close();
    }

    pub fn next_image(&mut self) -> Option<usize> {
        self.lightbox.next()
    }

    pub fn prev_image(&mut self) -> Option<usize> {
        self.lightbox.prev()
    }

    pub fn handle_key(&mut self, key: Key) -> KeyAction {
        if self.lightbox.is_open() {
            return match key {
                Key::Right => self.next_image().map_or(KeyAction::Ignored, KeyAction::ShowImage),
                Key::Left => self.prev_image().map_or(KeyAction::Ignored, KeyAction::ShowImage),
                Key::Escape => {
                    self.close_image();
                    KeyAction::CloseImage
                }
                _ => KeyAction::Ignored,
            };
        }
        if self.gallery_open && key == Key::Escape {
            self.gallery_open = false;
            return KeyAction::CloseGallery;
        }
        KeyAction::Ignored
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectPopup {
    pub index: usize,
    pub has_video: bool,
}

/// Projects-section popup and the scrollable "view all" list beneath it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectOverlay {
    popup: Option<ProjectPopup>,
    list_open: bool,
}

impl ProjectOverlay {
    pub fn popup(&self) -> Option<ProjectPopup> {
        self.popup
    }

    pub fn is_list_open(&self) -> bool {
        self.list_open
    }

    pub fn is_active(&self) -> bool {
        self.popup.is_some() || self.list_open
    }

    pub fn open_popup(&mut self, index: usize, has_video: bool) {
        self.popup = Some(ProjectPopup { index, has_video });
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    pub fn open_list(&mut self) {
        self.list_open = true;
    }

    pub fn close_list(&mut self) {
        self.list_open = false;
    }

    pub fn handle_key(&mut self, key: Key) -> KeyAction {
        if let Some(popup) = self.popup {
            return match key {
                Key::Escape => {
                    self.popup = None;
                    KeyAction::ClosePopup
                }
                Key::Space if popup.has_video => KeyAction::ToggleVideo,
                _ => KeyAction::Ignored,
            };
        }
        if self.list_open {
            return match key {
                Key::Escape => {
                    self.list_open = false;
                    KeyAction::CloseList
                }
                Key::Down => KeyAction::ScrollList(LIST_SCROLL_STEP),
                Key::Up => KeyAction::ScrollList(-LIST_SCROLL_STEP),
                _ => KeyAction::Ignored,
            };
        }
        KeyAction::Ignored
    }
}

/// Every overlay on the page, routed as one stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlays {
    pub showcase: ShowcaseOverlay,
    pub projects: ProjectOverlay,
}

impl Overlays {
    pub fn new(showcase_images: usize) -> Self {
        Self {
            showcase: ShowcaseOverlay::new(showcase_images),
            projects: ProjectOverlay::default(),
        }
    }

    pub fn handle_key(&mut self, key: Key) -> KeyAction {
        if self.showcase.is_active() {
            return self.showcase.handle_key(key);
        }
        self.projects.handle_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_keys_map() {
        assert_eq!(Key::from_dom("ArrowRight", "ArrowRight"), Key::Right);
        assert_eq!(Key::from_dom("Escape", "Escape"), Key::Escape);
        assert_eq!(Key::from_dom(" ", "Space"), Key::Space);
        assert_eq!(Key::from_dom("a", "KeyA"), Key::Other);
    }

    #[test]
    fn escape_in_lightbox_keeps_gallery_open() {
        let mut s = ShowcaseOverlay::new(4);
        s.open_gallery();
        assert!(s.open_image(2));
        assert_eq!(s.handle_key(Key::Escape), KeyAction::CloseImage);
        assert!(s.is_gallery_open());
        assert!(!s.lightbox().is_open());
        assert_eq!(s.handle_key(Key::Escape), KeyAction::CloseGallery);
        assert!(!s.is_active());
    }

    #[test]
    fn arrows_move_lightbox_with_wraparound() {
        let mut s = ShowcaseOverlay::new(4);
        s.open_image(3);
        assert_eq!(s.handle_key(Key::Right), KeyAction::ShowImage(0));
        assert_eq!(s.handle_key(Key::Left), KeyAction::ShowImage(3));
        assert_eq!(s.handle_key(Key::Up), KeyAction::Ignored);
    }

    #[test]
    fn arrows_ignored_with_only_gallery_open() {
        let mut s = ShowcaseOverlay::new(4);
        s.open_gallery();
        assert_eq!(s.handle_key(Key::Right), KeyAction::Ignored);
    }

    #[test]
    fn closing_gallery_closes_lightbox() {
        let mut s = ShowcaseOverlay::new(4);
        s.open_image(1);
        s.close_gallery();
        assert!(!s.lightbox().is_open());
    }

    #[test]
    fn popup_space_toggles_only_with_video() {
        let mut p = ProjectOverlay::default();
        p.open_popup(0, true);
        let act = p.handle_key(Key::Space);
        assert_eq!(act, KeyAction::ToggleVideo);
        assert!(act.prevents_default());

        p.open_popup(2, false);
        assert_eq!(p.handle_key(Key::Space), KeyAction::Ignored);
    }

    #[test]
    fn escape_closes_topmost_project_overlay_first() {
        let mut p = ProjectOverlay::default();
        p.open_list();
        p.open_popup(1, false);
        assert_eq!(p.handle_key(Key::Down), KeyAction::Ignored);
        assert_eq!(p.handle_key(Key::Escape), KeyAction::ClosePopup);
        assert!(p.is_list_open());
        assert_eq!(p.handle_key(Key::Down), KeyAction::ScrollList(100.0));
        assert_eq!(p.handle_key(Key::Up), KeyAction::ScrollList(-100.0));
        assert_eq!(p.handle_key(Key::Escape), KeyAction::CloseList);
        assert!(!p.is_active());
    }

    #[test]
    fn showcase_shadows_projects() {
        let mut o = Overlays::new(4);
        o.projects.open_list();
        o.showcase.open_gallery();
        assert_eq!(o.handle_key(Key::Escape), KeyAction::CloseGallery);
        assert!(o.projects.is_list_open());
        assert_eq!(o.handle_key(Key::Escape), KeyAction::CloseList);
        assert_eq!(o.handle_key(Key::Escape), KeyAction::Ignored);
        assert!(!KeyAction::Ignored.handled());
    }
}
