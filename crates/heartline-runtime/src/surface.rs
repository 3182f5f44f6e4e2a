//! Page surface port and its headless implementation.

use std::collections::{HashMap, HashSet};

use heartline_interactions::domain::target_game::Target;
use heartline_narrative::domain::scene::Scene;

/// Default time a hint stays visible.
pub const HINT_DURATION_MS: u64 = 1800;

/// Elements a scene page may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    TransitionOverlay,
    MusicToggle,
    Typewriter,
    BeginButton,
    HeartGame,
    GameResult,
    ToMemoriesButton,
    ToHoldButton,
    HoldButton,
    HoldMeter,
    HoldText,
    FinalLines,
    FinalYesButtons,
    FinalMessage,
    HiddenNote,
    FinalBackground,
}

impl Element {
    /// Elements the page of `scene` is built with.
    #[must_use]
    pub fn for_scene(scene: Scene) -> Vec<Element> {
        let mut elements = vec![Element::TransitionOverlay, Element::MusicToggle];
        elements.extend_from_slice(match scene {
            Scene::Intro => &[Element::Typewriter, Element::BeginButton][..],
            Scene::HeartGame => &[
                Element::HeartGame,
                Element::GameResult,
                Element::ToMemoriesButton,
            ],
            Scene::Memories => &[Element::ToHoldButton],
            Scene::Hold => &[Element::HoldButton, Element::HoldMeter, Element::HoldText],
            Scene::Finale => &[
                Element::FinalLines,
                Element::FinalYesButtons,
                Element::FinalMessage,
                Element::HiddenNote,
                Element::FinalBackground,
            ],
        });
        elements
    }
}

/// What a scene controller may do to the page.
pub trait PageSurface: Send {
    /// Returns whether the page carries `element`.
    fn has(&self, element: Element) -> bool;

    /// Number of memory images on the page.
    fn image_count(&self) -> usize;

    fn set_text(&mut self, element: Element, text: &str);

    fn show(&mut self, element: Element);

    fn set_enabled(&mut self, element: Element, enabled: bool);

    /// Sets the hold meter width in percent.
    fn set_meter(&mut self, percent: f64);

    fn set_overlay_opacity(&mut self, opacity: f64);

    fn show_hint(&mut self, message: &str, duration_ms: u64);

    fn place_targets(&mut self, targets: &[Target]);

    fn set_target_flag(&mut self, index: usize, wrong: bool);
}

/// In-memory surface. Keeps the latest state of every element and logs
/// visible changes.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    elements: HashSet<Element>,
    image_count: usize,
    texts: HashMap<Element, String>,
    visible: HashSet<Element>,
    disabled: HashSet<Element>,
    meter_percent: f64,
    overlay_opacity: f64,
    hints: Vec<(String, u64)>,
    targets: Vec<Target>,
    flagged: HashSet<usize>,
}

impl HeadlessSurface {
    /// A surface carrying exactly `elements`.
    #[must_use]
    pub fn with_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
            ..Self::default()
        }
    }

    /// The full page for `scene`.
    #[must_use]
    pub fn for_scene(scene: Scene) -> Self {
        let mut surface = Self::with_elements(Element::for_scene(scene));
        if scene == Scene::Memories {
            surface.image_count = 3;
        }
        surface
    }

    /// Drops `element` from the page.
    #[must_use]
    pub fn without(mut self, element: Element) -> Self {
        self.elements.remove(&element);
        self
    }

    /// Sets the number of memory images.
    #[must_use]
    pub fn with_images(mut self, count: usize) -> Self {
        self.image_count = count;
        self
    }

    #[must_use]
    pub fn text(&self, element: Element) -> Option<&str> {
        self.texts.get(&element).map(String::as_str)
    }

    #[must_use]
    pub fn is_visible(&self, element: Element) -> bool {
        self.visible.contains(&element)
    }

    #[must_use]
    pub fn is_enabled(&self, element: Element) -> bool {
        !self.disabled.contains(&element)
    }

    #[must_use]
    pub fn meter_percent(&self) -> f64 {
        self.meter_percent
    }

    #[must_use]
    pub fn overlay_opacity(&self) -> f64 {
        self.overlay_opacity
    }

    /// Every hint shown so far, with its duration.
    #[must_use]
    pub fn hints(&self) -> &[(String, u64)] {
        &self.hints
    }

    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[must_use]
    pub fn is_target_flagged(&self, index: usize) -> bool {
        self.flagged.contains(&index)
    }
}

impl PageSurface for HeadlessSurface {
    fn has(&self, element: Element) -> bool {
        self.elements.contains(&element)
    }

    fn image_count(&self) -> usize {
        self.image_count
    }

    fn set_text(&mut self, element: Element, text: &str) {
        if self.texts.get(&element).is_some_and(|t| t == text) {
            return;
        }
        tracing::trace!(?element, text, "text updated");
        self.texts.insert(element, text.to_owned());
    }

    fn show(&mut self, element: Element) {
        if self.visible.insert(element) {
            tracing::info!(?element, "element shown");
        }
    }

    fn set_enabled(&mut self, element: Element, enabled: bool) {
        if enabled {
            self.disabled.remove(&element);
        } else {
            self.disabled.insert(element);
        }
    }

    fn set_meter(&mut self, percent: f64) {
        self.meter_percent = percent.clamp(0.0, 100.0);
    }

    fn set_overlay_opacity(&mut self, opacity: f64) {
        self.overlay_opacity = opacity.clamp(0.0, 1.0);
    }

    fn show_hint(&mut self, message: &str, duration_ms: u64) {
        tracing::info!(message, duration_ms, "hint shown");
        self.hints.push((message.to_owned(), duration_ms));
    }

    fn place_targets(&mut self, targets: &[Target]) {
        self.targets = targets.to_vec();
    }

    fn set_target_flag(&mut self, index: usize, wrong: bool) {
        if wrong {
            self.flagged.insert(index);
        } else {
            self.flagged.remove(&index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scene_page_has_overlay_and_toggle() {
        for scene in Scene::ALL {
            let surface = HeadlessSurface::for_scene(scene);
            assert!(surface.has(Element::TransitionOverlay));
            assert!(surface.has(Element::MusicToggle));
        }
    }

    #[test]
    fn test_without_removes_element() {
        let surface = HeadlessSurface::for_scene(Scene::Hold).without(Element::HoldMeter);

        assert!(!surface.has(Element::HoldMeter));
        assert!(surface.has(Element::HoldButton));
    }

    #[test]
    fn test_meter_and_overlay_are_clamped() {
        let mut surface = HeadlessSurface::default();

        surface.set_meter(140.0);
        surface.set_overlay_opacity(-1.0);

        assert!((surface.meter_percent() - 100.0).abs() < f64::EPSILON);
        assert!(surface.overlay_opacity().abs() < f64::EPSILON);
    }
}
