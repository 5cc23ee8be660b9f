//! Lazy loading and playback of deferred videos.
//!
//! Every deferred video is registered once after a render pass. The host
//! reports intersection changes as the fraction of each element's area that
//! is on screen; the controller reacts per entry:
//!
//! - at or above the threshold: assign the deferred source if none is set
//!   yet (first time only), then ask for playback. A refusal is ignored.
//! - below the threshold: pause. The source stays assigned.
//!
//! Images are not observed; they rely on native `loading="lazy"`.

use crate::dom::MediaElement;
use tracing::debug;

/// Stable handle for an observed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaId(usize);

/// One intersection change reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub target: MediaId,
    /// Visible fraction of the element's area, `0.0..=1.0`.
    pub ratio: f64,
}

pub struct VisibilityController<M> {
    threshold: f64,
    elements: Vec<M>,
}

impl<M: MediaElement> VisibilityController<M> {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            elements: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start observing an element. It stays observed for the controller's life.
    pub fn observe(&mut self, element: M) -> MediaId {
        self.elements.push(element);
        MediaId(self.elements.len() - 1)
    }

    pub fn observe_all(&mut self, elements: impl IntoIterator<Item = M>) -> Vec<MediaId> {
        elements.into_iter().map(|el| self.observe(el)).collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: MediaId) -> Option<&M> {
        self.elements.get(id.0)
    }

    pub fn on_intersections(&mut self, entries: &[Intersection]) {
        for entry in entries {
            self.on_intersection(*entry);
        }
    }

    pub fn on_intersection(&mut self, entry: Intersection) {
        let threshold = self.threshold;
        let Some(element) = self.elements.get_mut(entry.target.0) else {
            debug!(target_id = entry.target.0, "intersection for unknown element");
            return;
        };

        if entry.ratio >= threshold {
            if element.source().is_none_or(str::is_empty) {
                let locator = element.deferred_source().to_string();
                if !locator.is_empty() {
                    debug!(%locator, "assigning deferred video source");
                    element.assign_source(&locator);
                }
            }
            if let Err(refused) = element.play() {
                debug!(error = %refused, "ignoring refused playback");
            }
        } else {
            element.pause();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryMedia;

    fn enter(id: MediaId) -> Intersection {
        Intersection {
            target: id,
            ratio: 0.6,
        }
    }

    fn leave(id: MediaId) -> Intersection {
        Intersection {
            target: id,
            ratio: 0.0,
        }
    }

    #[test]
    fn source_assigned_on_first_entry() {
        let mut controller = VisibilityController::new(0.35);
        let id = controller.observe(MemoryMedia::new("clip.mp4"));
        assert_eq!(controller.element(id).unwrap().source, None);

        controller.on_intersection(enter(id));
        let media = controller.element(id).unwrap();
        assert_eq!(media.source.as_deref(), Some("clip.mp4"));
        assert!(media.playing);
    }

    #[test]
    fn assignment_is_one_shot() {
        let mut controller = VisibilityController::new(0.35);
        let id = controller.observe(MemoryMedia::new("clip.mp4"));

        controller.on_intersections(&[enter(id), leave(id), enter(id)]);

        let media = controller.element(id).unwrap();
        assert_eq!(media.assignments, 1);
        assert_eq!(media.play_requests, 2);
        assert_eq!(media.pause_requests, 1);
        assert!(media.playing);
    }

    #[test]
    fn leaving_pauses_without_unloading() {
        let mut controller = VisibilityController::new(0.35);
        let id = controller.observe(MemoryMedia::new("clip.mp4"));
        controller.on_intersections(&[enter(id), leave(id)]);

        let media = controller.element(id).unwrap();
        assert!(!media.playing);
        assert_eq!(media.source.as_deref(), Some("clip.mp4"));
    }

    #[test]
    fn below_threshold_does_not_load() {
        let mut controller = VisibilityController::new(0.35);
        let id = controller.observe(MemoryMedia::new("clip.mp4"));
        controller.on_intersection(Intersection {
            target: id,
            ratio: 0.2,
        });

        let media = controller.element(id).unwrap();
        assert_eq!(media.source, None);
        assert_eq!(media.play_requests, 0);
        assert_eq!(media.pause_requests, 1);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut controller = VisibilityController::new(0.35);
        let id = controller.observe(MemoryMedia::new("clip.mp4"));
        controller.on_intersection(Intersection {
            target: id,
            ratio: 0.35,
        });
        assert!(controller.element(id).unwrap().source.is_some());
    }

    #[test]
    fn refused_playback_is_swallowed() {
        let mut controller = VisibilityController::new(0.35);
        let id = controller.observe(MemoryMedia {
            refuse_playback: true,
            ..MemoryMedia::new("clip.mp4")
        });
        controller.on_intersection(enter(id));

        let media = controller.element(id).unwrap();
        assert_eq!(media.source.as_deref(), Some("clip.mp4"));
        assert!(!media.playing);
        assert_eq!(media.play_requests, 1);
    }

    #[test]
    fn already_assigned_source_is_kept() {
        let mut controller = VisibilityController::new(0.35);
        let id = controller.observe(MemoryMedia {
            source: Some("other.mp4".into()),
            ..MemoryMedia::new("clip.mp4")
        });
        controller.on_intersection(enter(id));

        let media = controller.element(id).unwrap();
        assert_eq!(media.source.as_deref(), Some("other.mp4"));
        assert_eq!(media.assignments, 0);
    }

    #[test]
    fn elements_are_independent() {
        let mut controller = VisibilityController::new(0.35);
        let ids = controller.observe_all([MemoryMedia::new("a.mp4"), MemoryMedia::new("b.mp4")]);
        controller.on_intersection(enter(ids[1]));

        assert_eq!(controller.len(), 2);
        assert_eq!(controller.element(ids[0]).unwrap().source, None);
        assert_eq!(
            controller.element(ids[1]).unwrap().source.as_deref(),
            Some("b.mp4")
        );
    }
}
