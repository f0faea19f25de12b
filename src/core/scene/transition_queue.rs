//=========================================================================
// Transition Queue
//=========================================================================
//
// Queue for scene changes requested while a frame is running.
//
// Scenes queue transitions here during updates. The scene manager
// processes this queue at the tick boundary, in FIFO order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::Scene;

//=== SceneTransition =====================================================

/// A deferred scene change.
pub enum SceneTransition {
    /// Deactivates the current scene (if any) and activates this one.
    Set(Box<dyn Scene>),

    /// Deactivates the current scene, leaving the manager empty.
    Clear,
}

impl fmt::Debug for SceneTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(scene) => f.debug_tuple("Set").field(&scene.name()).finish(),
            Self::Clear => f.write_str("Clear"),
        }
    }
}

//=== TransitionQueue =====================================================

/// FIFO of pending [`SceneTransition`]s.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<SceneTransition>,
}

impl TransitionQueue {
    /// Creates a new empty transition queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a scene transition to be processed at the next tick boundary.
    pub fn push(&mut self, transition: SceneTransition) {
        self.queue.push(transition);
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued transitions.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all transitions from the queue, leaving it empty.
    pub fn take(&mut self) -> Vec<SceneTransition> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Menu;
    impl Scene for Menu {
        fn name(&self) -> &'static str {
            "menu"
        }
    }

    #[test]
    fn take_drains_in_fifo_order() {
        let mut queue = TransitionQueue::new();
        queue.push(SceneTransition::Set(Box::new(Menu)));
        queue.push(SceneTransition::Clear);
        assert_eq!(queue.len(), 2);

        let taken = queue.take();

        assert!(queue.is_empty());
        assert!(matches!(taken[0], SceneTransition::Set(_)));
        assert!(matches!(taken[1], SceneTransition::Clear));
    }

    #[test]
    fn debug_shows_scene_name() {
        let transition = SceneTransition::Set(Box::new(Menu));
        assert_eq!(format!("{:?}", transition), "Set(\"menu\")");
    }
}
