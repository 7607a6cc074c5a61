//! Optional host capability: "align active camera to selection".
//!
//! Some hosts can frame the current selection themselves when an interactive
//! viewport exists. The host's alignment works on its selection, so the
//! subject has to be selected first and the user's selection put back
//! afterwards. [`SelectionScope`] owns that save/restore.

use std::ops::{Deref, DerefMut};

use iconframe_core::{CameraPose, ObjectId, Selection};
use thiserror::Error;

/// Errors reported by an [`AlignmentOracle`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    /// There is no interactive viewport to run the alignment in.
    #[error("no interactive viewport available")]
    ViewportUnavailable,

    /// The host refused or failed the alignment.
    #[error("alignment failed: {0}")]
    Failed(String),
}

/// Read and replace the host's object selection.
pub trait SelectionHost {
    /// Returns the current selection.
    fn selection(&self) -> Selection;

    /// Replaces the current selection.
    fn set_selection(&mut self, selection: Selection);
}

/// A host that can align a camera to its current selection.
///
/// The alignment keeps the camera's rotation and field of view and moves it
/// so the selection fits the frame.
pub trait AlignmentOracle: SelectionHost {
    /// Returns true if an interactive viewport exists right now.
    fn viewport_available(&self) -> bool;

    /// Moves `pose` so the current selection fills the frame.
    fn align_camera_to_selection(&mut self, pose: &mut CameraPose) -> Result<(), AlignmentError>;
}

/// Selection replaced for the lifetime of the scope.
///
/// Entering saves the host's selection and selects the subject; dropping the
/// scope restores the saved selection on every exit path.
pub struct SelectionScope<'a, H: SelectionHost + ?Sized> {
    host: &'a mut H,
    saved: Selection,
}

impl<'a, H: SelectionHost + ?Sized> SelectionScope<'a, H> {
    /// Saves the current selection and selects exactly `subject`.
    pub fn enter(host: &'a mut H, subject: &[ObjectId]) -> Self {
        let saved = host.selection();
        host.set_selection(Selection::only(subject));
        Self { host, saved }
    }

    /// The selection that will be restored.
    pub fn saved(&self) -> &Selection {
        &self.saved
    }
}

impl<H: SelectionHost + ?Sized> Deref for SelectionScope<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: SelectionHost + ?Sized> DerefMut for SelectionScope<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: SelectionHost + ?Sized> Drop for SelectionScope<'_, H> {
    fn drop(&mut self) {
        self.host.set_selection(std::mem::take(&mut self.saved));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Host {
        selection: Selection,
        writes: usize,
    }

    impl SelectionHost for Host {
        fn selection(&self) -> Selection {
            self.selection.clone()
        }

        fn set_selection(&mut self, selection: Selection) {
            self.selection = selection;
            self.writes += 1;
        }
    }

    fn user_selection() -> Selection {
        Selection {
            selected: vec![ObjectId(7), ObjectId(9)],
            active: Some(ObjectId(9)),
        }
    }

    #[test]
    fn test_scope_selects_subject_and_restores() {
        let mut host = Host {
            selection: user_selection(),
            ..Host::default()
        };
        {
            let scope = SelectionScope::enter(&mut host, &[ObjectId(1), ObjectId(2)]);
            assert_eq!(scope.selection(), Selection::only(&[ObjectId(1), ObjectId(2)]));
            assert_eq!(scope.saved(), &user_selection());
        }
        assert_eq!(host.selection, user_selection());
        assert_eq!(host.writes, 2);
    }

    #[test]
    fn test_scope_restores_on_early_return() {
        fn fails(host: &mut Host) -> Result<(), AlignmentError> {
            let _scope = SelectionScope::enter(host, &[ObjectId(3)]);
            Err(AlignmentError::Failed("boom".into()))
        }

        let mut host = Host {
            selection: user_selection(),
            ..Host::default()
        };
        assert!(fails(&mut host).is_err());
        assert_eq!(host.selection, user_selection());
    }

    #[test]
    fn test_scope_restores_empty_selection() {
        let mut host = Host::default();
        {
            let _scope = SelectionScope::enter(&mut host, &[ObjectId(5)]);
        }
        assert!(host.selection.is_empty());
    }
}
