#![forbid(unsafe_code)]

//! Navigation state and its immutable snapshots.
//!
//! [`NavState`] is the live, mutable bundle of navigation-relevant fields
//! owned by the application shell. [`NavSnapshot`] is a by-value capture of
//! those fields taken at push time; mutating live state afterwards never
//! alters a stored snapshot. Restoring a snapshot assigns every field in one
//! call, so no partially-applied state is ever observable.
//!
//! The media payload types (items, libraries, playback options) are opaque
//! to this crate and supplied through the [`NavDomain`] trait, so the
//! navigation core can be tested with plain strings and shipped with real
//! media types without either knowing about the other.

use crate::view::ViewKind;

/// Payload types carried through navigation state.
///
/// Implementors are usually zero-sized marker types:
///
/// ```
/// use tvnav_core::NavDomain;
///
/// struct MyApp;
///
/// impl NavDomain for MyApp {
///     type Item = String;
///     type Library = String;
///     type Playback = String;
/// }
/// ```
pub trait NavDomain {
    /// A selectable media item (movie, episode, series, ...).
    type Item: Clone;
    /// A media library reference.
    type Library: Clone;
    /// Options the player was launched with.
    type Playback: Clone;
}

/// Immutable capture of the seven navigation-relevant fields.
pub struct NavSnapshot<D: NavDomain> {
    /// View that was visible at capture time.
    pub view: ViewKind,
    /// Item selected at capture time, if any.
    pub selected_item: Option<D::Item>,
    /// Library selected at capture time, if any.
    pub selected_library: Option<D::Library>,
    /// Playback options in effect at capture time, if any.
    pub playback_options: Option<D::Playback>,
    /// Item to return to from the details view (series ← episode).
    pub previous_item: Option<D::Item>,
    /// View the details screen returns to on back.
    pub details_return_view: ViewKind,
    /// Whether the player controls overlay was showing.
    pub player_controls_visible: bool,
}

impl<D: NavDomain> Clone for NavSnapshot<D> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            selected_item: self.selected_item.clone(),
            selected_library: self.selected_library.clone(),
            playback_options: self.playback_options.clone(),
            previous_item: self.previous_item.clone(),
            details_return_view: self.details_return_view,
            player_controls_visible: self.player_controls_visible,
        }
    }
}

impl<D: NavDomain> PartialEq for NavSnapshot<D>
where
    D::Item: PartialEq,
    D::Library: PartialEq,
    D::Playback: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.view == other.view
            && self.selected_item == other.selected_item
            && self.selected_library == other.selected_library
            && self.playback_options == other.playback_options
            && self.previous_item == other.previous_item
            && self.details_return_view == other.details_return_view
            && self.player_controls_visible == other.player_controls_visible
    }
}

impl<D: NavDomain> core::fmt::Debug for NavSnapshot<D>
where
    D::Item: core::fmt::Debug,
    D::Library: core::fmt::Debug,
    D::Playback: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavSnapshot")
            .field("view", &self.view)
            .field("selected_item", &self.selected_item)
            .field("selected_library", &self.selected_library)
            .field("playback_options", &self.playback_options)
            .field("previous_item", &self.previous_item)
            .field("details_return_view", &self.details_return_view)
            .field("player_controls_visible", &self.player_controls_visible)
            .finish()
    }
}

/// Live navigation state owned by the application shell.
///
/// The dynamic design this models restored snapshots with per-field nullish
/// fallbacks (view → home, item fields → null, controls visible unless
/// explicitly false). Those fallbacks are encoded here in the types: the
/// item fields are `Option`s that restore to `None` naturally, and the
/// non-optional fields are always captured, so [`NavState::restore`] is a
/// plain assignment of every field.
pub struct NavState<D: NavDomain> {
    /// Currently visible view.
    pub view: ViewKind,
    /// Currently selected item.
    pub selected_item: Option<D::Item>,
    /// Currently selected library.
    pub selected_library: Option<D::Library>,
    /// Playback options for the active/pending playback.
    pub playback_options: Option<D::Playback>,
    /// Item to return to from the details view.
    pub previous_item: Option<D::Item>,
    /// View the details screen returns to on back.
    pub details_return_view: ViewKind,
    /// Whether the player controls overlay is showing.
    pub player_controls_visible: bool,
}

impl<D: NavDomain> NavState<D> {
    /// Fresh state showing `initial`, with the same defaults a restored
    /// nullish snapshot would produce.
    pub fn new(initial: ViewKind) -> Self {
        Self {
            view: initial,
            selected_item: None,
            selected_library: None,
            playback_options: None,
            previous_item: None,
            details_return_view: ViewKind::Home,
            player_controls_visible: true,
        }
    }

    /// Capture the current field values by value.
    pub fn snapshot(&self) -> NavSnapshot<D> {
        NavSnapshot {
            view: self.view,
            selected_item: self.selected_item.clone(),
            selected_library: self.selected_library.clone(),
            playback_options: self.playback_options.clone(),
            previous_item: self.previous_item.clone(),
            details_return_view: self.details_return_view,
            player_controls_visible: self.player_controls_visible,
        }
    }

    /// Apply a snapshot back into live state.
    ///
    /// Assigns all seven fields in one call; callers never observe a
    /// half-restored state.
    pub fn restore(&mut self, snapshot: NavSnapshot<D>) {
        self.view = snapshot.view;
        self.selected_item = snapshot.selected_item;
        self.selected_library = snapshot.selected_library;
        self.playback_options = snapshot.playback_options;
        self.previous_item = snapshot.previous_item;
        self.details_return_view = snapshot.details_return_view;
        self.player_controls_visible = snapshot.player_controls_visible;
    }
}

impl<D: NavDomain> Clone for NavState<D> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            selected_item: self.selected_item.clone(),
            selected_library: self.selected_library.clone(),
            playback_options: self.playback_options.clone(),
            previous_item: self.previous_item.clone(),
            details_return_view: self.details_return_view,
            player_controls_visible: self.player_controls_visible,
        }
    }
}

impl<D: NavDomain> PartialEq for NavState<D>
where
    D::Item: PartialEq,
    D::Library: PartialEq,
    D::Playback: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

impl<D: NavDomain> core::fmt::Debug for NavState<D>
where
    D::Item: core::fmt::Debug,
    D::Library: core::fmt::Debug,
    D::Playback: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavState")
            .field("view", &self.view)
            .field("selected_item", &self.selected_item)
            .field("selected_library", &self.selected_library)
            .field("playback_options", &self.playback_options)
            .field("previous_item", &self.previous_item)
            .field("details_return_view", &self.details_return_view)
            .field("player_controls_visible", &self.player_controls_visible)
            .finish()
    }
}
